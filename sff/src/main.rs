use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use sff::config::SFFConfig;
use sff::io::cli::Cli;
use sff::io::output::SFFOutput;
use sff::opt::sff_optimizer::SFFOptimizer;
use sff::{EPOCH, io};
use sheetnest::io::export::export;
use sheetnest::io::import::import;
use sheetnest::io::svg::sheet_to_svg;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            SFFConfig::default()
        }
        Some(config_file) => {
            let file = File::open(&config_file)
                .with_context(|| format!("could not open config file: {}", config_file.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("[MAIN] Successfully parsed SFFConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid file name")?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_instance = io::read_instance(args.input_file.as_path())?;
    let instance = import(&ext_instance)?;

    let mut optimizer = SFFOptimizer::new(instance, config)?;
    let solution = optimizer.solve()?;

    {
        let output = SFFOutput {
            instance: ext_instance,
            solution: export(&optimizer.instance, &solution, *EPOCH),
            config,
            scale_factor: optimizer.scale_factor,
        };

        let solution_path = args.solution_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, Path::new(&solution_path))?;
    }

    for sheet in solution.sheets.iter() {
        let svg_path = args
            .solution_folder
            .join(format!("sol_{input_stem}_{}.svg", sheet.id));
        let title = format!("{input_stem}, sheet {}", sheet.id);
        let svg = sheet_to_svg(sheet, &optimizer.instance, config.svg_draw_options, &title);

        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    Ok(())
}
