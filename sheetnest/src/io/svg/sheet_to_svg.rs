use svg::Document;
use svg::node::element::{Group, Title};

use crate::entities::{Instance, Sheet};
use crate::io::svg::svg_util::{SvgDrawOptions, data_to_path, s_polygon_data};

/// Draws a sheet and the pieces placed on it.
/// Coordinates are used as is, so the origin of the sheet ends up in the top left corner of the image.
pub fn sheet_to_svg(
    sheet: &Sheet,
    instance: &Instance,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let theme = options.theme.theme();
    let rect = sheet.rect();
    let vbox = rect.inflate(0.025 * f64::max(rect.width(), rect.height()));

    let stroke_width =
        f64::min(vbox.width(), vbox.height()) * 0.001 * theme.stroke_width_multiplier;

    //draw sheet
    let sheet_group = {
        let title = Title::new(format!(
            "sheet, index: {}, width: {:.3}, height: {:.3}, unfilled area: {:.3}",
            sheet.id,
            sheet.width,
            sheet.height,
            sheet.unfilled_area()
        ));
        let data = svg::node::element::path::Data::new()
            .move_to((rect.x_min as f32, rect.y_min as f32))
            .line_to((rect.x_max as f32, rect.y_min as f32))
            .line_to((rect.x_max as f32, rect.y_max as f32))
            .line_to((rect.x_min as f32, rect.y_max as f32))
            .close();

        Group::new()
            .set("id", format!("sheet_{}", sheet.id))
            .add(data_to_path(
                data,
                &[
                    ("fill", theme.sheet_fill),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(title)
    };

    //draw placed pieces
    let pieces_group = sheet
        .placed
        .iter()
        .fold(Group::new().set("id", "pieces"), |group, pp| {
            let piece = instance.piece(pp.piece_id);
            let title = Title::new(format!(
                "piece, id: {}, transf: [{}]",
                piece.ext_id, pp.d_transf
            ));
            let piece_group = pp.shape.parts().iter().fold(
                Group::new()
                    .set("id", format!("piece_{}", piece.ext_id))
                    .add(title),
                |g, part| {
                    g.add(data_to_path(
                        s_polygon_data(part),
                        &[
                            ("fill", theme.piece_fill),
                            ("stroke-width", &*format!("{}", stroke_width)),
                            ("fill-rule", "evenodd"),
                            ("stroke", "black"),
                            ("opacity", "0.9"),
                        ],
                    ))
                },
            );
            group.add(piece_group)
        });

    let vbox_svg = format!(
        "{} {} {} {}",
        vbox.x_min,
        vbox.y_min,
        vbox.width(),
        vbox.height()
    );

    Document::new()
        .set("viewBox", vbox_svg)
        .add(Title::new(title.to_string()))
        .add(sheet_group)
        .add(pieces_group)
}
