use geo_types::Coord;
use serde::{Deserialize, Serialize};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::geometry::primitives::SPolygon;

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    #[serde(default)]
    pub theme: SvgLayoutThemes,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutThemes::default(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize, Default)]
pub enum SvgLayoutThemes {
    #[default]
    EarthTones,
    Gray,
}

impl SvgLayoutThemes {
    pub fn theme(&self) -> SvgLayoutTheme {
        match self {
            SvgLayoutThemes::EarthTones => EARTH_TONES_THEME,
            SvgLayoutThemes::Gray => GRAY_THEME,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub sheet_fill: &'static str,
    pub piece_fill: &'static str,
}

pub static EARTH_TONES_THEME: SvgLayoutTheme = SvgLayoutTheme {
    stroke_width_multiplier: 2.0,
    sheet_fill: "#CC824A",
    piece_fill: "#FFC879",
};

pub static GRAY_THEME: SvgLayoutTheme = SvgLayoutTheme {
    stroke_width_multiplier: 2.5,
    sheet_fill: "#C3C3C3",
    piece_fill: "#8F8F8F",
};

/// Path data of all rings of the polygon, holes included
pub fn s_polygon_data(s_poly: &SPolygon) -> Data {
    std::iter::once(s_poly.poly.exterior())
        .chain(s_poly.poly.interiors())
        .fold(Data::new(), |data, ring| {
            //the closing coordinate is implied by `close()`
            let n = ring.0.len().saturating_sub(1);
            let mut coords = ring.0[..n].iter();
            match coords.next() {
                None => data,
                Some(first) => coords
                    .fold(data.move_to(svg_coord(first)), |d, c| d.line_to(svg_coord(c)))
                    .close(),
            }
        })
}

//svg path data is single precision
fn svg_coord(c: &Coord<f64>) -> (f32, f32) {
    (c.x as f32, c.y as f32)
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}
