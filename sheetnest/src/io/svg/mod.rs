mod sheet_to_svg;
mod svg_util;

#[doc(inline)]
pub use sheet_to_svg::*;

#[doc(inline)]
pub use svg_util::SvgDrawOptions;
#[doc(inline)]
pub use svg_util::SvgLayoutTheme;
#[doc(inline)]
pub use svg_util::SvgLayoutThemes;
