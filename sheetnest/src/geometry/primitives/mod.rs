mod point;
mod rect;
mod region;
mod simple_polygon;

#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use region::Region;
#[doc(inline)]
pub use simple_polygon::SPolygon;

/// Parts of a shape with less area than this are considered numerical noise
pub const SLIVER_AREA: f64 = 1e-6;
