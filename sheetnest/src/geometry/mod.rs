#[doc(inline)]
pub use d_transformation::DTransformation;
#[doc(inline)]
pub use transformation::Transformation;

mod d_transformation;
mod transformation;

/// Set of traits representing geometric properties & operations.
pub mod geo_traits;

/// Primitive geometric shapes: points, rectangles, polygons and regions
pub mod primitives;

/// Validity repair and offsetting of shapes
pub mod shape_modification;

/// Area covered by the union of a set of regions
pub mod union;
