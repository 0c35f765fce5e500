//! Geometry and entities for nesting irregular pieces onto fixed-size rectangular sheets.
//!
//! The crate contains everything that is independent of a particular placement strategy:
//! robust polygon operations ([`geometry`]), the pieces, sheets and layouts that make up a
//! nesting problem ([`entities`]), conversion from and to an external JSON representation
//! and SVG rendering ([`io`]) and a set of correctness checks ([`util`]).

/// Entities to model nesting problems
pub mod entities;

/// Geometric primitives and base algorithms
pub mod geometry;

/// Importing problem instances into and exporting solutions out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
