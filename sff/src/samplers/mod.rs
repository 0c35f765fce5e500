pub mod grid_sampler;
pub mod rotations;

#[doc(inline)]
pub use grid_sampler::{CandidateSampler, ColumnMajorGrid, RowMajorGrid, ScanOrder};
