pub mod search;
pub mod sff_optimizer;
pub mod similarity;
