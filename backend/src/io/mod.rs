//! File loaders.

pub mod seed;

pub use seed::{apply_seed, load_seed, SeedData, SeedSummary};
