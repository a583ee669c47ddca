//! Repository implementations.
//!
//! - `local`: in-memory implementation for tests, demos and single-node runs
pub mod local;

pub use local::LocalRepository;
