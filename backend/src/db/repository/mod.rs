//! Repository traits for storage access.
//!
//! The traits are split by concern and joined again in [`FullRepository`],
//! which every backend implements and the service layer consumes.

pub mod error;
pub mod master;
pub mod planning;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use master::MasterDataRepository;
pub use planning::PlanningRepository;

/// Everything the service layer needs from a backend.
pub trait FullRepository: MasterDataRepository + PlanningRepository {}

impl<T> FullRepository for T where T: MasterDataRepository + PlanningRepository {}
