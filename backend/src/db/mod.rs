//! Storage for master data and planning inputs.
//!
//! Access goes through the Repository pattern so the service layer and the
//! HTTP surface never depend on a concrete backend.
//!
//! # Architecture
//!
//! - `services`: repository-agnostic operations with the data-entry rules
//!   (use these in application code)
//! - `repository`: trait definitions and error types
//! - `repositories::local`: in-memory implementation
//! - `factory`: picks an implementation from configuration
//! - `checksum`: SHA-256 fingerprints of allocation runs
//!
//! # Recommended Usage
//!
//! ```no_run
//! use freight_routing::db::{services, RepositoryFactory, RepositoryType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = RepositoryFactory::create(RepositoryType::Local);
//! let refresh = services::calculate_distances(repo.as_ref(), false).await?;
//! # let _ = refresh;
//! # Ok(())
//! # }
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use checksum::{calculate_checksum, fingerprint};
pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, FullRepository, MasterDataRepository, PlanningRepository, RepositoryError,
    RepositoryResult,
};
pub use services::{
    add_capacity_override, add_manual_override, calculate_distances, delete_capacity_override,
    delete_manual_override, health_check, import_volumes, load_planning_snapshot,
    register_collection_point, register_depot, update_depot_capacity, update_depot_window,
    DistanceRefresh,
};
