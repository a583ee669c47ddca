//! Pure planning algorithms. Nothing in here touches a repository.

pub mod allocation;
pub mod arrival;
pub mod capacity;
pub mod cost;
pub mod distance;
pub mod overrides;

pub use allocation::{allocate, AllocationEngine, AllocationState};
pub use arrival::estimate_arrival;
pub use capacity::available_capacity;
pub use cost::FeeSchedule;
pub use distance::{haversine_miles, rank_all, rank_depots};
pub use overrides::{OverrideSet, TrailerKey};
