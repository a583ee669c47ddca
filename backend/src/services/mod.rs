//! Service layer over the pure algorithms.
//!
//! `routing` drives an allocation run from repository data; `summary` and
//! `costs` derive the per-depot and cost views of a finished run.

pub mod costs;
pub mod routing;
pub mod summary;

pub use costs::{cost_report, overview};
pub use routing::{plan_day, plan_snapshot, DayPlan};
pub use summary::{filter_depot, sort_by_utilisation_desc, summarize, utilisation};
