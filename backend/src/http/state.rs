//! Application state for the HTTP server.

use std::sync::Arc;

use crate::algorithms::FeeSchedule;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn FullRepository>,
    /// Pricing applied to every allocation run.
    pub fees: FeeSchedule,
}

impl AppState {
    /// State with the default fee schedule.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self::with_fees(repository, FeeSchedule::default())
    }

    pub fn with_fees(repository: Arc<dyn FullRepository>, fees: FeeSchedule) -> Self {
        Self { repository, fees }
    }
}
