pub mod allocation;
pub mod macros;
pub mod master;
pub mod planning;
pub mod report;
pub mod snapshot;
pub mod time;

pub use allocation::*;
pub use master::*;
pub use planning::*;
pub use report::*;
pub use snapshot::*;
pub use time::*;
