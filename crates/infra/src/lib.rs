//! Infrastructure layer: shared tracker state and its concurrency boundary.

pub mod history_log;
pub mod registry;
pub mod state;
pub mod tracker;

pub use history_log::HistoryLog;
pub use registry::TypeRegistry;
pub use state::{ImportSummary, TrackerState};
pub use tracker::{Tracker, TrackerError, TrackerResult};
