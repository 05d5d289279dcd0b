//! Worker tasks that back the runtime orchestration.
//!
//! The watcher turns save-file writes into snapshots, the comparison worker
//! turns consecutive snapshots into reports.

mod comparison;
mod watcher;

pub use comparison::ComparisonWorker;
pub use watcher::{SaveFileWatcher, WatcherConfig};
