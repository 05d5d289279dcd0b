//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or persistence.

pub mod errors;
pub mod report;
pub mod source;

pub use errors::{Result, RuntimeError};
pub use report::{BattleTally, Report, Split, pretty_time};
pub use source::{MemorySource, SnapshotSource};
