//! Runtime that follows a Shogun Showdown run through its save file.
//!
//! This crate wires the save-file decoder, the snapshot sources, the phase
//! dispatcher and the potion-knowledge store into a cohesive runtime API.
//! Consumers embed [`Runtime`] and read the narrative of the run as
//! [`Report`]s.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`save`] decodes and encodes the save file
//! - [`compare`] dispatches consecutive snapshots to the per-phase handlers
//! - [`history`] carries what one run has taught so far
//! - [`workers`] keeps background tasks internal to the crate
//! - [`repository`] persists potion knowledge between sessions
pub mod api;
pub mod compare;
pub mod history;
pub mod repository;
pub mod runtime;
pub mod save;

mod workers;

pub use api::{BattleTally, MemorySource, Report, Result, RuntimeError, SnapshotSource, Split, pretty_time};
pub use history::RunHistory;
pub use repository::{
    FileKnowledgeRepository, InMemoryKnowledgeRepository, KnowledgeRepository, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use save::SaveError;
pub use workers::{SaveFileWatcher, WatcherConfig};
