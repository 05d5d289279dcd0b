//! Asynchronous abstraction over where snapshots come from.
//!
//! The runtime pulls snapshots through [`SnapshotSource`] so it can follow a
//! live save file, replay a recorded run, or drive test fixtures.
use std::collections::VecDeque;

use async_trait::async_trait;
use showdown_core::Snapshot;

use super::errors::Result;

/// Trait for producing successive snapshots of one run.
///
/// Implementations:
/// - the polling save-file watcher
/// - in-memory replay for tests and recorded runs
#[async_trait]
pub trait SnapshotSource: Send {
    /// Waits for the next snapshot.
    ///
    /// # Returns
    /// `Ok(None)` once the run is over and no further snapshot will come.
    async fn next_snapshot(&mut self) -> Result<Option<Snapshot>>;
}

/// Replays a fixed list of snapshots in order.
#[derive(Debug, Default)]
pub struct MemorySource {
    snapshots: VecDeque<Snapshot>,
}

impl MemorySource {
    pub fn new(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        Self {
            snapshots: snapshots.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.snapshots.len()
    }
}

#[async_trait]
impl SnapshotSource for MemorySource {
    async fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
        Ok(self.snapshots.pop_front())
    }
}
