//! High-level runtime orchestrator.
//!
//! The runtime owns the background tasks, wires up the snapshot and report
//! channels, and exposes a builder-based API for clients to follow a run.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use directories::BaseDirs;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use showdown_core::{EngineConfig, Snapshot};

use crate::api::{Report, Result, RuntimeError, SnapshotSource};
use crate::repository::{FileKnowledgeRepository, KnowledgeRepository};
use crate::workers::{ComparisonWorker, SaveFileWatcher, WatcherConfig};

/// Save file location relative to the user's home directory.
const SAVE_FILE: [&str; 5] = ["AppData", "LocalLow", "Roboatino", "ShogunShowdown", "RunSaveData.dat"];

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub save_path: PathBuf,
    pub poll_interval: Duration,
    /// Extra reads of a save write that looked truncated.
    pub retry_budget: u32,
    pub retry_delay: Duration,
    pub snapshot_buffer_size: usize,
    pub report_buffer_size: usize,
    pub engine: EngineConfig,
    /// Directory for persisted potion knowledge; `None` keeps it in memory only.
    pub knowledge_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    /// `<home>/AppData/LocalLow/Roboatino/ShogunShowdown/RunSaveData.dat`
    pub fn default_save_path() -> PathBuf {
        let home = BaseDirs::new().map_or_else(|| PathBuf::from("."), |dirs| dirs.home_dir().to_path_buf());
        SAVE_FILE.iter().fold(home, |path, part| path.join(part))
    }

    pub fn watcher_config(&self) -> WatcherConfig {
        WatcherConfig {
            path: self.save_path.clone(),
            poll_interval: self.poll_interval,
            retry_budget: self.retry_budget,
            retry_delay: self.retry_delay,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            save_path: Self::default_save_path(),
            poll_interval: Duration::from_millis(100),
            retry_budget: 5,
            retry_delay: Duration::from_millis(50),
            snapshot_buffer_size: 32,
            report_buffer_size: 256,
            engine: EngineConfig::default(),
            knowledge_dir: None,
        }
    }
}

/// Main runtime that follows one run.
///
/// A source task pulls snapshots from the [`SnapshotSource`]; the comparison
/// worker turns them into [`Report`]s read through [`Runtime::next_report`].
pub struct Runtime {
    report_rx: mpsc::Receiver<Report>,

    // Background workers
    source_handle: JoinHandle<()>,
    worker_handle: JoinHandle<Result<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Next report, `None` once the run is over or the worker stopped.
    pub async fn next_report(&mut self) -> Option<Report> {
        self.report_rx.recv().await
    }

    /// Stops following and surfaces the worker's outcome.
    ///
    /// # Errors
    ///
    /// The error that stopped the comparison worker, or a join failure.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.report_rx);
        self.source_handle.abort();
        let outcome = self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        if let Err(err) = self.source_handle.await
            && !err.is_cancelled()
        {
            return Err(RuntimeError::WorkerJoin(err));
        }
        outcome
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    source: Option<Box<dyn SnapshotSource>>,
    knowledge: Option<Arc<dyn KnowledgeRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            source: None,
            knowledge: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Follow `source` instead of the save file named in the configuration.
    pub fn source(mut self, source: impl SnapshotSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Store potion knowledge in `repository` instead of the configured directory.
    pub fn knowledge_repository(mut self, repository: impl KnowledgeRepository + 'static) -> Self {
        self.knowledge = Some(Arc::new(repository));
        self
    }

    /// Build the runtime and start its tasks.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::Repository`] when the knowledge directory cannot be created.
    pub async fn build(self) -> Result<Runtime> {
        let knowledge = match (self.knowledge, &self.config.knowledge_dir) {
            (Some(repository), _) => Some(repository),
            (None, Some(dir)) => Some(Arc::new(FileKnowledgeRepository::new(dir)?) as Arc<dyn KnowledgeRepository>),
            (None, None) => None,
        };
        let source = self
            .source
            .unwrap_or_else(|| Box::new(SaveFileWatcher::new(self.config.watcher_config())));

        let (snapshot_tx, snapshot_rx) = mpsc::channel::<Result<Snapshot>>(self.config.snapshot_buffer_size);
        let (report_tx, report_rx) = mpsc::channel::<Report>(self.config.report_buffer_size);

        let source_handle = tokio::spawn(pump_snapshots(source, snapshot_tx));

        let worker = ComparisonWorker::new(self.config.engine.clone(), snapshot_rx, report_tx, knowledge);
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            report_rx,
            source_handle,
            worker_handle,
        })
    }
}

/// Forwards snapshots until the source ends, fails, or nobody listens.
async fn pump_snapshots(mut source: Box<dyn SnapshotSource>, snapshot_tx: mpsc::Sender<Result<Snapshot>>) {
    loop {
        let (item, last) = match source.next_snapshot().await {
            Ok(Some(snapshot)) => (Ok(snapshot), false),
            Ok(None) => break,
            Err(err) => (Err(err), true),
        };
        if snapshot_tx.send(item).await.is_err() {
            debug!("snapshot receiver dropped, stopping source");
            break;
        }
        if last {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_save_path_points_at_the_game_folder() {
        let path = RuntimeConfig::default_save_path();
        assert!(path.ends_with("AppData/LocalLow/Roboatino/ShogunShowdown/RunSaveData.dat"));
    }
}
