//! Polling save-file watcher.
//!
//! The game rewrites its save file after every meaningful change. The watcher
//! polls the file's modification time, decodes every new write and ends the
//! run once the file disappears, which the game does when a run is over.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use showdown_core::Snapshot;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError, SnapshotSource};
use crate::save::read_snapshot;

#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub path: PathBuf,
    pub poll_interval: Duration,
    /// Extra reads of a write that looked truncated.
    pub retry_budget: u32,
    pub retry_delay: Duration,
}

/// [`SnapshotSource`] following the live save file.
pub struct SaveFileWatcher {
    config: WatcherConfig,
    last_modified: Option<SystemTime>,
    /// The file existed at least once.
    seen: bool,
    announced_wait: bool,
}

impl SaveFileWatcher {
    pub fn new(config: WatcherConfig) -> Self {
        Self {
            config,
            last_modified: None,
            seen: false,
            announced_wait: false,
        }
    }

    async fn modified(&self) -> std::io::Result<SystemTime> {
        tokio::fs::metadata(&self.config.path).await?.modified()
    }

    /// Reads and decodes the current write.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the write stayed truncated past the retry budget or
    /// the file vanished while being read.
    async fn read(&mut self) -> Result<Option<Snapshot>> {
        let mut attempt = 0;
        loop {
            let contents = match tokio::fs::read_to_string(&self.config.path).await {
                Ok(contents) => contents,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(RuntimeError::Io(err)),
            };
            match read_snapshot(&contents) {
                Ok(snapshot) => {
                    // Writes made while retrying are part of this snapshot.
                    if let Ok(modified) = self.modified().await {
                        self.last_modified = Some(modified);
                    }
                    return Ok(Some(snapshot));
                }
                Err(err) if err.is_incomplete() && attempt < self.config.retry_budget => {
                    attempt += 1;
                    debug!(attempt, "save file looks truncated, retrying: {err}");
                    sleep(self.config.retry_delay).await;
                }
                Err(err) if err.is_incomplete() => {
                    warn!(attempts = attempt + 1, "skipping a truncated save write: {err}");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[async_trait]
impl SnapshotSource for SaveFileWatcher {
    async fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
        loop {
            match self.modified().await {
                Ok(modified) if self.last_modified != Some(modified) => {
                    if !self.seen {
                        info!(path = %self.config.path.display(), "save file found");
                    }
                    self.seen = true;
                    self.last_modified = Some(modified);
                    if let Some(snapshot) = self.read().await? {
                        return Ok(Some(snapshot));
                    }
                }
                Ok(_) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    if self.seen {
                        info!("save file removed, run finished");
                        return Ok(None);
                    }
                    if !self.announced_wait {
                        info!(path = %self.config.path.display(), "run not yet started, waiting for the save file");
                        self.announced_wait = true;
                    }
                }
                Err(err) => return Err(RuntimeError::Io(err)),
            }
            sleep(self.config.poll_interval).await;
        }
    }
}
