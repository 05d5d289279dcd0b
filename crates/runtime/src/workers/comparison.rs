//! Comparison worker that follows one run snapshot by snapshot.
//!
//! Receives decoded snapshots from the source task, runs them through the
//! phase dispatcher and publishes the resulting reports. Potion knowledge is
//! persisted after every change so following can resume mid-run.

use std::sync::Arc;

use showdown_core::{EngineConfig, ShowdownError, Snapshot};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{Report, Result};
use crate::compare::{compare_snapshots, is_run_start};
use crate::history::RunHistory;
use crate::repository::KnowledgeRepository;

pub struct ComparisonWorker {
    engine: EngineConfig,
    snapshot_rx: mpsc::Receiver<Result<Snapshot>>,
    report_tx: mpsc::Sender<Report>,
    knowledge: Option<Arc<dyn KnowledgeRepository>>,
    previous: Option<Snapshot>,
    history: Option<RunHistory>,
}

impl ComparisonWorker {
    pub fn new(
        engine: EngineConfig,
        snapshot_rx: mpsc::Receiver<Result<Snapshot>>,
        report_tx: mpsc::Sender<Report>,
        knowledge: Option<Arc<dyn KnowledgeRepository>>,
    ) -> Self {
        Self {
            engine,
            snapshot_rx,
            report_tx,
            knowledge,
            previous: None,
            history: None,
        }
    }

    /// Main worker loop.
    ///
    /// Ends with [`Report::RunFinished`] when the source is exhausted, or
    /// with the first fatal error.
    pub async fn run(mut self) -> Result<()> {
        info!(enemy_order = %self.engine.enemy_order, "comparison worker started");
        loop {
            tokio::select! {
                received = self.snapshot_rx.recv() => match received {
                    Some(Ok(snapshot)) => {
                        if let Err(err) = self.process(snapshot).await {
                            error!(severity = err.severity().as_str(), "stopping: {err}");
                            return Err(err);
                        }
                    }
                    Some(Err(err)) => {
                        error!(severity = err.severity().as_str(), "snapshot source failed: {err}");
                        return Err(err);
                    }
                    None => break,
                },
                _ = self.report_tx.closed() => {
                    debug!("report receiver dropped, stopping comparison");
                    return Ok(());
                }
            }
        }
        self.publish(Report::RunFinished).await;
        Ok(())
    }

    async fn process(&mut self, snapshot: Snapshot) -> Result<()> {
        let mut history = self.take_history(&snapshot)?;
        let before = history.knowledge.clone();
        let reports = compare_snapshots(&mut history, self.previous.as_ref(), &snapshot, &self.engine)
            .inspect_err(|err| error!(code = err.error_code(), "comparison failed"))?;
        if history.knowledge != before
            && let Some(repository) = &self.knowledge
            && let Err(err) = repository.save(history.day, &history.knowledge)
        {
            warn!(day = history.day, "failed to persist potion knowledge: {err}");
        }

        self.history = Some(history);
        self.previous = Some(snapshot);
        for report in reports {
            self.publish(report).await;
        }
        Ok(())
    }

    /// History of the run `snapshot` belongs to.
    ///
    /// A new history starts with the first snapshot, on a run start and when
    /// the run number changes. Following that resumes mid-run picks up the
    /// stored potion knowledge.
    fn take_history(&mut self, snapshot: &Snapshot) -> Result<RunHistory> {
        let day = snapshot.stats.day;
        match self.history.take() {
            Some(history) if history.day == day && !is_run_start(self.previous.as_ref(), snapshot) => Ok(history),
            other => {
                if other.is_some_and(|history| history.day != day) {
                    self.previous = None;
                }
                let stored = match &self.knowledge {
                    Some(repository) if snapshot.stats.turns != 0 => repository.load(day)?,
                    _ => None,
                };
                if stored.is_some() {
                    info!(day, "resuming with stored potion knowledge");
                }
                Ok(RunHistory::new(snapshot, stored))
            }
        }
    }

    async fn publish(&self, report: Report) {
        if self.report_tx.send(report).await.is_err() {
            debug!("report receiver dropped");
        }
    }
}
