//! Batch Use Case
//!
//! Projects run strictly one at a time, in config order. Several projects may
//! target the same host, nginx root or systemd directory, and those writes
//! are not atomic. A failing project is recorded and the run moves on.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::domain::entities::BatchConfig;
use crate::domain::ports::{BatchEvent, BatchEventSink};
use crate::error::DotshipResult;

use super::result::{BatchOutcome, BatchReport};

/// Publishes a single project (resolve + deploy).
pub trait ProjectPublisher {
    fn publish(&self, project: &Path) -> DotshipResult<()>;
}

impl<F> ProjectPublisher for F
where
    F: Fn(&Path) -> DotshipResult<()>,
{
    fn publish(&self, project: &Path) -> DotshipResult<()> {
        self(project)
    }
}

/// Batch use case - runs the publisher for every enabled project
pub struct BatchUseCase<P: ProjectPublisher> {
    publisher: P,
}

impl<P: ProjectPublisher> BatchUseCase<P> {
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    pub fn run(
        &self,
        config: &BatchConfig,
        config_path: &Path,
        events: &dyn BatchEventSink,
    ) -> BatchReport {
        let projects: Vec<PathBuf> = config
            .enabled_projects()
            .map(|p| config.resolve_path(p))
            .collect();
        let total = projects.len();
        let mut report = BatchReport {
            config: config_path.to_path_buf(),
            skipped: config.projects.len() - total,
            outcomes: Vec::with_capacity(total),
        };

        info!(config = %config_path.display(), enabled = total, skipped = report.skipped, "batch started");
        events.on_event(BatchEvent::Started {
            config: config_path.to_path_buf(),
            enabled: total,
            skipped: report.skipped,
        });

        for (i, path) in projects.into_iter().enumerate() {
            let index = i + 1;
            events.on_event(BatchEvent::ProjectStarted {
                index,
                total,
                path: path.clone(),
            });

            match self.publisher.publish(&path) {
                Ok(()) => {
                    info!(project = %path.display(), "project published");
                    events.on_event(BatchEvent::ProjectSucceeded {
                        index,
                        path: path.clone(),
                    });
                    report.outcomes.push(BatchOutcome { path, error: None });
                }
                Err(e) => {
                    let message = e.to_string();
                    error!(project = %path.display(), error = %message, "project failed");
                    events.on_event(BatchEvent::ProjectFailed {
                        index,
                        path: path.clone(),
                        error: message.clone(),
                    });
                    report.outcomes.push(BatchOutcome {
                        path,
                        error: Some(message),
                    });
                }
            }
        }

        events.on_event(BatchEvent::Completed {
            succeeded: report.succeeded(),
            failed: report.failed(),
        });
        report
    }
}
