//! Tests for batch loading and failure isolation.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use super::*;
use crate::domain::entities::{BatchConfig, ProjectRef};
use crate::domain::ports::{BatchEvent, BatchEventSink, NoopEventSink};
use crate::error::{BatchError, DeployError, DotshipError, DotshipResult};

#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<BatchEvent>>,
}

impl BatchEventSink for RecordingSink {
    fn on_event(&self, event: BatchEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn config(entries: &[(&str, bool)]) -> BatchConfig {
    BatchConfig {
        projects: entries
            .iter()
            .map(|(path, enabled)| ProjectRef {
                path: path.to_string(),
                enabled: *enabled,
            })
            .collect(),
        base_directory: PathBuf::from("/repo"),
    }
}

fn fail(project: &Path) -> DotshipError {
    DeployError::BuildFailed {
        step: "dotnet publish".into(),
        output: format!("{} does not compile", project.display()),
    }
    .into()
}

#[test]
fn failure_in_the_middle_does_not_stop_the_batch() {
    let attempted = RefCell::new(Vec::new());
    let publisher = |project: &Path| -> DotshipResult<()> {
        attempted.borrow_mut().push(project.to_path_buf());
        if project.ends_with("B/B.csproj") {
            Err(fail(project))
        } else {
            Ok(())
        }
    };
    let cfg = config(&[("A/A.csproj", true), ("B/B.csproj", true), ("C/C.csproj", true)]);

    let report = BatchUseCase::new(publisher).run(&cfg, Path::new("/repo/dotship-solution.json"), &NoopEventSink);

    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(attempted.borrow().len(), 3);
    assert_eq!(attempted.borrow()[2], PathBuf::from("/repo/C/C.csproj"));

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, &PathBuf::from("/repo/B/B.csproj"));
    assert!(failures[0].1.contains("does not compile"));
}

#[test]
fn disabled_projects_are_never_attempted() {
    let attempted = RefCell::new(Vec::new());
    let publisher = |project: &Path| -> DotshipResult<()> {
        attempted.borrow_mut().push(project.to_path_buf());
        Ok(())
    };
    let cfg = config(&[("A/A.csproj", true), ("/abs/B.csproj", true), ("C/C.csproj", false)]);
    let sink = RecordingSink::default();

    let report = BatchUseCase::new(publisher).run(&cfg, Path::new("/repo/dotship-solution.json"), &sink);

    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        *attempted.borrow(),
        vec![PathBuf::from("/repo/A/A.csproj"), PathBuf::from("/abs/B.csproj")]
    );

    let events = sink.events.borrow();
    assert!(matches!(events[0], BatchEvent::Started { enabled: 2, skipped: 1, .. }));
    assert!(matches!(events[1], BatchEvent::ProjectStarted { index: 1, total: 2, .. }));
    assert!(matches!(
        events.last(),
        Some(BatchEvent::Completed { succeeded: 2, failed: 0 })
    ));
}

#[test]
fn missing_config_names_the_init_command() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_batch_config(&dir.path().join("dotship-solution.json")).unwrap_err();
    assert!(matches!(err, BatchError::ConfigNotFound { .. }));
    assert!(err.to_string().contains("dotship init-batch"));
}

#[test]
fn config_without_enabled_projects_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dotship-solution.json");

    fs::write(&path, r#"{ "projects": [] }"#).unwrap();
    assert!(matches!(
        load_batch_config(&path),
        Err(BatchError::NoProjects { .. })
    ));

    fs::write(&path, r#"{ "projects": [{ "path": "A.csproj", "enabled": false }] }"#).unwrap();
    assert!(matches!(
        load_batch_config(&path),
        Err(BatchError::NoEnabledProjects { .. })
    ));

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        load_batch_config(&path),
        Err(BatchError::Parse { .. })
    ));
}

#[test]
fn loaded_config_resolves_paths_against_its_folder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dotship-solution.json");
    fs::write(
        &path,
        r#"{ "projects": [{ "path": "src/Api/Api.csproj", "enabled": true }] }"#,
    )
    .unwrap();

    let cfg = load_batch_config(&path).unwrap();
    assert_eq!(cfg.base_directory, dir.path());
    assert_eq!(
        cfg.resolve_path(&cfg.projects[0]),
        dir.path().join("src/Api/Api.csproj")
    );
}

#[test]
fn batch_path_selection() {
    let cwd = Path::new("/work");
    assert_eq!(
        batch_config_path(None, None, cwd),
        PathBuf::from("/work/dotship-solution.json")
    );
    assert_eq!(
        batch_config_path(None, Some(Path::new("sln")), cwd),
        PathBuf::from("/work/sln/dotship-solution.json")
    );
    assert_eq!(
        batch_config_path(Some(Path::new("/etc/batch.json")), Some(Path::new("sln")), cwd),
        PathBuf::from("/etc/batch.json")
    );
}
