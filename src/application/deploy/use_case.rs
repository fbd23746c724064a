//! Deploy Use Case
//!
//! Runs a `DeploymentSpec` through its plan:
//! 1. Library: pack, then publish the package
//! 2. Service / front-end: build, transfer, then reconcile the host
//!
//! Steps run in order and the first failing step ends the run. Library
//! deployments never open a remote session.

use tracing::{debug, info};

use crate::domain::entities::{DeployTarget, DeploymentSpec, LinuxTargetConfig, NuGetConfig};
use crate::domain::ports::{LocalExecutor, RemoteConnector};
use crate::error::DeployResult;

use super::host::{self, HostContext};
use super::library;
use super::plan::{host_plan, library_plan};
use super::result::DeployReport;

/// Deploy use case - parameterized by the local and remote executors
pub struct DeployUseCase<L, C>
where
    L: LocalExecutor,
    C: RemoteConnector,
{
    local: L,
    connector: C,
}

impl<L, C> DeployUseCase<L, C>
where
    L: LocalExecutor,
    C: RemoteConnector,
{
    pub fn new(local: L, connector: C) -> Self {
        Self { local, connector }
    }

    /// Deploy one project.
    pub fn run(&self, spec: &DeploymentSpec) -> DeployResult<DeployReport> {
        let mut report = DeployReport::new(
            spec.project_name(),
            spec.version.as_str(),
            spec.output_kind(),
        );
        info!(
            project = %spec.project_name(),
            version = %spec.version,
            kind = %spec.output_kind(),
            configuration = %spec.build_configuration,
            "deploying"
        );

        match &spec.target {
            DeployTarget::Library(nuget) => self.run_library(spec, nuget, &mut report)?,
            DeployTarget::Service(linux) | DeployTarget::FrontEnd(linux) => {
                self.run_host(spec, linux, &mut report)?
            }
        }

        info!(project = %spec.project_name(), "deployment finished");
        Ok(report)
    }

    fn run_library(
        &self,
        spec: &DeploymentSpec,
        nuget: &NuGetConfig,
        report: &mut DeployReport,
    ) -> DeployResult<()> {
        for step in library_plan() {
            info!(step = %step, "running");
            library::run_step(&self.local, spec, nuget, step, report)?;
            report.completed.push(step.name());
        }
        Ok(())
    }

    fn run_host(
        &self,
        spec: &DeploymentSpec,
        linux: &LinuxTargetConfig,
        report: &mut DeployReport,
    ) -> DeployResult<()> {
        debug!(host = %linux.host, service = %linux.service_name, "connecting");
        let remote = self.connector.connect(linux);
        let ctx = HostContext {
            local: &self.local,
            remote: &remote,
            spec,
            linux,
            timestamp: chrono::Local::now().format("%Y%m%d%H%M%S").to_string(),
        };

        for step in host_plan(spec) {
            info!(step = %step, host = %linux.host, "running");
            host::run_step(&ctx, step, report)?;
            report.completed.push(step.name());
        }
        Ok(())
    }
}
