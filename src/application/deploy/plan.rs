//! Deployment transition table
//!
//! Which steps a spec goes through is decided here, up front, from the
//! output kind and operator intent. Executing a step never changes the plan;
//! a failing step ends the run.

use std::fmt;

use crate::domain::entities::{DeployTarget, DeploymentSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryStep {
    Pack,
    PublishPackage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStep {
    Build,
    Transfer,
    UpdateFrontEnd,
    StopService,
    RotateRelease,
    DeployContent,
    Migrate,
    /// Create or replace the systemd unit
    InstallService,
    ReconcileNginx,
    StartService,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Library(Vec<LibraryStep>),
    Host(Vec<HostStep>),
}

impl LibraryStep {
    pub fn name(&self) -> &'static str {
        match self {
            LibraryStep::Pack => "pack",
            LibraryStep::PublishPackage => "publish package",
        }
    }
}

impl HostStep {
    pub fn name(&self) -> &'static str {
        match self {
            HostStep::Build => "build",
            HostStep::Transfer => "transfer",
            HostStep::UpdateFrontEnd => "update front-end",
            HostStep::StopService => "stop service",
            HostStep::RotateRelease => "rotate release",
            HostStep::DeployContent => "deploy content",
            HostStep::Migrate => "migrate",
            HostStep::InstallService => "install service",
            HostStep::ReconcileNginx => "reconcile nginx",
            HostStep::StartService => "start service",
        }
    }
}

impl fmt::Display for LibraryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for HostStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Plan {
    pub fn step_names(&self) -> Vec<&'static str> {
        match self {
            Plan::Library(steps) => steps.iter().map(LibraryStep::name).collect(),
            Plan::Host(steps) => steps.iter().map(HostStep::name).collect(),
        }
    }
}

/// Build the step sequence for `spec`.
pub fn plan(spec: &DeploymentSpec) -> Plan {
    match &spec.target {
        DeployTarget::Library(_) => Plan::Library(library_plan()),
        DeployTarget::Service(_) | DeployTarget::FrontEnd(_) => Plan::Host(host_plan(spec)),
    }
}

pub fn library_plan() -> Vec<LibraryStep> {
    vec![LibraryStep::Pack, LibraryStep::PublishPackage]
}

/// Steps for a Linux-hosted output.
///
/// The systemd unit is installed before nginx is reconciled and the service
/// is started last, so a first publish creates the unit, the site and the
/// certificate before anything starts serving.
pub fn host_plan(spec: &DeploymentSpec) -> Vec<HostStep> {
    if let DeployTarget::FrontEnd(_) = spec.target {
        return vec![HostStep::Build, HostStep::Transfer, HostStep::UpdateFrontEnd];
    }

    let mut steps = vec![
        HostStep::Build,
        HostStep::Transfer,
        HostStep::StopService,
        HostStep::RotateRelease,
        HostStep::DeployContent,
    ];
    if spec.intent.migrate {
        steps.push(HostStep::Migrate);
    }
    steps.extend([
        HostStep::InstallService,
        HostStep::ReconcileNginx,
        HostStep::StartService,
    ]);
    steps
}
