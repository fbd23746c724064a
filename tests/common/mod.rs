//! Shared helpers for dotship integration tests.

#![allow(dead_code)]

pub mod env;

pub use env::{TestEnv, TestResult};

pub const WEB_SDK: &str = "Microsoft.NET.Sdk.Web";
pub const LIBRARY_SDK: &str = "Microsoft.NET.Sdk";

/// A minimal project file with the given `Sdk` attribute and extra properties.
pub fn csproj(sdk: Option<&str>, properties: &str) -> String {
    let sdk = sdk.map(|s| format!(" Sdk=\"{}\"", s)).unwrap_or_default();
    format!(
        "<Project{}>\n  <PropertyGroup>\n    <TargetFramework>net8.0</TargetFramework>\n{}  </PropertyGroup>\n</Project>\n",
        sdk, properties
    )
}
