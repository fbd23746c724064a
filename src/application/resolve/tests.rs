//! Tests for project resolution against on-disk fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use super::*;
use crate::domain::entities::{DeployIntent, DeployTarget};
use crate::domain::value_objects::{BuildConfiguration, OutputKind};
use crate::error::ResolveError;
use crate::infrastructure::GlobalConfigStore;

const WEB: &str = "Microsoft.NET.Sdk.Web";
const LIB: &str = "Microsoft.NET.Sdk";

const LINUX_SETTINGS: &str = r#"{
  "Dotship": {
    "Linux": {
      "Host": "deploy@web1",
      "Nginx": { "HostNames": ["shop.example.com"] }
    }
  }
}"#;

fn csproj(sdk: &str, properties: &str) -> String {
    format!(
        "<Project Sdk=\"{}\">\n  <PropertyGroup>\n    <TargetFramework>net8.0</TargetFramework>\n{}  </PropertyGroup>\n</Project>\n",
        sdk, properties
    )
}

fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

fn options(dir: &Path) -> ResolveOptions {
    ResolveOptions::new(dir)
        .with_temp_root(dir.join("tmp"))
        .with_global_settings(None)
        .with_user_secrets_root(Some(dir.join("secrets")))
        .with_home(Some(dir.join("home")))
}

fn resolver() -> ResolveUseCase {
    ResolveUseCase::new(GlobalConfigStore::default())
}

#[test]
fn scanning_requires_exactly_one_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let err = resolver().resolve(&options(dir.path())).unwrap_err();
    assert!(matches!(err, ResolveError::NoProjectFound { .. }));
    assert_eq!(err.exit_code(), 2);

    write(&dir.path().join("A.csproj"), &csproj(LIB, "    <Version>1.0.0</Version>\n"));
    write(&dir.path().join("B.csproj"), &csproj(LIB, "    <Version>1.0.0</Version>\n"));
    let err = resolver().resolve(&options(dir.path())).unwrap_err();
    assert!(matches!(err, ResolveError::AmbiguousProjects { count: 2, .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn explicit_path_must_exist_and_be_a_csproj() {
    let dir = tempfile::tempdir().unwrap();
    let err = resolver()
        .resolve(&options(dir.path()).with_project(Some("Missing.csproj".into())))
        .unwrap_err();
    assert_eq!(err.exit_code(), 4);

    write(&dir.path().join("App.sln"), "");
    let err = resolver()
        .resolve(&options(dir.path()).with_project(Some("App.sln".into())))
        .unwrap_err();
    assert!(matches!(err, ResolveError::WrongExtension { .. }));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn release_library_resolves_without_settings() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Acme.Core.csproj"),
        &csproj(LIB, "    <Version>2.1.0</Version>\n"),
    );

    let spec = resolver().resolve(&options(dir.path())).unwrap();

    assert_eq!(spec.project_name(), "Acme.Core");
    assert_eq!(spec.output_kind(), OutputKind::Library);
    assert_eq!(spec.build_configuration, BuildConfiguration::Release);
    assert_eq!(
        spec.work.output_path,
        dir.path().join("tmp/dotship/Acme.Core/bin/Release")
    );
    assert!(spec.work.temp_project_folder.is_dir());
    assert!(spec.target.nuget().is_some());
}

#[test]
fn prerelease_version_selects_debug() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Acme.Core.csproj"),
        &csproj(LIB, "    <Version>2.2.0-beta.3</Version>\n"),
    );

    let spec = resolver().resolve(&options(dir.path())).unwrap();

    assert!(spec.is_prerelease());
    assert_eq!(spec.build_configuration, BuildConfiguration::Debug);
    assert!(spec.work.output_path.ends_with("bin/Debug"));
}

#[test]
fn version_is_taken_from_referenced_project_one_level_deep() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Core/Core.csproj"),
        &csproj(LIB, "    <Version>3.4.5</Version>\n"),
    );
    write(
        &dir.path().join("App/App.csproj"),
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <ProjectReference Include="..\Core\Core.csproj" />
  </ItemGroup>
  <Target Name="SetVersionFromCore" BeforeTargets="Build" />
</Project>
"#,
    );

    let spec = resolver()
        .resolve(&options(dir.path()).with_project(Some("App/App.csproj".into())))
        .unwrap();
    assert_eq!(spec.version.as_str(), "3.4.5");
}

#[test]
fn reference_without_version_is_not_chased_further() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("Base/Base.csproj"), &csproj(LIB, "    <Version>9.9.9</Version>\n"));
    write(
        &dir.path().join("Core/Core.csproj"),
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup><ProjectReference Include="../Base/Base.csproj" /></ItemGroup>
  <Target Name="SetVersionFromBase" />
</Project>"#,
    );
    write(
        &dir.path().join("App/App.csproj"),
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup><ProjectReference Include="../Core/Core.csproj" /></ItemGroup>
  <Target Name="SetVersionFromCore" />
</Project>"#,
    );

    let err = resolver()
        .resolve(&options(dir.path()).with_project(Some("App/App.csproj".into())))
        .unwrap_err();
    assert!(matches!(err, ResolveError::VersionUnresolvable { .. }));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn missing_version_and_target_is_unresolvable() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("App.csproj"), &csproj(LIB, ""));
    let err = resolver().resolve(&options(dir.path())).unwrap_err();
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn sdk_errors_have_distinct_codes() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("App.csproj"),
        "<Project><PropertyGroup><Version>1.0.0</Version></PropertyGroup></Project>",
    );
    assert_eq!(resolver().resolve(&options(dir.path())).unwrap_err().exit_code(), 7);

    write(
        &dir.path().join("App.csproj"),
        &csproj("Microsoft.NET.Sdk.Worker", "    <Version>1.0.0</Version>\n"),
    );
    let err = resolver().resolve(&options(dir.path())).unwrap_err();
    assert!(matches!(err, ResolveError::UnknownSdk { .. }));
    assert_eq!(err.exit_code(), 8);
}

#[test]
fn web_project_without_section_is_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Shop.Api.csproj"),
        &csproj(WEB, "    <Version>1.0.0</Version>\n"),
    );
    let err = resolver().resolve(&options(dir.path())).unwrap_err();
    assert!(matches!(err, ResolveError::MissingConfigSection { .. }));
    assert_eq!(err.exit_code(), 9);
}

#[test]
fn web_project_binds_linux_target_from_appsettings() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Shop.Api.csproj"),
        &csproj(WEB, "    <Version>1.0.0</Version>\n"),
    );
    write(&dir.path().join("appsettings.json"), LINUX_SETTINGS);

    let intent = DeployIntent {
        migrate: true,
        ..DeployIntent::default()
    };
    let spec = resolver()
        .resolve(&options(dir.path()).with_intent(intent))
        .unwrap();

    let DeployTarget::Service(linux) = &spec.target else {
        panic!("expected a service target, got {:?}", spec.target);
    };
    assert_eq!(linux.host, "deploy@web1");
    assert_eq!(linux.service_name, "shop.api");
    assert_eq!(linux.nginx.host_names, vec!["shop.example.com".to_string()]);
    assert!(spec.intent.migrate);
}

#[test]
fn later_layers_override_earlier_ones() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Shop.Api.csproj"),
        &csproj(
            WEB,
            "    <Version>1.0.0</Version>\n    <UserSecretsId>shop-secrets</UserSecretsId>\n",
        ),
    );
    let global = write(
        &dir.path().join("home/.dotship/dotship.json"),
        r#"{ "Dotship": { "Linux": { "Host": "global@host", "Port": 6000, "ServiceUser": "svc" } } }"#,
    );
    write(&dir.path().join("appsettings.json"), LINUX_SETTINGS);
    write(
        &dir.path().join("dotship.json"),
        r#"{ "dotship": { "linux": { "port": "7000" } } }"#,
    );
    write(
        &dir.path().join("secrets/shop-secrets/secrets.json"),
        r#"{ "Dotship:Linux:Host": "secret@host" }"#,
    );

    let spec = resolver()
        .resolve(&options(dir.path()).with_global_settings(Some(global)))
        .unwrap();

    let linux = spec.target.linux().unwrap();
    assert_eq!(linux.host, "secret@host");
    assert_eq!(linux.port, 7000);
    assert_eq!(linux.service_user, "svc");
}

#[test]
fn user_secrets_host_names_bind_from_indexed_keys() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Shop.Api.csproj"),
        &csproj(
            WEB,
            "    <Version>1.0.0</Version>\n    <UserSecretsId>shop-secrets</UserSecretsId>\n",
        ),
    );
    write(
        &dir.path().join("appsettings.json"),
        r#"{ "Dotship": { "Linux": { "Host": "deploy@web1" } } }"#,
    );
    write(
        &dir.path().join("secrets/shop-secrets/secrets.json"),
        r#"{
  "Dotship:Linux:Nginx:HostNames:0": "shop.example.com",
  "Dotship:Linux:Nginx:HostNames:1": "www.shop.example.com"
}"#,
    );

    let spec = resolver().resolve(&options(dir.path())).unwrap();

    let linux = spec.target.linux().unwrap();
    assert_eq!(
        linux.nginx.host_names,
        vec![
            "shop.example.com".to_string(),
            "www.shop.example.com".to_string()
        ]
    );
}

#[test]
fn front_end_flag_selects_front_end_target() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Shop.Web.csproj"),
        &csproj(WEB, "    <Version>1.0.0</Version>\n"),
    );
    write(
        &dir.path().join("appsettings.json"),
        r#"{ "Dotship": { "Linux": { "Host": "deploy@web1", "FrontEnd": true } } }"#,
    );

    let spec = resolver().resolve(&options(dir.path())).unwrap();
    assert_eq!(spec.output_kind(), OutputKind::FrontEnd);
}

#[test]
fn configured_temp_folder_is_the_work_folder() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("Acme.Core.csproj"),
        &csproj(LIB, "    <Version>1.0.0</Version>\n"),
    );
    write(
        &dir.path().join("dotship.json"),
        r#"{ "Dotship": { "TempFolder": "~/build" } }"#,
    );

    let spec = resolver().resolve(&options(dir.path())).unwrap();
    assert_eq!(spec.work.temp_work_folder, dir.path().join("home/build"));
    assert!(spec.work.temp_project_folder.is_dir());
}
