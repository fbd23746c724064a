//! Resolution failures exit with a distinct code per kind.

mod common;

use common::{csproj, TestEnv, LIBRARY_SDK, WEB_SDK};

#[test]
fn no_project_exits_2() {
    let env = TestEnv::new();

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    assert!(result.stderr.contains("init-batch"), "{}", result.stderr);
}

#[test]
fn several_projects_exit_3() {
    let env = TestEnv::new();
    env.write_project_file("A.csproj", &csproj(Some(LIBRARY_SDK), ""));
    env.write_project_file("B.csproj", &csproj(Some(LIBRARY_SDK), ""));

    let result = env.run(&["publish"]);

    assert_eq!(result.exit_code, 3, "{}", result.combined_output());
    assert!(result.stderr.contains("A.csproj"));
}

#[test]
fn missing_explicit_project_exits_4() {
    let env = TestEnv::new();

    let result = env.run(&["--csproj", "Missing.csproj"]);

    assert_eq!(result.exit_code, 4, "{}", result.combined_output());
    assert!(result.stderr.contains("Missing.csproj"));
}

#[test]
fn wrong_extension_exits_5() {
    let env = TestEnv::new();
    env.write_project_file("notes.txt", "not a project");

    let result = env.run(&["--csproj", "notes.txt"]);

    assert_eq!(result.exit_code, 5, "{}", result.combined_output());
}

#[test]
fn missing_version_exits_6() {
    let env = TestEnv::new();
    env.write_project_file("App.csproj", &csproj(Some(LIBRARY_SDK), ""));

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 6, "{}", result.combined_output());
}

#[test]
fn missing_sdk_exits_7() {
    let env = TestEnv::new();
    env.write_project_file(
        "App.csproj",
        &csproj(None, "    <Version>1.0.0</Version>\n"),
    );

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 7, "{}", result.combined_output());
}

#[test]
fn unknown_sdk_exits_8() {
    let env = TestEnv::new();
    env.write_project_file(
        "App.csproj",
        &csproj(Some("Microsoft.NET.Sdk.Worker"), "    <Version>1.0.0</Version>\n"),
    );

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 8, "{}", result.combined_output());
    assert!(result.stderr.contains("Microsoft.NET.Sdk.Worker"));
}

#[test]
fn service_without_settings_exits_9() {
    let env = TestEnv::new();
    env.write_project_file(
        "Shop.Api.csproj",
        &csproj(Some(WEB_SDK), "    <Version>1.2.0</Version>\n"),
    );

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 9, "{}", result.combined_output());
    assert!(result.stderr.contains("Dotship"), "{}", result.stderr);
}

#[test]
fn csproj_with_solution_is_a_validation_error() {
    let env = TestEnv::new();
    env.write_project_file("App.csproj", &csproj(Some(LIBRARY_SDK), ""));

    let result = env.run(&["--csproj", "App.csproj", "--solution", "."]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stderr.contains("--csproj cannot be combined"));
}
