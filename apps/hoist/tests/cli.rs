use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const CSPROJ: &str = r#"<Project Sdk="Microsoft.NET.Sdk">

  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>

</Project>
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "App/App.csproj", CSPROJ);
    write(
        root,
        "App/Program.cs",
        "using System;\nusing System.Linq;\n\nnamespace App;\n\nclass Program {}\n",
    );
    write(
        root,
        "App/Models/User.cs",
        "using System;\n\nnamespace App.Models;\n\nclass User {}\n",
    );
    dir
}

fn hoist() -> Command {
    let mut cmd = Command::cargo_bin("hoist").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_FORMAT");
    cmd
}

#[test]
fn test_yes_consolidates_project() {
    let dir = project();
    let root = dir.path();

    hoist()
        .arg(root.join("App/App.csproj"))
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("moved 2 imports from 2 files"));

    assert_eq!(
        fs::read_to_string(root.join("App/GlobalUsings.cs")).unwrap(),
        "global using System;\nglobal using System.Linq;\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("App/Program.cs")).unwrap(),
        "namespace App;\n\nclass Program {}\n"
    );
    assert!(fs::read_to_string(root.join("App/App.csproj"))
        .unwrap()
        .contains("GlobalUsings.cs"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = project();
    let root = dir.path();
    let before = fs::read_to_string(root.join("App/Program.cs")).unwrap();

    hoist()
        .arg(root.join("App"))
        .arg("--dry-run")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("dry run"));

    assert!(!root.join("App/GlobalUsings.cs").exists());
    assert_eq!(fs::read_to_string(root.join("App/Program.cs")).unwrap(), before);
}

#[test]
fn test_json_report() {
    let dir = project();

    let output = hoist()
        .arg(dir.path().join("App"))
        .args(["--no-preview", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "project");
    assert_eq!(report["result"]["outcome"], "committed");
    assert_eq!(report["result"]["moved_imports"], 2);
    assert_eq!(report["result"]["files_rewritten"], 2);
}

#[test]
fn test_non_interactive_preview_is_declined() {
    let dir = project();
    let root = dir.path();

    hoist()
        .arg(root.join("App"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("consolidation cancelled"))
        .stderr(predicate::str::contains("not a terminal").not());

    assert!(!root.join("App/GlobalUsings.cs").exists());
}

#[test]
fn test_nothing_to_move_exits_zero() {
    let dir = tempdir().unwrap();
    write(dir.path(), "Lib/Lib.csproj", CSPROJ);
    write(dir.path(), "Lib/Thing.cs", "namespace Lib;\nclass Thing {}\n");

    hoist()
        .arg(dir.path().join("Lib"))
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to move"));
}

#[test]
fn test_single_file_entry_only_touches_that_file() {
    let dir = project();
    let root = dir.path();

    hoist()
        .arg(root.join("App/Models/User.cs"))
        .arg("--yes")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.join("App/GlobalUsings.cs")).unwrap(),
        "global using System;\n"
    );
    assert!(fs::read_to_string(root.join("App/Program.cs"))
        .unwrap()
        .starts_with("using System;"));
}

#[test]
fn test_solution_entry() {
    let dir = project();
    let root = dir.path();
    write(
        root,
        "All.slnx",
        "<Solution>\n  <Project Path=\"App/App.csproj\" />\n  <Project Path=\"Gone/Gone.csproj\" />\n</Solution>\n",
    );

    let output = hoist()
        .arg(root.join("All.slnx"))
        .args(["--no-preview", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "solution");
    assert_eq!(report["projects"].as_array().unwrap().len(), 1);
    assert!(root.join("App/GlobalUsings.cs").exists());
}

#[test]
fn test_missing_path_fails() {
    let dir = tempdir().unwrap();

    hoist()
        .arg(dir.path().join("Nope.csproj"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_unsupported_entry_fails() {
    let dir = tempdir().unwrap();
    write(dir.path(), "README.md", "# readme\n");

    hoist()
        .arg(dir.path().join("README.md"))
        .args(["--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"E1007\""));
}

#[cfg(unix)]
#[test]
fn test_failed_validation_rolls_back() {
    let dir = project();
    let root = dir.path();
    let before = fs::read_to_string(root.join("App/Program.cs")).unwrap();

    hoist()
        .arg(root.join("App"))
        .args(["--yes", "--validate", "--validate-command", "echo 'Build FAILED'; exit 1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("rolled back"));

    assert!(!root.join("App/GlobalUsings.cs").exists());
    assert_eq!(fs::read_to_string(root.join("App/Program.cs")).unwrap(), before);
}
