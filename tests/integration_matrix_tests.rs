//! # Matrix Command Integration Tests / 矩阵命令集成测试
//!
//! These tests run `matrix-splitter matrix` over hand-written list and
//! metadata files, and the full discover-then-matrix pipeline.
//!
//! 这些测试针对手写的列表与元数据文件运行 `matrix-splitter matrix`，
//! 并覆盖完整的“先发现后构建矩阵”流程。

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::process::Command;

mod common;
use common::*;

fn splitter(workspace: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("matrix-splitter").unwrap();
    cmd.current_dir(workspace.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .arg("--lang")
        .arg("en");
    cmd
}

#[test]
fn test_empty_lists_dir_gives_empty_matrix() {
    let workspace = temp_workspace();
    let lists = lists_dir(&workspace);

    splitter(&workspace)
        .arg("matrix")
        .arg("--lists-dir")
        .arg(&lists)
        .arg("--output-dir")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No list files found"));

    let matrix = read_json(&workspace.path().join("combined-tests-matrix.json"));
    assert_eq!(matrix, json!({ "include": [] }));
}

#[test]
fn test_missing_lists_dir_fails() {
    let workspace = temp_workspace();

    splitter(&workspace)
        .arg("matrix")
        .arg("--lists-dir")
        .arg(workspace.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("test lists directory not found"));

    assert!(!workspace.path().join("combined-tests-matrix.json").exists());
}

#[test]
fn test_malformed_list_file_fails() {
    let workspace = temp_workspace();
    let lists = lists_dir(&workspace);
    write_list_file(&lists, "Org.Foo.Tests", "class:Org.Foo.A\ncollection:Smoke\n");

    splitter(&workspace)
        .arg("matrix")
        .arg("--lists-dir")
        .arg(&lists)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed test list"));
}

/// A collection project whose metadata raises the session timeout: both the
/// label job and the catch-all job carry it.
///
/// 元数据提高了会话超时的集合项目：标签作业与兜底作业都带有该值。
#[test]
fn test_collection_project_with_metadata() {
    let workspace = temp_workspace();
    let lists = lists_dir(&workspace);
    write_list_file(&lists, "Org.Foo.Tests", "collection:Smoke\nuncollected:*\n");
    write_metadata(&lists, "Org.Foo.Tests", r#"{"testSessionTimeout": "30m"}"#);

    splitter(&workspace)
        .arg("matrix")
        .arg("--lists-dir")
        .arg(&lists)
        .arg("--output-dir")
        .arg(workspace.path())
        .assert()
        .success();

    let matrix = read_json(&workspace.path().join("combined-tests-matrix.json"));
    let include = matrix["include"].as_array().unwrap();
    assert_eq!(include.len(), 2);

    assert_eq!(include[0]["type"], "collection");
    assert_eq!(include[0]["name"], "Smoke");
    assert_eq!(include[0]["extraTestArgs"], "--filter-trait \"Partition=Smoke\"");
    assert_eq!(include[0]["testSessionTimeout"], "30m");

    assert_eq!(include[1]["type"], "uncollected");
    assert_eq!(include[1]["extraTestArgs"], "--filter-not-trait \"Partition=Smoke\"");
    assert_eq!(include[1]["testSessionTimeout"], "30m");
    assert!(include[1].get("testHangTimeout").is_none());
}

/// A malformed metadata file degrades to defaults instead of failing.
/// 格式错误的元数据文件降级为默认值，而不是失败。
#[test]
fn test_malformed_metadata_uses_defaults() {
    let workspace = temp_workspace();
    let lists = lists_dir(&workspace);
    write_list_file(&lists, "Org.Foo.Tests", "class:Org.Foo.Tests.ClassA\n");
    write_metadata(&lists, "Org.Foo.Tests", "{ broken");

    splitter(&workspace)
        .arg("matrix")
        .arg("--lists-dir")
        .arg(&lists)
        .arg("--output-dir")
        .arg(workspace.path())
        .assert()
        .success();

    let matrix = read_json(&workspace.path().join("combined-tests-matrix.json"));
    assert_eq!(
        matrix,
        json!({
            "include": [{
                "type": "class",
                "projectName": "Org.Foo.Tests",
                "name": "ClassA",
                "shortname": "ClassA",
                "fullClassName": "Org.Foo.Tests.ClassA",
                "testProjectPath": "tests/Org.Foo.Tests/Org.Foo.Tests.csproj",
                "extraTestArgs": "--filter-class \"Org.Foo.Tests.ClassA\""
            }]
        })
    );
}

/// The JSON description of regular projects wins over the legacy name list.
/// 常规项目的 JSON 描述优先于旧式名称列表。
#[test]
fn test_regular_projects_json_wins_over_legacy_list() {
    let workspace = temp_workspace();
    let lists = lists_dir(&workspace);
    let json_path = workspace.path().join("regular.json");
    fs::write(
        &json_path,
        r#"[{"projectName": "Org.Api.Tests", "supportedOSes": ["linux"]}]"#,
    )
    .unwrap();
    let legacy_path = workspace.path().join("regular.txt");
    fs::write(&legacy_path, "Billing\n").unwrap();

    splitter(&workspace)
        .arg("matrix")
        .arg("--lists-dir")
        .arg(&lists)
        .arg("--output-dir")
        .arg(workspace.path())
        .arg("--regular-projects-json")
        .arg(&json_path)
        .arg("--regular-projects")
        .arg(&legacy_path)
        .assert()
        .success();

    let matrix = read_json(&workspace.path().join("combined-tests-matrix.json"));
    assert_eq!(
        matrix["include"],
        json!([{
            "type": "regular",
            "projectName": "Org.Api.Tests",
            "name": "Org.Api",
            "shortname": "Org.Api",
            "testProjectPath": "tests/Org.Api.Tests/Org.Api.Tests.csproj",
            "supportedOSes": ["linux"]
        }])
    );
}

/// Without the JSON file the legacy list is used with built-in defaults.
/// 没有 JSON 文件时使用旧式列表和内置默认值。
#[test]
fn test_legacy_regular_projects() {
    let workspace = temp_workspace();
    let lists = lists_dir(&workspace);
    fs::write(workspace.path().join("Splitter.toml"), "org_prefix = \"Acme.\"\n").unwrap();
    let legacy_path = workspace.path().join("regular.txt");
    fs::write(&legacy_path, "Billing;Search\n").unwrap();

    splitter(&workspace)
        .arg("matrix")
        .arg("--lists-dir")
        .arg(&lists)
        .arg("--output-dir")
        .arg(workspace.path())
        .arg("--regular-projects-json")
        .arg(workspace.path().join("absent.json"))
        .arg("--regular-projects")
        .arg(&legacy_path)
        .assert()
        .success();

    let matrix = read_json(&workspace.path().join("combined-tests-matrix.json"));
    let include = matrix["include"].as_array().unwrap();
    assert_eq!(include.len(), 2);
    assert_eq!(include[0]["projectName"], "Acme.Billing.Tests");
    assert_eq!(include[0]["shortname"], "Billing");
    assert_eq!(include[1]["projectName"], "Acme.Search.Tests");
}

/// Discovery output feeds straight into the matrix command.
/// 发现步骤的输出直接作为矩阵命令的输入。
#[test]
fn test_discover_then_matrix() {
    let workspace = temp_workspace();
    let content = format!("Collection: Smoke\nCollection: Nightly\n{SCENARIO_LISTING}");
    let listing = write_listing(&workspace, "listing.txt", &content);
    let lists = workspace.path().join("lists");
    let html = workspace.path().join("report.html");

    splitter(&workspace)
        .arg("discover")
        .arg("--project-name")
        .arg("Org.Foo.Tests")
        .arg("--listing")
        .arg(&listing)
        .arg("--output-dir")
        .arg(&lists)
        .arg("--skip")
        .arg("Nightly")
        .assert()
        .success();

    splitter(&workspace)
        .arg("matrix")
        .arg("--lists-dir")
        .arg(&lists)
        .arg("--output-dir")
        .arg(workspace.path())
        .arg("--html")
        .arg(&html)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 job(s)"));

    let matrix = read_json(&workspace.path().join("combined-tests-matrix.json"));
    let names: Vec<&str> = matrix["include"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Smoke", "uncollected"]);

    let report = fs::read_to_string(&html).unwrap();
    assert!(report.contains("Org.Foo-Smoke"));
}
