//! # Discover Command Integration Tests / 发现命令集成测试
//!
//! These tests run the `matrix-splitter discover` binary against listings
//! written into temporary directories and check the hand-off files.
//!
//! 这些测试针对写入临时目录的测试列表运行 `matrix-splitter discover`，并检查交接文件。

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

mod common;
use common::*;

fn discover_cmd(workspace: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("matrix-splitter").unwrap();
    cmd.current_dir(workspace.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .arg("--lang")
        .arg("en")
        .arg("discover");
    cmd
}

/// A listing without banners is split by class.
/// 没有横幅的列表按类拆分。
#[test]
fn test_class_mode_list_file() {
    let workspace = temp_workspace();
    let listing = write_listing(&workspace, "listing.txt", SCENARIO_LISTING);
    let out = workspace.path().join("out");

    discover_cmd(&workspace)
        .arg("--project-name")
        .arg("Org.Foo.Tests")
        .arg("--listing")
        .arg(&listing)
        .arg("--output-dir")
        .arg(&out)
        .arg("--test-class-names-prefix")
        .arg("Org.Foo")
        .assert()
        .success()
        .stdout(predicate::str::contains("class mode"));

    let list = fs::read_to_string(out.join("Org.Foo.Tests.tests.list")).unwrap();
    assert_eq!(list, "class:Org.Foo.ClassA\nclass:Org.Foo.ClassB\n");
}

/// Banner labels select collection mode; skipped labels get no job.
/// 横幅标签选择集合模式；被跳过的标签不会生成作业。
#[test]
fn test_collection_mode_from_banners() {
    let workspace = temp_workspace();
    let content = format!("Collection: Smoke\nCollection: Nightly\n{SCENARIO_LISTING}");
    let listing = write_listing(&workspace, "listing.txt", &content);
    let out = workspace.path().join("out");

    discover_cmd(&workspace)
        .arg("--project-name")
        .arg("Org.Foo.Tests")
        .arg("--listing")
        .arg(&listing)
        .arg("--output-dir")
        .arg(&out)
        .arg("--skip")
        .arg("Nightly")
        .assert()
        .success();

    let list = fs::read_to_string(out.join("Org.Foo.Tests.tests.list")).unwrap();
    assert_eq!(list, "collection:Smoke\nuncollected:*\n");
}

/// Skip labels from the config file and the command line are combined.
/// 配置文件与命令行中的跳过标签会合并。
#[test]
fn test_skip_labels_from_config() {
    let workspace = temp_workspace();
    fs::write(
        workspace.path().join("Splitter.toml"),
        "skip_labels = [\"Smoke\"]\n",
    )
    .unwrap();
    let content = format!("Collection: Smoke\nCollection: Nightly\n{SCENARIO_LISTING}");
    let listing = write_listing(&workspace, "listing.txt", &content);
    let out = workspace.path().join("out");

    discover_cmd(&workspace)
        .arg("--project-name")
        .arg("Org.Foo.Tests")
        .arg("--listing")
        .arg(&listing)
        .arg("--output-dir")
        .arg(&out)
        .arg("--skip")
        .arg("Nightly")
        .arg("--test-class-names-prefix")
        .arg("Org.Foo")
        .assert()
        .success();

    let list = fs::read_to_string(out.join("Org.Foo.Tests.tests.list")).unwrap();
    assert_eq!(list, "class:Org.Foo.ClassA\nclass:Org.Foo.ClassB\n");
}

/// Class mode with zero classes fails before anything is written.
/// 类模式下没有任何类时，在写入任何文件之前失败。
#[test]
fn test_zero_classes_writes_nothing() {
    let workspace = temp_workspace();
    let listing = write_listing(&workspace, "listing.txt", "Something.Else.Test\n");
    let out = workspace.path().join("out");

    discover_cmd(&workspace)
        .arg("--project-name")
        .arg("Org.Foo.Tests")
        .arg("--listing")
        .arg(&listing)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no test classes matching prefix"));

    assert!(!out.join("Org.Foo.Tests.tests.list").exists());
    assert!(!out.join("Org.Foo.Tests.tests.metadata.json").exists());
}

#[test]
fn test_missing_listing_fails() {
    let workspace = temp_workspace();
    let out = workspace.path().join("out");

    discover_cmd(&workspace)
        .arg("--project-name")
        .arg("Org.Foo.Tests")
        .arg("--listing")
        .arg(workspace.path().join("absent.txt"))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

/// The input metadata is forwarded with unknown keys intact.
/// 输入元数据会被转发，未知键保持不变。
#[test]
fn test_metadata_is_forwarded() {
    let workspace = temp_workspace();
    let listing = write_listing(&workspace, "listing.txt", SCENARIO_LISTING);
    let metadata = workspace.path().join("input.json");
    fs::write(
        &metadata,
        r#"{"testClassNamesPrefix": "Org.Foo", "testSessionTimeout": "30m", "owner": "team-a"}"#,
    )
    .unwrap();
    let out = workspace.path().join("out");

    discover_cmd(&workspace)
        .arg("--project-name")
        .arg("Org.Foo.Tests")
        .arg("--listing")
        .arg(&listing)
        .arg("--output-dir")
        .arg(&out)
        .arg("--metadata")
        .arg(&metadata)
        .assert()
        .success();

    let written = read_json(&out.join("Org.Foo.Tests.tests.metadata.json"));
    assert_eq!(written["projectName"], "Org.Foo.Tests");
    assert_eq!(written["testClassNamesPrefix"], "Org.Foo");
    assert_eq!(written["testSessionTimeout"], "30m");
    assert_eq!(written["owner"], "team-a");
}

/// A configured extractor without an existing binary falls back to banners.
/// 配置了提取工具但测试程序不存在时回退到横幅。
#[test]
fn test_extractor_without_binary_uses_banners() {
    let workspace = temp_workspace();
    let content = format!("Collection: Smoke\n{SCENARIO_LISTING}");
    let listing = write_listing(&workspace, "listing.txt", &content);
    let out = workspace.path().join("out");

    discover_cmd(&workspace)
        .arg("--project-name")
        .arg("Org.Foo.Tests")
        .arg("--listing")
        .arg(&listing)
        .arg("--output-dir")
        .arg(&out)
        .arg("--extractor")
        .arg("extract-partitions {binary}")
        .arg("--test-binary")
        .arg(workspace.path().join("missing.dll"))
        .assert()
        .success()
        .stdout(predicate::str::contains("inline-banner"));

    let list = fs::read_to_string(out.join("Org.Foo.Tests.tests.list")).unwrap();
    assert_eq!(list, "collection:Smoke\nuncollected:*\n");
}
