use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("compat-figures").unwrap()
}

fn archive(body: &str) -> TempDir {
    let dir = TempDir::new().expect("temp archive");
    fs::write(dir.path().join("logfile.json"), body).unwrap();
    dir
}

#[test]
fn list_shows_every_figure() {
    cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("ecmascript-versions"))
        .stdout(contains("compatibility-analysis"))
        .stdout(contains("transparency-issues"))
        .stdout(contains("archive required"));
}

#[test]
fn check_reports_a_consistent_archive() {
    let dir = archive(
        r#"{"syntaxReport": [["ES5", 538], ["ES2015", 1941]],
            "toolReport": [{"toolName": "JEST", "accessible": 2479, "transparent": 45, "nonTransparent": 218}]}"#,
    );
    cmd()
        .arg("check")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("2 versions over 2479 sites"))
        .stdout(contains("JEST: 45 transparent / 218 non-transparent / 2216 N/A"))
        .stdout(contains("Archive is consistent"));
}

#[test]
fn check_fails_on_inconsistent_transparency() {
    let dir = archive(
        r#"{"syntaxReport": [["ES5", 1]],
            "toolReport": [{"toolName": "GIFC", "accessible": 5, "transparent": 4, "nonTransparent": 4}]}"#,
    );
    cmd()
        .arg("check")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("exceeds accessible"));
}

#[test]
fn check_fails_without_logfile() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg("check")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("logfile.json"));
}

#[test]
fn check_fails_on_missing_section() {
    let dir = archive(r#"{"syntaxReport": [["ES5", 1]]}"#);
    cmd()
        .arg("check")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("toolReport"));
}

#[test]
fn render_with_out_writes_exactly_that_path() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("figs").join("versions.png");
    let summary = out.path().join("versions.json");
    cmd()
        .args(["render", "ecmascript-versions", "--out"])
        .arg(&target)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(contains("saved to"))
        .stdout(contains("Opened").not());

    let bytes = fs::read(&target).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert!(fs::read_to_string(&summary).unwrap().contains("\"figure\": \"ecmascript-versions\""));
}

#[test]
fn render_from_archive_with_out() {
    let dir = archive(
        r#"{"syntaxReport": [["ES5", 538], ["ES2015", 1941]],
            "toolReport": [{"toolName": "JEST", "accessible": 2479, "transparent": 45, "nonTransparent": 218,
                            "transparencyIssues": {"TypeError": 7}}]}"#,
    );
    let target = dir.path().join("issues.png");
    cmd()
        .args(["render", "transparency-issues"])
        .arg(dir.path())
        .arg("--out")
        .arg(&target)
        .assert()
        .success();
    assert!(target.is_file());
}

#[test]
fn render_rejects_huge_font_size() {
    cmd()
        .args(["render", "version-cdf", "--out", "never.png", "--font-size", "1073741824"])
        .assert()
        .failure()
        .stderr(contains("does not fit"));
}

#[test]
fn render_transparency_issues_needs_archive() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("issues.png");
    cmd()
        .args(["render", "transparency-issues", "--out"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(contains("transparency-issues"));
    assert!(!target.exists());
}

#[test]
fn render_rejects_unknown_figure() {
    cmd().args(["render", "fig42"]).assert().failure();
}

#[test]
fn render_rejects_tiny_images() {
    cmd()
        .args(["render", "version-cdf", "--out", "never.png", "--width", "10"])
        .assert()
        .failure()
        .stderr(contains("too small"));
}

#[test]
fn every_command_has_help() {
    for args in [vec![], vec!["render"], vec!["check"], vec!["list"]] {
        cmd().args(args).arg("--help").assert().success();
    }
}
