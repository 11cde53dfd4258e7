use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docfront(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docfront").expect("binary");
    cmd.current_dir(dir)
        .env_remove("DOCFRONT_CONFIG")
        .env_remove("DOCFRONT_LOG");
    cmd
}

fn write_config(dir: &Path, contents: &str) {
    fs::write(dir.join("docfront.toml"), contents).expect("write config");
}

#[test]
fn prints_resolved_settings_and_positionals() {
    let temp = TempDir::new().expect("tempdir");
    let output = docfront(temp.path())
        .args(["--time", "-v", "in.txt", "out.html"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout is json");
    assert_eq!(payload["source"], "in.txt");
    assert_eq!(payload["destination"], "out.html");
    assert_eq!(payload["settings"]["report_level"], 1);
    assert_eq!(payload["settings"]["halt_level"], 4);
    assert_eq!(payload["settings"]["datestamp"], "%Y-%m-%d %H:%M UTC");
    assert_eq!(payload["settings"]["syntax_highlight"], "long");
    assert!(payload["settings"]["doctitle_xform"].is_null());
}

#[test]
fn rejects_a_third_positional_argument() {
    let temp = TempDir::new().expect("tempdir");
    docfront(temp.path())
        .args(["a.txt", "b.html", "c.html"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Maximum 2 arguments allowed."));
}

#[test]
fn refuses_thresholds_outside_the_allow_list() {
    let temp = TempDir::new().expect("tempdir");
    docfront(temp.path())
        .args(["--halt", "fatal"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fatal"));
}

#[test]
fn version_and_help_exit_successfully() {
    let temp = TempDir::new().expect("tempdir");
    docfront(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("(docfront "));

    docfront(temp.path())
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML-Specific Options"))
        .stdout(predicate::str::contains("General Options"))
        .stdout(predicate::str::contains("dump-internal-document-attributes").not());
}

#[test]
fn config_file_values_feed_the_same_namespace() {
    let temp = TempDir::new().expect("tempdir");
    write_config(
        temp.path(),
        r#"
        [general]
        Halt-Level = "error"
        report-level = 5

        [html4css1_writer]
        embed-stylesheet = "yes"
        "#,
    );

    let output = docfront(temp.path())
        .args(["--report", "warning"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let payload: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout is json");
    assert_eq!(payload["settings"]["halt_level"], 3);
    assert_eq!(payload["settings"]["report_level"], 2);
    assert_eq!(payload["settings"]["embed_stylesheet"], true);
}

#[test]
fn command_line_flag_overrides_component_section() {
    let temp = TempDir::new().expect("tempdir");
    write_config(
        temp.path(),
        r#"
        [html4css1_writer]
        embed-stylesheet = "yes"
        stylesheet = "site.css"

        [restructuredtext-parser]
        tab-width = 4
        "#,
    );

    let output = docfront(temp.path())
        .arg("--link-stylesheet")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let payload: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout is json");
    assert_eq!(payload["settings"]["embed_stylesheet"], false);
    assert_eq!(payload["settings"]["stylesheet"], "site.css");
    assert_eq!(payload["settings"]["tab_width"], "4");
}

#[test]
fn quoted_section_headers_name_the_same_component() {
    let temp = TempDir::new().expect("tempdir");
    write_config(
        temp.path(),
        "[\"standalone reader\"]\ndoctitle-xform = \"off\"\n",
    );

    let output = docfront(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let payload: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout is json");
    assert_eq!(payload["settings"]["doctitle_xform"], false);
}

#[test]
fn unknown_threshold_from_config_is_a_usage_error() {
    let temp = TempDir::new().expect("tempdir");
    write_config(temp.path(), "[general]\nreport_level = \"loud\"\n");

    docfront(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown threshold: loud"));
}

#[test]
fn non_boolean_switch_in_config_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    write_config(temp.path(), "[general]\ndebug = \"often\"\n");

    docfront(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("debug"));
}

#[test]
fn missing_override_config_fails() {
    let temp = TempDir::new().expect("tempdir");
    docfront(temp.path())
        .env("DOCFRONT_CONFIG", "nowhere.toml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("docfront error:"));
}
