//! CLI integration tests using the REAL polyfills-loader binary

mod common;

use assert_cmd::Command;
use common::{INDEX_HTML, TestProject};
use predicates::prelude::*;

#[allow(deprecated)]
fn loader_cmd() -> Command {
    Command::cargo_bin("polyfills-loader").unwrap()
}

#[test]
fn test_help_output() {
    loader_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("inject"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_output() {
    loader_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("polyfills-loader"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_bash() {
    loader_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("polyfills-loader"));
}

#[test]
fn test_completions_case_insensitive() {
    loader_cmd().args(["completions", "ZSH"]).assert().success();
}

#[test]
fn test_completions_unknown_shell() {
    loader_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_inject_without_polyfills() {
    let project = TestProject::with_index();

    loader_cmd()
        .current_dir(&project.path)
        .args(["inject", "index.html", "--no-minify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Injected polyfills loader into"))
        .stdout(predicate::str::contains("index.html"));

    let html = project.read_file("dist/index.html");
    assert!(html.contains("<script type=\"module\" src=\"./app.js\"></script></body>"));
    assert_eq!(html.matches("<script").count(), 1);
    assert!(!project.file_exists("dist/polyfills"));
}

#[test]
fn test_inject_with_config_next_to_html() {
    let project = TestProject::with_index();
    let code = project.install_fetch();
    project.write_file(
        "polyfills-loader.yaml",
        "polyfills:\n  fetch: true\nminify: false\n",
    );

    loader_cmd()
        .current_dir(&project.path)
        .args(["inject", "index.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("polyfills/fetch."));

    let files = project.list_dir("dist/polyfills");
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("fetch.") && files[0].ends_with(".js"));
    assert_eq!(project.read_file(&format!("dist/polyfills/{}", files[0])), code);

    let html = project.read_file("dist/index.html");
    assert!(html.contains("function loadScript(src, module)"));
    assert!(html.contains(&format!("loadScript('polyfills/{}', false)", files[0])));
    assert!(!html.contains("src=\"./app.js\"></script>"));
}

#[test]
fn test_inject_minified() {
    let project = TestProject::with_index();
    let code = project.install_fetch();
    project.write_file("polyfills-loader.yaml", "polyfills:\n  fetch: true\n");

    loader_cmd()
        .current_dir(&project.path)
        .args(["inject", "index.html", "-o", "build"])
        .assert()
        .success();

    let files = project.list_dir("build/polyfills");
    assert_eq!(files.len(), 1);
    let minified = project.read_file(&format!("build/polyfills/{}", files[0]));
    assert!(minified.len() < code.len());
    assert!(minified.contains("self.fetch"));
    assert!(!project.read_file("build/index.html").contains("\n  <my-app>"));
}

#[test]
fn test_inject_explicit_json_config() {
    let project = TestProject::with_index();
    project.write_file(
        "config/loader.json",
        r#"{ "entries": { "type": "system", "files": ["./app.js"] }, "minify": false }"#,
    );

    loader_cmd()
        .current_dir(&project.path)
        .args([
            "inject",
            "index.html",
            "--skip-extract",
            "-c",
            "config/loader.json",
        ])
        .assert()
        .success();

    let html = project.read_file("dist/index.html");
    assert!(html.contains("<link rel=\"preload\" as=\"script\" href=\"./app.js\">"));
    assert!(html.contains("System.import('./app.js');"));
    // The module script stays when extraction is skipped
    assert!(html.contains("<script type=\"module\" src=\"./app.js\"></script>"));
}

#[test]
fn test_inject_missing_html() {
    let project = TestProject::new();

    loader_cmd()
        .current_dir(&project.path)
        .args(["inject", "missing.html"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing.html"));
}

#[test]
fn test_inject_missing_config() {
    let project = TestProject::with_index();

    loader_cmd()
        .current_dir(&project.path)
        .args(["inject", "index.html", "-c", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.yaml"));
}

#[test]
fn test_inject_missing_polyfill() {
    let project = TestProject::with_index();
    project.write_file("polyfills-loader.yaml", "polyfills:\n  fetch: true\n");

    loader_cmd()
        .current_dir(&project.path)
        .args(["inject", "index.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find a file at"));

    assert!(!project.file_exists("dist"));
}

#[test]
fn test_inject_without_module_scripts() {
    let project = TestProject::new();
    project.write_file(
        "index.html",
        "<html><head></head><body><script src=\"app.js\"></script></body></html>",
    );

    loader_cmd()
        .current_dir(&project.path)
        .args(["inject", "index.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing config.entries"));
}

#[test]
fn test_extract_json() {
    let project = TestProject::with_index();

    let output = loader_cmd()
        .current_dir(&project.path)
        .args(["extract", "index.html", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["jsModules"][0], "./app.js");
    assert!(json["jsScripts"].as_array().unwrap().is_empty());
    // Extraction does not modify the file
    assert_eq!(project.read_file("index.html"), INDEX_HTML);
}

#[test]
fn test_extract_listing() {
    let project = TestProject::with_index();

    loader_cmd()
        .current_dir(&project.path)
        .args(["extract", "index.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Modules:"))
        .stdout(predicate::str::contains("./app.js"))
        .stdout(predicate::str::contains("Import maps: None"));
}
