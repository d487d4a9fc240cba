//! Integration tests for the CLI generate subcommand

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn scaffold(root: &Path) {
    fs::create_dir_all(root.join("codegen/template")).unwrap();
    fs::create_dir_all(root.join("codegen/generator/mydir")).unwrap();
    fs::write(
        root.join("codegen/template/test.tera"),
        "value={{ testVar }} version={{ build.version }}",
    )
    .unwrap();
    fs::write(
        root.join("codegen/generator/mydir/success-test.txt.json"),
        r#"{"templateName": "test.tera", "dataModel": {"testVar": "test value"}}"#,
    )
    .unwrap();
}

fn generate(root: &Path) -> Command {
    generate_from(root, "codegen/generator")
}

fn generate_from(root: &Path, generator_dir: &str) -> Command {
    let mut cmd = Command::cargo_bin("teragen").unwrap();
    cmd.current_dir(root)
        .arg("generate")
        .arg("--source-dir")
        .arg("codegen")
        .arg("--template-dir")
        .arg("codegen/template")
        .arg("--generator-dir")
        .arg(generator_dir)
        .arg("--output-dir")
        .arg("out")
        .arg("--context-key")
        .arg("build")
        .arg("--property")
        .arg("version=1.2.3");
    cmd
}

#[test]
fn test_generate_command_renders_and_registers_compile_root() {
    let temp_dir = TempDir::new().unwrap();
    scaffold(temp_dir.path());

    generate(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 file(s), 0 up to date"))
        .stdout(predicate::str::contains("Registered compile source root: out"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("out/mydir/success-test.txt")).unwrap(),
        "value=test value version=1.2.3"
    );
}

#[test]
fn test_generate_command_second_run_is_up_to_date() {
    let temp_dir = TempDir::new().unwrap();
    scaffold(temp_dir.path());

    generate(temp_dir.path()).assert().success();
    generate(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 0 file(s), 1 up to date"));
}

#[test]
fn test_generate_command_test_phase() {
    let temp_dir = TempDir::new().unwrap();
    scaffold(temp_dir.path());

    generate(temp_dir.path())
        .arg("--phase")
        .arg("generate-test-sources")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Registered test compile source root: out",
        ))
        .stdout(predicate::str::contains("Registered compile source root").not());
}

#[test]
fn test_generate_command_reads_config_file() {
    let temp_dir = TempDir::new().unwrap();
    scaffold(temp_dir.path());
    fs::write(
        temp_dir.path().join("teragen.toml"),
        r#"
source_dir = "codegen"
template_dir = "codegen/template"
generator_dir = "codegen/generator"
output_dir = "generated"
context_key = "build"

[properties]
version = "9.9.9"
"#,
    )
    .unwrap();

    Command::cargo_bin("teragen")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("generate")
        .arg("--config")
        .arg("teragen.toml")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("generated/mydir/success-test.txt")).unwrap(),
        "value=test value version=9.9.9"
    );
}

#[test]
fn test_generate_command_fails_on_unknown_descriptor_type() {
    let temp_dir = TempDir::new().unwrap();
    scaffold(temp_dir.path());
    fs::write(temp_dir.path().join("codegen/generator/notes.xml"), "<x/>").unwrap();

    generate(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Generation failed"))
        .stderr(predicate::str::contains("Unknown descriptor file extension"));
}

#[test]
fn test_generate_command_fails_on_missing_generator_dir() {
    let temp_dir = TempDir::new().unwrap();
    scaffold(temp_dir.path());

    generate_from(temp_dir.path(), "absent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Generation failed"))
        .stderr(predicate::str::contains("Required directory does not exist"));
}

#[test]
fn test_generate_command_rejects_malformed_property() {
    Command::cargo_bin("teragen")
        .unwrap()
        .arg("generate")
        .arg("--property")
        .arg("no-separator")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}
