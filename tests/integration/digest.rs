//! Integration tests for `asset-digest digest`

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::{HELLO_MD5, HELLO_SHA256, TestProject};

#[test]
fn test_digest_existing_and_missing() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("css/site.css", "hello")?;

    let output = project.run(&["digest", "/css/site.css", "css/site.css", "/js/missing.js"])?;
    output.assert_success();

    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("/css/site.css?v={HELLO_SHA256}").as_str(),
            format!("css/site.css?v={HELLO_SHA256}").as_str(),
            "/js/missing.js",
        ]
    );
    Ok(())
}

#[test]
fn test_digest_logs_generated_reference() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("app.js", "hello")?;

    let output = project.run(&["digest", "/app.js"])?;
    output
        .assert_success()
        .assert_stderr_contains(&format!("asset_digest: generated /app.js => {HELLO_SHA256}"));
    Ok(())
}

#[test]
fn test_digest_quiet_suppresses_info_log() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("app.js", "hello")?;

    let output = project.run(&["--quiet", "digest", "/app.js"])?;
    output.assert_success();
    assert!(!output.stderr.contains("asset_digest: generated"));
    Ok(())
}

#[test]
fn test_digest_traversal_passes_through() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("site/index.html", "")?;
    project.write_file("secret.txt", "hello")?;

    let output = project.run(&["--root", "site", "digest", "../secret.txt", "/../secret.txt"])?;
    output.assert_success();
    assert_eq!(output.stdout, "../secret.txt\n/../secret.txt\n");
    Ok(())
}

#[test]
fn test_digest_algorithm_and_length_flags() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("logo.svg", "hello")?;

    Command::cargo_bin("asset-digest")?
        .current_dir(project.path())
        .env_remove("ASSET_DIGEST_CONFIG")
        .args(["digest", "--algorithm", "md5", "/logo.svg"])
        .assert()
        .success()
        .stdout(predicate::eq(format!("/logo.svg?v={HELLO_MD5}\n")));

    Command::cargo_bin("asset-digest")?
        .current_dir(project.path())
        .env_remove("ASSET_DIGEST_CONFIG")
        .args(["digest", "--length", "12", "--param", "rev", "/logo.svg"])
        .assert()
        .success()
        .stdout(predicate::eq("/logo.svg?rev=2cf24dba5fb0\n"));
    Ok(())
}

#[test]
fn test_digest_invalid_length_is_error() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("logo.svg", "hello")?;

    let output = project.run(&["digest", "--algorithm", "md5", "--length", "40", "/logo.svg"])?;
    output.assert_failure().assert_stderr_contains("digest.length");
    Ok(())
}

#[test]
fn test_digest_missing_root_is_error() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run(&["--root", "nowhere", "digest", "/a.css"])?;
    output.assert_failure().assert_stderr_contains("Site source directory not found");
    Ok(())
}

#[test]
fn test_digest_requires_a_path() -> Result<()> {
    Command::cargo_bin("asset-digest")?
        .arg("digest")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATHS"));
    Ok(())
}
