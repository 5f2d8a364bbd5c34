//! Integration tests for config discovery and validation

use anyhow::Result;

use crate::common::{HELLO_SHA256, TestProject};

#[test]
fn test_config_discovered_from_subdirectory() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("source = \"site\"\n[digest]\nlength = 6\n")?;
    project.write_file("site/a.css", "hello")?;
    project.write_file("work/notes.txt", "")?;

    let binary = env!("CARGO_BIN_EXE_asset-digest");
    let output = std::process::Command::new(binary)
        .args(["digest", "/a.css"])
        .current_dir(project.path().join("work"))
        .env_remove("ASSET_DIGEST_CONFIG")
        .output()?;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "/a.css?v=2cf24d\n");
    Ok(())
}

#[test]
fn test_config_flag_and_env_var() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("conf/site.toml", "[digest]\nparam = \"hash\"\n")?;
    project.write_file("conf/a.css", "hello")?;

    // Paths in an explicit config resolve against the config's directory
    let output = project.run(&["--config", "conf/site.toml", "digest", "a.css"])?;
    output.assert_success();
    assert_eq!(output.stdout, format!("a.css?hash={HELLO_SHA256}\n"));

    let output = project.run_with_env(&["digest", "a.css"], &[("ASSET_DIGEST_CONFIG", "conf/site.toml")])?;
    output.assert_success();
    assert_eq!(output.stdout, format!("a.css?hash={HELLO_SHA256}\n"));
    Ok(())
}

#[test]
fn test_missing_explicit_config() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run(&["--config", "missing.toml", "digest", "a.css"])?;
    output
        .assert_failure()
        .assert_stderr_contains("Configuration file not found")
        .assert_stderr_contains("suggestion");
    Ok(())
}

#[test]
fn test_unknown_config_key_rejected() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("[digest]\nalgorythm = \"md5\"\n")?;

    let output = project.run(&["digest", "a.css"])?;
    output
        .assert_failure()
        .assert_stderr_contains("Invalid configuration")
        .assert_stderr_contains("algorythm");
    Ok(())
}

#[test]
fn test_invalid_param_rejected() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("[digest]\nparam = \"a&b\"\n")?;

    let output = project.run(&["build"])?;
    output.assert_failure().assert_stderr_contains("digest.param");
    Ok(())
}
