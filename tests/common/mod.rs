//! Shared helpers for integration tests.

#![allow(dead_code)]

use anyhow::{Context, Result};
use asset_digest::constants::CONFIG_ENV_VAR;
use asset_digest::test_utils::TestSite;
use std::path::Path;
use std::process::Command;

/// A site directory plus a way to run the binary inside it
pub struct TestProject {
    site: TestSite,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            site: TestSite::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.site.path()
    }

    pub fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        self.site.write_file(relative, content)?;
        Ok(())
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        self.site.write_config(content)?;
        Ok(())
    }

    pub fn read_file(&self, relative: &str) -> Result<String> {
        self.site.read_file(relative)
    }

    /// Run asset-digest in the project directory
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        self.run_with_env(args, &[])
    }

    /// Run asset-digest with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Result<CommandOutput> {
        let binary = env!("CARGO_BIN_EXE_asset-digest");
        let mut cmd = Command::new(binary);
        cmd.args(args)
            .current_dir(self.path())
            .env_remove(CONFIG_ENV_VAR)
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        for (key, value) in env {
            cmd.env(key, value);
        }

        let output = cmd.output().context("Failed to run asset-digest")?;
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command exited with status 1
    pub fn assert_failure(&self) -> &Self {
        assert_eq!(self.code, Some(1), "Expected exit code 1\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

pub const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
pub const HELLO_MD5: &str = "5d41402abc4b2a76b9719d911017c592";
