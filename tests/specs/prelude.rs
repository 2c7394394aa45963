//! Shared helpers for CLI specs

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const NODE_ID: &str = "6f2c1a1e-8d6b-4b38-9a0e-2f5a7f1c9d10";
pub const SDDC_ID: &str = "0b7c4d5e-1f2a-4b3c-8d9e-0a1b2c3d4e5f";

/// Nothing listens here, so remote calls fail fast
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

/// Isolated home and config directory for one CLI invocation
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Config pointing both endpoints at an unreachable address
    pub fn unreachable_config(&self) -> PathBuf {
        self.file(
            "config.toml",
            &format!(
                "org_id = \"org-1\"\nrefresh_token = \"token\"\nvmc_url = \"{url}\"\ncsp_url = \"{url}\"\n",
                url = UNREACHABLE_URL
            ),
        )
    }

    /// The CLI with environment isolated from the host
    pub fn vmc(&self) -> CliCommand {
        let mut cmd = Command::cargo_bin("vmc-srm").unwrap();
        cmd.env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("RUST_LOG", "off")
            .env_remove("VMC_ORG_ID")
            .env_remove("VMC_REFRESH_TOKEN")
            .env_remove("VMC_URL")
            .env_remove("CSP_URL");
        CliCommand { cmd }
    }
}

pub struct CliCommand {
    cmd: Command,
}

impl CliCommand {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Outcome {
        Outcome(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> Outcome {
        Outcome(self.cmd.assert().failure())
    }
}

pub struct Outcome(Assert);

impl Outcome {
    pub fn stdout_has(self, text: &str) -> Self {
        Outcome(self.0.stdout(predicate::str::contains(text)))
    }

    pub fn stderr_has(self, text: &str) -> Self {
        Outcome(self.0.stderr(predicate::str::contains(text)))
    }

    pub fn stderr_lacks(self, text: &str) -> Self {
        Outcome(self.0.stderr(predicate::str::contains(text).not()))
    }
}
