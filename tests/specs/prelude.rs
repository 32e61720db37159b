//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory the CLI runs against
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn file(&self, rel: &str, contents: &str) -> &Self {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).unwrap()
    }

    pub fn strand(&self) -> Cli {
        let mut cmd = Command::cargo_bin("strand").unwrap();
        cmd.current_dir(self.path()).env_remove("RUST_LOG");
        Cli { cmd }
    }
}

/// Pending CLI invocation
pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Assert {
        self.cmd.assert().success()
    }

    pub fn fails(mut self) -> Assert {
        self.cmd.assert().failure()
    }
}

pub trait AssertExt {
    fn stdout_has(self, text: &str) -> Self;
    fn stderr_has(self, text: &str) -> Self;
    fn stdout_text(&self) -> String;
}

impl AssertExt for Assert {
    fn stdout_has(self, text: &str) -> Self {
        self.stdout(predicate::str::contains(text.to_string()))
    }

    fn stderr_has(self, text: &str) -> Self {
        self.stderr(predicate::str::contains(text.to_string()))
    }

    fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.get_output().stdout).to_string()
    }
}

/// Value printed on a `key: value` stdout line
pub fn reported(stdout: &str, key: &str) -> u64 {
    let prefix = format!("{key}: ");
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_else(|| panic!("no `{key}` in stdout: {stdout}"))
}

pub const ERROR_BAR: &str = "=================================================";
