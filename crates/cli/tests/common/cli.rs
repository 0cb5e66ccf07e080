//! CLI command execution helpers with automatic timing
//!
//! This module provides a wrapper around the `snappy` binary that
//! automatically measures execution time and provides convenient
//! assertion methods.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct SnappyCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
}

impl SnappyCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_snappy")),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env_remove("RUST_LOG")
            .env_remove("SNAPPY_ZFS_BIN")
            .envs(&self.env)
            .output()
            .context("Failed to execute command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Operation lines (`CREATE`/`RENAME`/`DELETE`, optionally `[DRY]`) from stdout
    pub fn operations(&self) -> Vec<String> {
        self.stdout
            .lines()
            .filter(|line| is_operation_line(line))
            .map(str::to_string)
            .collect()
    }
}

/// Whether a line is an operation announcement
pub fn is_operation_line(line: &str) -> bool {
    let line = line.strip_prefix("[DRY] ").unwrap_or(line);
    ["CREATE ", "RENAME ", "DELETE "]
        .iter()
        .any(|verb| line.starts_with(verb))
}

/// Macro for convenient command construction
///
/// Usage:
/// ```
/// snappy!(dir, "--dry", "tank/data").assert_success()?;
/// ```
#[macro_export]
macro_rules! snappy {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::SnappyCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_line_detection() {
        assert!(is_operation_line("DELETE tank@x"));
        assert!(is_operation_line("[DRY] RENAME tank@a → tank@b"));
        assert!(is_operation_line("CREATE tank@c"));
        assert!(!is_operation_line("tank: kept 3, promoted 0, deleted 0 (0 B unique)"));
        assert!(!is_operation_line("[DRY]"));
    }

    #[test]
    fn test_operations_filter() {
        let result = CommandResult {
            stdout: "[DRY] DELETE t@a\nsummary\n[DRY] CREATE t@b\n".to_string(),
            stderr: String::new(),
            exit_code: 0,
            duration: Duration::from_millis(10),
        };
        assert_eq!(result.operations(), vec!["[DRY] DELETE t@a", "[DRY] CREATE t@b"]);
    }
}
