//! Structured execution of external commands
//!
//! Commands are run directly (no shell) with captured output. A non-zero exit
//! status is the failure signal; scanning output for an error marker is only
//! applied where a step asks for it.

use crate::error::PublishError;
use std::process::Command;

/// Arguments whose following value is a secret
const SECRET_FLAGS: &[&str] = &["--api-key", "--password"];

/// A program with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute
    pub program: String,
    /// Arguments, passed as-is
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command from a program and arguments
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Render the command for logs with secrets masked
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        let mut mask_next = false;
        for arg in &self.args {
            if mask_next {
                parts.push("***".to_string());
                mask_next = false;
                continue;
            }
            match arg.split_once('=') {
                Some((flag, _)) if SECRET_FLAGS.contains(&flag) => {
                    parts.push(format!("{}=***", flag));
                }
                _ => {
                    mask_next = SECRET_FLAGS.contains(&arg.as_str());
                    parts.push(arg.clone());
                }
            }
        }
        parts.join(" ")
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    /// Whether the command exited successfully
    pub success: bool,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// First line of stdout or stderr that starts with `error`
    pub fn error_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .chain(self.stderr.lines())
            .map(str::trim)
            .find(|line| {
                line.get(..5)
                    .is_some_and(|head| head.eq_ignore_ascii_case("error"))
            })
    }

    /// Turn the output into an error unless the command succeeded
    ///
    /// With `scan_output`, an `error` line fails the command even when the
    /// exit status claims success.
    pub fn check(&self, spec: &CommandSpec, scan_output: bool) -> Result<(), PublishError> {
        if !self.success {
            let message = self
                .error_line()
                .map(str::to_string)
                .or_else(|| last_line(&self.stderr))
                .or_else(|| last_line(&self.stdout))
                .unwrap_or_else(|| match self.code {
                    Some(code) => format!("exit status {}", code),
                    None => "terminated by signal".to_string(),
                });
            return Err(PublishError::command_failed(spec.display(), message));
        }

        if scan_output {
            if let Some(line) = self.error_line() {
                return Err(PublishError::command_failed(spec.display(), line));
            }
        }

        Ok(())
    }
}

fn last_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(str::to_string)
}

/// Trait for running external commands
pub trait CommandRunner {
    /// Run a command to completion and capture its output
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, PublishError>;
}

/// Runner that executes real processes
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, PublishError> {
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .output()
            .map_err(|e| PublishError::Spawn {
                command: spec.display(),
                source: e,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
