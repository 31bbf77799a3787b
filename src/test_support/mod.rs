//! Test utilities and mocks for edaflow unit tests.
//!
//! The main piece is [`MockLauncher`], a [`Launcher`] that records every
//! command it is asked to run and answers from a list of expectations
//! instead of spawning processes.
//!
//! # Example
//!
//! ```rust,ignore
//! let launcher = Arc::new(MockLauncher::new());
//! launcher.expect("make", MockProcessOutput::success(""));
//!
//! let runner = PipelineRunner::new("make", launcher.clone());
//! // run a backend with `runner`...
//! assert_eq!(launcher.calls()[0].command, "make");
//! ```

pub mod fixtures;

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::util::process::{Launcher, ProcessBuilder, ProcessOutput};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    fn to_output(&self) -> ProcessOutput {
        ProcessOutput {
            code: Some(self.status),
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        }
    }
}

/// Pattern for matching commands in MockLauncher.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match using a regex pattern.
    Regex(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
            CommandPattern::Any => true,
        }
    }
}

/// A command the mock was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    /// Program and arguments joined by spaces.
    pub command: String,
    /// Working directory, if one was set.
    pub cwd: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<(CommandPattern, MockProcessOutput)>,
    calls: Vec<LaunchRecord>,
}

/// Mock launcher for testing backends without spawning processes.
///
/// Commands with no matching expectation fail to launch.
#[derive(Debug, Default)]
pub struct MockLauncher {
    state: Mutex<MockState>,
}

impl MockLauncher {
    /// Create a new mock launcher.
    pub fn new() -> Self {
        MockLauncher::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for an arbitrary pattern.
    pub fn expect_pattern(&self, pattern: CommandPattern, output: MockProcessOutput) -> &Self {
        self.state.lock().unwrap().expectations.push((pattern, output));
        self
    }

    /// Get all commands that were launched.
    pub fn calls(&self) -> Vec<LaunchRecord> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl Launcher for MockLauncher {
    fn launch(&self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        let command = cmd.display_command();
        let mut state = self.state.lock().unwrap();
        state.calls.push(LaunchRecord {
            command: command.clone(),
            cwd: cmd.get_cwd().map(PathBuf::from),
        });

        match state
            .expectations
            .iter()
            .find(|(pattern, _)| pattern.matches(&command))
        {
            Some((_, output)) => Ok(output.to_output()),
            None => bail!("unexpected command: {}", command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_launcher_records_calls() {
        let launcher = MockLauncher::new();
        launcher.expect("make", MockProcessOutput::success("ok"));

        let output = launcher
            .launch(&ProcessBuilder::new("make").cwd("/work"))
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "ok");

        let calls = launcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].cwd, Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_mock_launcher_unexpected_command() {
        let launcher = MockLauncher::new();
        let err = launcher.launch(&ProcessBuilder::new("yosys")).unwrap_err();
        assert!(err.to_string().contains("unexpected command: yosys"));
    }

    #[test]
    fn test_command_patterns() {
        assert!(CommandPattern::StartsWith("make".into()).matches("make -j4"));
        assert!(CommandPattern::Regex(r"^make( -j\d+)?$".into()).matches("make -j8"));
        assert!(!CommandPattern::Regex(r"^make$".into()).matches("make clean"));
        assert!(CommandPattern::Any.matches("anything"));
    }
}
