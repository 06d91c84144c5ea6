/*!
 * External process invocation
 *
 * The export pipeline talks to editors and clipboard utilities only
 * through [`ProcessLauncher`], so tests can stand in for the system.
 */

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, warn};

/// Error type for process launches
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The program could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying error
        source: io::Error,
    },

    /// The input could not be handed to the program
    #[error("failed to write to {program}: {source}")]
    Stdin {
        /// Program name
        program: String,
        /// Underlying error
        source: io::Error,
    },

    /// Waiting for the program failed
    #[error("failed to wait for {program}: {source}")]
    Wait {
        /// Program name
        program: String,
        /// Underlying error
        source: io::Error,
    },

    /// The program ran but reported failure
    #[error("{program} exited with status: {status}")]
    Status {
        /// Program name
        program: String,
        /// Exit status
        status: ExitStatus,
    },
}

/// A program with its fixed leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name or path
    pub program: String,
    /// Arguments passed before any per-call argument
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Create a command with leading arguments
    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a shell-like command line on whitespace
    ///
    /// Returns `None` for a blank line. Quoting is not supported.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::with_args(program, parts))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Starts external programs on behalf of the export pipeline
pub trait ProcessLauncher {
    /// Start `command` with `target` as its last argument without waiting
    fn spawn_detached(&self, command: &CommandSpec, target: &Path) -> Result<(), LaunchError>;

    /// Run `command`, feed `input` to its stdin and wait for it to exit
    fn pipe_to(&self, command: &CommandSpec, input: &[u8]) -> Result<(), LaunchError>;
}

/// Wait for a detached child off the UI thread so it is reaped when it exits
fn reap_in_background(mut child: Child, label: String) -> Option<JoinHandle<Option<ExitStatus>>> {
    let spawned = thread::Builder::new()
        .name("reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => {
                debug!("{} exited with {}", label, status);
                Some(status)
            }
            Err(e) => {
                debug!("Could not wait for {}: {}", label, e);
                None
            }
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Could not start reaper thread: {}", e);
            None
        }
    }
}

/// Launcher that runs real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn spawn_detached(&self, command: &CommandSpec, target: &Path) -> Result<(), LaunchError> {
        // Detached output would draw over the terminal UI
        let child = Command::new(&command.program)
            .args(&command.args)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        debug!("Started {} (pid {})", command, child.id());
        reap_in_background(child, command.to_string());
        Ok(())
    }

    fn pipe_to(&self, command: &CommandSpec, input: &[u8]) -> Result<(), LaunchError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        // Dropping stdin closes the pipe so the child sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(source) = stdin.write_all(input) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(LaunchError::Stdin {
                    program: command.program.clone(),
                    source,
                });
            }
        }

        let status = child.wait().map_err(|source| LaunchError::Wait {
            program: command.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::Status {
                program: command.program.clone(),
                status,
            })
        }
    }
}
