/*!
 * Export pipeline
 *
 * Turns the current selection into one buffer and hands it either to an
 * editor (through a temporary file that is never removed) or to a
 * clipboard utility. Each consumer has a primary and a fallback command.
 */

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::launcher::{CommandSpec, LaunchError, ProcessLauncher};
use crate::selection::SelectionSet;
use crate::writer::{ExportFormat, ExportWriter};

/// Prefix of temporary export files
pub const ARTIFACT_PREFIX: &str = "filegather_selected_";

/// Suffix of temporary export files
pub const ARTIFACT_SUFFIX: &str = ".txt";

/// Where the export goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Write a temporary file and open it in an editor
    Editor,
    /// Pipe the content into a clipboard utility
    Clipboard,
}

/// Successful (or no-op) result of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing was selected; nothing was written or launched
    EmptySelection,
    /// The artifact was written and an editor started
    Opened {
        /// Temporary file holding the export
        artifact: PathBuf,
        /// Command that was started
        command: String,
    },
    /// The content was handed to a clipboard utility
    Copied {
        /// Command that accepted the content
        command: String,
        /// Number of bytes copied
        bytes: usize,
    },
}

/// Export failures
#[derive(Error, Debug)]
pub enum ExportError {
    /// The temporary file could not be created
    #[error("Error creating temporary file: {0}")]
    ArtifactCreate(#[source] io::Error),

    /// The temporary file could not be written
    #[error("Error writing temporary file {path}: {source}")]
    ArtifactWrite {
        /// Partially written file, left on disk
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Neither the editor nor the fallback opener started
    #[error("Error opening editor: {primary}\n(fallback also failed: {fallback})")]
    Launch {
        /// Temporary file that was written
        artifact: PathBuf,
        /// Primary editor failure
        primary: LaunchError,
        /// Fallback opener failure
        fallback: LaunchError,
    },

    /// Neither clipboard utility accepted the content
    #[error("Failed to copy to clipboard: {primary}\n(fallback also failed: {fallback})")]
    Clipboard {
        /// Primary utility failure
        primary: LaunchError,
        /// Fallback utility failure
        fallback: LaunchError,
    },
}

/// Commands used by the export pipeline
#[derive(Debug, Clone)]
pub struct ExportCommands {
    /// Editor started on the temporary file
    pub editor: CommandSpec,
    /// Opener tried when the editor fails to start
    pub editor_fallback: CommandSpec,
    /// Clipboard utility fed on stdin
    pub clipboard: CommandSpec,
    /// Clipboard utility tried when the first one fails
    pub clipboard_fallback: CommandSpec,
}

/// Serializes the selection and delivers it to an external consumer
pub struct ExportPipeline {
    /// Directory labels are relative to
    base_dir: PathBuf,
    /// Directory temporary files are created in
    temp_dir: PathBuf,
    commands: ExportCommands,
    launcher: Box<dyn ProcessLauncher>,
}

impl ExportPipeline {
    /// Create a pipeline that writes temporary files to the system temp dir
    pub fn new(
        base_dir: impl Into<PathBuf>,
        commands: ExportCommands,
        launcher: Box<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            temp_dir: std::env::temp_dir(),
            commands,
            launcher,
        }
    }

    /// Use a different directory for temporary files
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    /// Export the selection in the given mode
    ///
    /// Blocks until the clipboard utility exits; an editor is not waited for.
    pub fn export(
        &self,
        selection: &SelectionSet,
        mode: ExportMode,
    ) -> Result<ExportOutcome, ExportError> {
        if selection.is_empty() {
            info!("Export requested with an empty selection");
            return Ok(ExportOutcome::EmptySelection);
        }

        let result = match mode {
            ExportMode::Editor => self.open_in_editor(selection),
            ExportMode::Clipboard => self.copy_to_clipboard(selection),
        };

        match &result {
            Ok(outcome) => info!("Exported {} files: {:?}", selection.len(), outcome),
            Err(e) => error!("Export failed: {}", e),
        }
        result
    }

    fn open_in_editor(&self, selection: &SelectionSet) -> Result<ExportOutcome, ExportError> {
        let buf = ExportWriter::new(&self.base_dir, ExportFormat::Editor)
            .render(selection.ordered_paths());
        let artifact = self.write_artifact(&buf)?;

        let ExportCommands {
            editor,
            editor_fallback,
            ..
        } = &self.commands;

        let primary = match self.launcher.spawn_detached(editor, &artifact) {
            Ok(()) => {
                return Ok(ExportOutcome::Opened {
                    artifact,
                    command: editor.to_string(),
                })
            }
            Err(e) => e,
        };

        warn!("{}; trying {}", primary, editor_fallback);
        match self.launcher.spawn_detached(editor_fallback, &artifact) {
            Ok(()) => Ok(ExportOutcome::Opened {
                artifact,
                command: editor_fallback.to_string(),
            }),
            Err(fallback) => Err(ExportError::Launch {
                artifact,
                primary,
                fallback,
            }),
        }
    }

    /// Write the buffer to a new uniquely named file that outlives the process
    fn write_artifact(&self, buf: &[u8]) -> Result<PathBuf, ExportError> {
        let mut file = tempfile::Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .suffix(ARTIFACT_SUFFIX)
            .keep(true)
            .tempfile_in(&self.temp_dir)
            .map_err(ExportError::ArtifactCreate)?;

        let path = file.path().to_path_buf();
        file.write_all(buf)
            .and_then(|()| file.flush())
            .map_err(|source| ExportError::ArtifactWrite {
                path: path.clone(),
                source,
            })?;

        info!("Wrote {} bytes to {}", buf.len(), path.display());
        Ok(path)
    }

    fn copy_to_clipboard(&self, selection: &SelectionSet) -> Result<ExportOutcome, ExportError> {
        let buf = ExportWriter::new(&self.base_dir, ExportFormat::Clipboard)
            .render(selection.ordered_paths());

        let ExportCommands {
            clipboard,
            clipboard_fallback,
            ..
        } = &self.commands;

        let primary = match self.launcher.pipe_to(clipboard, &buf) {
            Ok(()) => {
                return Ok(ExportOutcome::Copied {
                    command: clipboard.to_string(),
                    bytes: buf.len(),
                })
            }
            Err(e) => e,
        };

        warn!("{}; trying {}", primary, clipboard_fallback);
        match self.launcher.pipe_to(clipboard_fallback, &buf) {
            Ok(()) => Ok(ExportOutcome::Copied {
                command: clipboard_fallback.to_string(),
                bytes: buf.len(),
            }),
            Err(fallback) => Err(ExportError::Clipboard { primary, fallback }),
        }
    }
}
