/*!
 * Configuration handling for FileGather
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use tracing::warn;

use crate::clipboard::{self, ClipboardProvider};
use crate::ensure;
use crate::error::Result;
use crate::export::ExportCommands;
use crate::launcher::CommandSpec;

/// Default editor started on the export file
pub const DEFAULT_EDITOR: &str = "gedit";

/// Default opener used when the editor fails to start
pub const DEFAULT_EDITOR_FALLBACK: &str = "xdg-open";

/// Default log file name
pub const LOG_FILE_NAME: &str = "filegather.log";

/// Command-line arguments for FileGather
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "filegather",
    version = env!("CARGO_PKG_VERSION"),
    about = "Pick files from a directory tree and export their combined content",
    long_about = "Browse a directory tree, select files, and send their combined content to an editor (via a temporary file) or to the system clipboard."
)]
pub struct Args {
    /// Directory to browse
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Editor started with the export file as its argument
    #[clap(long, default_value = DEFAULT_EDITOR)]
    pub editor: String,

    /// Opener tried when the editor fails to start
    #[clap(long, default_value = DEFAULT_EDITOR_FALLBACK)]
    pub editor_fallback: String,

    /// Clipboard utility (defaults to the platform's usual one)
    #[clap(long, value_enum)]
    pub clipboard: Option<ClipboardProvider>,

    /// Clipboard utility tried when the first one fails
    #[clap(long, value_enum)]
    pub clipboard_fallback: Option<ClipboardProvider>,

    /// Comma-separated list of glob patterns hidden from the tree
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Log file path
    #[clap(long)]
    pub log_file: Option<String>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory the session starts in; export labels are relative to it
    pub start_dir: PathBuf,

    /// Editor command
    pub editor: String,

    /// Fallback opener command
    pub editor_fallback: String,

    /// Primary clipboard utility
    pub clipboard: ClipboardProvider,

    /// Fallback clipboard utility
    pub clipboard_fallback: ClipboardProvider,

    /// Patterns hidden from the tree
    pub ignore_patterns: Vec<String>,

    /// Where log output goes
    pub log_file: PathBuf,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let (clipboard, clipboard_fallback) = clipboard::default_providers();
        Self {
            start_dir: PathBuf::from(args.directory_path),
            editor: args.editor,
            editor_fallback: args.editor_fallback,
            clipboard: args.clipboard.unwrap_or(clipboard),
            clipboard_fallback: args.clipboard_fallback.unwrap_or(clipboard_fallback),
            ignore_patterns: args.ignore_patterns,
            log_file: args
                .log_file
                .map(PathBuf::from)
                .unwrap_or_else(default_log_file),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.start_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.start_dir.display()
        );
        ensure!(
            CommandSpec::parse(&self.editor).is_some(),
            Config,
            "Editor command is empty"
        );
        ensure!(
            CommandSpec::parse(&self.editor_fallback).is_some(),
            Config,
            "Editor fallback command is empty"
        );

        for provider in [self.clipboard, self.clipboard_fallback] {
            let program = provider.command().program;
            if !clipboard::command_exists(&program) {
                warn!("Clipboard utility {} not found", program);
            }
        }

        Ok(())
    }

    /// Commands handed to the export pipeline
    pub fn export_commands(&self) -> ExportCommands {
        ExportCommands {
            editor: CommandSpec::parse(&self.editor)
                .unwrap_or_else(|| CommandSpec::new(DEFAULT_EDITOR)),
            editor_fallback: CommandSpec::parse(&self.editor_fallback)
                .unwrap_or_else(|| CommandSpec::new(DEFAULT_EDITOR_FALLBACK)),
            clipboard: self.clipboard.command(),
            clipboard_fallback: self.clipboard_fallback.command(),
        }
    }
}

/// Log file under the user cache directory, or the temp dir without one
fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("filegather"))
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_NAME)
}
