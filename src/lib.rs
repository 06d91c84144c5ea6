/*!
 * FileGather - Pick files from a directory tree and export their content
 *
 * This library provides a lazily loaded directory tree, an ordered file
 * selection and an export pipeline that hands the combined content of the
 * selection to an editor or the system clipboard.
 */

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod launcher;
pub mod logging;
pub mod navigation;
pub mod scanner;
pub mod selection;
pub mod terminal;
pub mod tree;
pub mod types;
pub mod ui;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use app::App;
pub use config::Config;
pub use error::{FileGatherError, Result};
pub use export::{ExportCommands, ExportError, ExportMode, ExportOutcome, ExportPipeline};
pub use launcher::{CommandSpec, ProcessLauncher, SystemLauncher};
pub use navigation::{Command, Navigator};
pub use scanner::{DirectoryLister, ScanError, Scanner};
pub use selection::SelectionSet;
pub use tree::TreeModel;
pub use types::{DirEntryInfo, Expansion, Focus, NodeId, NodeKind, TreeNode};
pub use writer::{ExportFormat, ExportWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
