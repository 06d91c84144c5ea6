/*!
 * Export buffer writer for FileGather
 *
 * Serializes the selected files into one buffer: a relative path label,
 * a blank line, then the file content. The editor format fences each
 * file's content; the clipboard format separates files with `---`.
 */

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use strum::Display;
use tracing::{debug, warn};

/// Layout of the export buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ExportFormat {
    /// Content wrapped in ``` fences, for opening in an editor
    #[strum(to_string = "editor")]
    Editor,
    /// Plain content separated by `---`, for the clipboard
    #[strum(to_string = "clipboard")]
    Clipboard,
}

/// Writer for the combined content of selected files
pub struct ExportWriter {
    /// Directory labels are made relative to
    base_dir: PathBuf,
    /// Buffer layout
    format: ExportFormat,
}

impl ExportWriter {
    /// Create a new export writer
    pub fn new(base_dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            base_dir: base_dir.into(),
            format,
        }
    }

    /// Label for a path: relative to the base directory when possible
    pub fn label(&self, path: &Path) -> String {
        relative_label(&self.base_dir, path)
    }

    /// Build the buffer for the given paths, in order
    pub fn render<'a, I>(&self, paths: I) -> Vec<u8>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut buf = Vec::new();
        let mut count = 0;
        for path in paths {
            // Writing into a Vec cannot fail
            let _ = self.write_file(path, &mut buf);
            count += 1;
        }
        debug!("Rendered {} files in {} format ({} bytes)", count, self.format, buf.len());
        buf
    }

    /// Write one file's block
    fn write_file<W: Write>(&self, path: &Path, out: &mut W) -> io::Result<()> {
        write!(out, "{}\n\n", self.label(path))?;
        if self.format == ExportFormat::Editor {
            out.write_all(b"```\n")?;
        }

        match fs::read(path) {
            Ok(content) => {
                out.write_all(&content)?;
                if content.last() != Some(&b'\n') {
                    out.write_all(b"\n")?;
                }
            }
            Err(e) => {
                warn!("Could not read {} for export: {}", path.display(), e);
                writeln!(out, "error reading file: {}", e)?;
            }
        }

        match self.format {
            ExportFormat::Editor => out.write_all(b"```\n\n"),
            ExportFormat::Clipboard => out.write_all(b"\n---\n\n"),
        }
    }
}

/// `path` relative to `base`, or the whole path when it is not under `base`
pub fn relative_label(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
