//! Output handling for listings and exported reports.

use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err()
}

/// Write text output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            write_bytes_atomic(path, content.as_bytes())?;
            if !quiet {
                tracing::info!("Output written to {:?}", path);
            }
            Ok(())
        }
    }
}

/// Write bytes through a sibling temp file and rename into place.
///
/// On failure the temp file is removed and any existing file at `path` is
/// left as it was.
pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("Output path {path:?} has no file name"))?;
    let tmp = dir.join(format!(".{}.partial", file_name.to_string_lossy()));

    let result = (|| -> Result<()> {
        let mut file = std::fs::File::create(&tmp)
            .with_context(|| format!("Failed to create {tmp:?}"))?;
        file.write_all(bytes)
            .with_context(|| format!("Failed to write {tmp:?}"))?;
        file.sync_all()
            .with_context(|| format!("Failed to flush {tmp:?}"))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move output into {path:?}"))?;
        Ok(())
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}
