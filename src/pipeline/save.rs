//! Write the rendered document and hand back a download link.
//!
//! The file is written in place, overwriting whatever was there. A failed
//! write leaves whatever the OS left behind; the error goes to the caller.

use crate::error::ProposalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Relative path the document is saved to.
pub const OUTPUT_FILENAME: &str = "sales_proposal.html";

/// Text shown in front of the download link.
pub const DOWNLOAD_PREFIX: &str = "Click here to download: ";

/// A reference to a saved file, renderable as a clickable link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    pub path: PathBuf,
    pub result_html_prefix: String,
    pub result_html_suffix: String,
}

impl FileLink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            result_html_prefix: DOWNLOAD_PREFIX.to_string(),
            result_html_suffix: "<br>".to_string(),
        }
    }

    /// HTML snippet for a notebook output cell.
    pub fn to_html(&self) -> String {
        let path = self.path.display();
        format!(
            "{}<a href='{}' target='_blank'>{}</a>{}",
            self.result_html_prefix, path, path, self.result_html_suffix
        )
    }
}

impl fmt::Display for FileLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.result_html_prefix, self.path.display())
    }
}

/// Write `html` to [`OUTPUT_FILENAME`] in the working directory.
pub fn save_and_download_html(html: &str) -> Result<FileLink, ProposalError> {
    save_html_to(html, OUTPUT_FILENAME)
}

/// Write `html` as UTF-8 to `path`, overwriting any existing file.
///
/// The file handle is closed when this function returns, on success and on
/// error alike.
pub fn save_html_to(html: &str, path: impl AsRef<Path>) -> Result<FileLink, ProposalError> {
    let path = path.as_ref();
    let write_failed = |source: std::io::Error| ProposalError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_failed)?;
    file.write_all(html.as_bytes()).map_err(write_failed)?;
    file.flush().map_err(write_failed)?;

    info!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(FileLink::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_back_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILENAME);
        let html = "<!DOCTYPE html><p>Prix: 1 200 €</p>";

        let link = save_html_to(html, &path).unwrap();
        assert_eq!(link.path, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), html);
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILENAME);
        std::fs::write(&path, "an older and much longer document body").unwrap();

        save_html_to("new", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn unwritable_target_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join(OUTPUT_FILENAME);

        match save_html_to("x", &path) {
            Err(ProposalError::OutputWriteFailed { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected OutputWriteFailed, got {other:?}"),
        }
    }

    #[test]
    fn link_renders_with_prefix() {
        let link = FileLink::new(OUTPUT_FILENAME);
        assert_eq!(
            link.to_html(),
            "Click here to download: <a href='sales_proposal.html' target='_blank'>sales_proposal.html</a><br>"
        );
        assert_eq!(
            link.to_string(),
            "Click here to download: sales_proposal.html"
        );
    }
}
