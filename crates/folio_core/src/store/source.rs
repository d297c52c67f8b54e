//! Bundled default document sources.

use std::io;
use std::path::{Path, PathBuf};

/// Default location of the bundled document, relative to the site root.
pub const DEFAULT_BUNDLE_PATH: &str = "public/portfolio-data.json";

/// Supplies the raw JSON of the bundled default document.
pub trait DocumentSource {
    fn fetch(&self) -> io::Result<String>;

    /// Human-readable origin for diagnostics.
    fn describe(&self) -> String;
}

/// Reads the bundled document from a file on disk.
#[derive(Debug, Clone)]
pub struct FileDocumentSource {
    path: PathBuf,
}

impl FileDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileDocumentSource {
    fn default() -> Self {
        Self::new(DEFAULT_BUNDLE_PATH)
    }
}

impl DocumentSource for FileDocumentSource {
    fn fetch(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed JSON string; used for embedded defaults and tests.
#[derive(Debug, Clone)]
pub struct StaticDocumentSource {
    json: String,
}

impl StaticDocumentSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl DocumentSource for StaticDocumentSource {
    fn fetch(&self) -> io::Result<String> {
        Ok(self.json.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}
