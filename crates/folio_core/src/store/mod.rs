//! Content store: the one in-memory portfolio document and its lifecycle.
//!
//! # Responsibility
//! - Load the persisted working copy, falling back to the bundled default.
//! - Re-persist the whole document after every mutation.
//! - Export the document for redeploy and reset to the bundled default.
//!
//! # Invariants
//! - A mutation is applied to a draft, persisted, then swapped in; a failed
//!   persist leaves the in-memory document unchanged.
//! - `dirty` is set by every mutation and cleared only by export or reset.
//! - Load failures are terminal for the caller; nothing is retried.

pub mod source;

use crate::ids::{IdClock, SystemIdClock};
use crate::model::portfolio::PortfolioDocument;
use crate::storage::{LocalStorage, StorageError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use source::{DocumentSource, FileDocumentSource, StaticDocumentSource, DEFAULT_BUNDLE_PATH};

/// Local storage key holding the working copy.
pub const STORAGE_KEY: &str = "portfolio-data";
/// File name of the export artifact.
pub const EXPORT_FILE_NAME: &str = "portfolio-data.json";

pub type StoreResult<T> = Result<T, StoreError>;

/// Where the current document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Persisted,
    Bundled,
}

impl LoadOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persisted => "persisted",
            Self::Bundled => "bundled",
        }
    }
}

/// Why the initial load failed.
#[derive(Debug)]
pub enum LoadError {
    Storage(StorageError),
    Fetch { origin: String, source: io::Error },
    Parse {
        origin: LoadOrigin,
        source: serde_json::Error,
    },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "reading persisted copy failed: {err}"),
            Self::Fetch { origin, source } => write!(f, "fetching `{origin}` failed: {source}"),
            Self::Parse { origin, source } => {
                write!(f, "{} document is not valid: {source}", origin.as_str())
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Fetch { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Load(LoadError),
    Storage(StorageError),
    Encode(serde_json::Error),
    Export { path: PathBuf, source: io::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load portfolio data: {err}"),
            Self::Storage(err) => write!(f, "failed to persist portfolio data: {err}"),
            Self::Encode(err) => write!(f, "failed to encode portfolio data: {err}"),
            Self::Export { path, source } => {
                write!(f, "failed to write export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Export { source, .. } => Some(source),
        }
    }
}

impl From<LoadError> for StoreError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Owner of the working document, its persistence slot and its source.
pub struct PortfolioStore<S: LocalStorage, D: DocumentSource> {
    storage: S,
    source: D,
    document: PortfolioDocument,
    origin: LoadOrigin,
    dirty: bool,
    ids: Box<dyn IdClock>,
}

impl<S: LocalStorage, D: DocumentSource> PortfolioStore<S, D> {
    /// Loads the persisted copy when present, else the bundled document.
    ///
    /// # Errors
    /// - `StoreError::Load` when storage cannot be read, the bundle cannot be
    ///   fetched, or either copy fails to parse.
    pub fn load(storage: S, source: D) -> StoreResult<Self> {
        let started_at = Instant::now();
        match load_document(&storage, &source) {
            Ok((document, origin)) => {
                info!(
                    "event=store_load module=store status=ok origin={} records={} duration_ms={}",
                    origin.as_str(),
                    document.record_count(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    storage,
                    source,
                    document,
                    origin,
                    dirty: false,
                    ids: Box::new(SystemIdClock::new()),
                })
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Replaces the id source used for freshly created records.
    pub fn with_id_clock(mut self, ids: impl IdClock + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Current snapshot for read-only consumers.
    pub fn document(&self) -> &PortfolioDocument {
        &self.document
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    /// Whether there are local changes not yet exported.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn id_clock(&self) -> &dyn IdClock {
        self.ids.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Applies one mutation, persists the full document and marks it dirty.
    ///
    /// `apply` works on a draft copy; the draft replaces the current document
    /// only after it has been persisted.
    pub fn mutate<T>(
        &mut self,
        apply: impl FnOnce(&mut PortfolioDocument, &dyn IdClock) -> T,
    ) -> StoreResult<T> {
        let mut draft = self.document.clone();
        let output = apply(&mut draft, self.ids.as_ref());
        self.persist(&draft)?;
        self.document = draft;
        self.dirty = true;
        Ok(output)
    }

    /// Serializes the document for export and clears the dirty flag.
    ///
    /// Uses two-space indentation.
    pub fn export_json(&mut self) -> StoreResult<String> {
        let json = serde_json::to_string_pretty(&self.document)?;
        self.dirty = false;
        info!(
            "event=store_export module=store status=ok target=memory bytes={}",
            json.len()
        );
        Ok(json)
    }

    /// Writes `portfolio-data.json` into `dir` and clears the dirty flag.
    ///
    /// Returns the written file path.
    pub fn export_to_dir(&mut self, dir: impl AsRef<Path>) -> StoreResult<PathBuf> {
        let dir = dir.as_ref();
        let path = dir.join(EXPORT_FILE_NAME);
        let json = serde_json::to_string_pretty(&self.document)?;

        std::fs::create_dir_all(dir)
            .and_then(|()| std::fs::write(&path, json.as_bytes()))
            .map_err(|source| {
                error!(
                    "event=store_export module=store status=error path={} error={}",
                    path.display(),
                    source
                );
                StoreError::Export {
                    path: path.clone(),
                    source,
                }
            })?;

        self.dirty = false;
        info!(
            "event=store_export module=store status=ok target=file path={} bytes={}",
            path.display(),
            json.len()
        );
        Ok(path)
    }

    /// Discards the persisted copy and reloads the bundled document.
    ///
    /// Does nothing unless `confirmed`; returns whether a reset happened.
    /// The persisted copy is kept when the bundle cannot be loaded.
    pub fn reset(&mut self, confirmed: bool) -> StoreResult<bool> {
        if !confirmed {
            info!("event=store_reset module=store status=skipped reason=not_confirmed");
            return Ok(false);
        }

        let document = fetch_bundled(&self.source)?;
        self.storage.remove_item(STORAGE_KEY)?;
        self.document = document;
        self.origin = LoadOrigin::Bundled;
        self.dirty = false;
        info!(
            "event=store_reset module=store status=ok records={}",
            self.document.record_count()
        );
        Ok(true)
    }

    /// Navigation guard: leaving is free when clean, otherwise the operator
    /// decides through `prompt`.
    pub fn confirm_leave(&self, prompt: impl FnOnce() -> bool) -> bool {
        if !self.dirty {
            return true;
        }
        let leave = prompt();
        if leave {
            warn!("event=store_leave module=store status=ok unsaved_changes=discarded");
        }
        leave
    }

    fn persist(&mut self, document: &PortfolioDocument) -> StoreResult<()> {
        let json = serde_json::to_string(document)?;
        if let Err(err) = self.storage.set_item(STORAGE_KEY, &json) {
            error!(
                "event=store_persist module=store status=error key={} error={}",
                STORAGE_KEY, err
            );
            return Err(err.into());
        }
        info!(
            "event=store_persist module=store status=ok key={} bytes={}",
            STORAGE_KEY,
            json.len()
        );
        Ok(())
    }
}

fn load_document<S: LocalStorage, D: DocumentSource>(
    storage: &S,
    source: &D,
) -> Result<(PortfolioDocument, LoadOrigin), LoadError> {
    match storage.get_item(STORAGE_KEY).map_err(LoadError::Storage)? {
        Some(raw) => {
            let document = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
                origin: LoadOrigin::Persisted,
                source,
            })?;
            Ok((document, LoadOrigin::Persisted))
        }
        None => Ok((fetch_bundled(source)?, LoadOrigin::Bundled)),
    }
}

fn fetch_bundled<D: DocumentSource>(source: &D) -> Result<PortfolioDocument, LoadError> {
    let raw = source.fetch().map_err(|err| LoadError::Fetch {
        origin: source.describe(),
        source: err,
    })?;
    serde_json::from_str(&raw).map_err(|err| LoadError::Parse {
        origin: LoadOrigin::Bundled,
        source: err,
    })
}
