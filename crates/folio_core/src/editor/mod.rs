//! Record editors: form state for creating or editing one record.
//!
//! # Responsibility
//! - Hold in-progress form values separately from the content store.
//! - Gate submission on required fields before a record is produced.
//!
//! # Invariants
//! - Editors never touch the store; finished records go to the caller's
//!   save callback.
//! - Cancelling consumes the editor, so no partial edits survive it.

pub mod project;
pub mod record;

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use project::{ChartPointEdit, ProjectEditor, ProjectForm};
pub use record::RecordEditor;

static ABSOLUTE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("valid absolute url regex")
});

/// What an editor was opened for.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget<R> {
    New,
    Existing(R),
}

impl<R> EditTarget<R> {
    pub fn is_new(&self) -> bool {
        matches!(self, Self::New)
    }
}

/// Form-level failures; none of them reach the store.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    UnknownField(String),
    InvalidNumber { field: &'static str, input: String },
    MissingRequired(&'static str),
    InvalidUrl { field: &'static str, input: String },
    ChartPointOutOfRange { index: usize, len: usize },
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown field: `{name}`"),
            Self::InvalidNumber { field, input } => {
                write!(f, "field `{field}` expects a number, got `{input}`")
            }
            Self::MissingRequired(label) => write!(f, "required field is empty: {label}"),
            Self::InvalidUrl { field, input } => {
                write!(f, "field `{field}` expects an absolute URL, got `{input}`")
            }
            Self::ChartPointOutOfRange { index, len } => write!(
                f,
                "chart point index {index} is out of range for {len} point(s)"
            ),
        }
    }
}

impl Error for EditorError {}

pub(crate) fn is_absolute_url(value: &str) -> bool {
    ABSOLUTE_URL_RE.is_match(value)
}
