//! Core content logic for the portfolio site and its admin editor.
//! This crate owns the document shape, editing rules and persistence.

pub mod auth;
pub mod config;
pub mod editor;
pub mod ids;
pub mod kpi;
pub mod logging;
pub mod model;
pub mod schema;
pub mod service;
pub mod storage;
pub mod store;

pub use auth::{AccessError, AccessGate};
pub use config::{ConfigError, FolioConfig};
pub use editor::{ChartPointEdit, EditTarget, EditorError, ProjectEditor, RecordEditor};
pub use ids::{IdClock, SequenceIdClock, SystemIdClock};
pub use kpi::derive_kpis;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::portfolio::{BlogPost, Credential, ExpertiseItem, PortfolioDocument, Testimonial};
pub use model::project::{ChartPoint, Kpi, Project, ProjectCategory, RecordId};
pub use model::section::{resolve_natural_key, KeyField, KeyValue, SectionRecord};
pub use schema::{fields, fields_by_name, FieldKind, FieldSpec, FormRecord, FormValue, Section};
pub use service::gallery_service::{
    filter_projects, project_cards, related_projects, CategoryFilter, ProjectCard,
};
pub use service::section_service::{SaveOutcome, SectionService};
pub use storage::{LocalStorage, MemoryLocalStorage, SqliteLocalStorage, StorageError};
pub use store::{
    DocumentSource, FileDocumentSource, LoadOrigin, PortfolioStore, StaticDocumentSource,
    StoreError, StoreResult, EXPORT_FILE_NAME, STORAGE_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
