//! Portfolio content domain model.
//!
//! # Responsibility
//! - Define the document shape shared by the public site and the editor.
//! - Keep serialized field names identical to the bundled JSON document.
//!
//! # Invariants
//! - The document is always held in memory as one complete value.
//! - Id-bearing collections (`projects`, `blogPosts`) use `0` for "no id yet".
//! - Collections without ids are identified by a natural key
//!   (see [`section::resolve_natural_key`]).

pub mod portfolio;
pub mod project;
pub mod section;
