//! Use-case services over the content store.
//!
//! # Responsibility
//! - `section_service`: list CRUD for the admin screen.
//! - `gallery_service`: read-only queries for the public site.

pub mod gallery_service;
pub mod section_service;
