//! Binding between record types and the document collections they live in.
//!
//! # Responsibility
//! - Resolve a record type to its collection inside [`PortfolioDocument`].
//! - Expose id and natural-key fields without runtime string indexing.
//!
//! # Invariants
//! - Key resolution order is `id`, then `title`, then `name`, then `author`.
//! - A field counts as present only when non-empty (text) or non-zero (id).

use super::portfolio::{BlogPost, Credential, ExpertiseItem, PortfolioDocument, Testimonial};
use super::project::{Project, RecordId};
use crate::schema::Section;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Fields that may identify a record, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    Id,
    Title,
    Name,
    Author,
}

impl KeyField {
    pub const RESOLUTION_ORDER: [KeyField; 4] =
        [Self::Id, Self::Title, Self::Name, Self::Author];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Name => "name",
            Self::Author => "author",
        }
    }
}

/// Value of a record at one [`KeyField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValue {
    Id(RecordId),
    Text(String),
}

impl Display for KeyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// A record type stored in one collection of the document.
pub trait SectionRecord: Clone + PartialEq + Serialize + DeserializeOwned {
    const SECTION: Section;
    /// Whether records of this type carry a numeric `id` field.
    const HAS_ID: bool;

    fn collection(doc: &PortfolioDocument) -> &Vec<Self>;
    fn collection_mut(doc: &mut PortfolioDocument) -> &mut Vec<Self>;

    /// Returns the id when the type has one and it is set (non-zero).
    fn record_id(&self) -> Option<RecordId> {
        None
    }

    fn assign_id(&mut self, _id: RecordId) {}

    /// Returns this record's value at `field`, or `None` when absent/blank.
    fn key_value(&self, field: KeyField) -> Option<KeyValue>;

    /// One-line label for listings.
    fn display_label(&self) -> String;
}

/// Resolves the first present key field and its value.
///
/// Returns `None` when the record has none of the key fields set.
pub fn resolve_natural_key<R: SectionRecord>(record: &R) -> Option<(KeyField, KeyValue)> {
    KeyField::RESOLUTION_ORDER
        .into_iter()
        .find_map(|field| record.key_value(field).map(|value| (field, value)))
}

fn present_text(value: &str) -> Option<KeyValue> {
    if value.is_empty() {
        None
    } else {
        Some(KeyValue::Text(value.to_string()))
    }
}

fn present_id(id: RecordId) -> Option<RecordId> {
    if id == 0 {
        None
    } else {
        Some(id)
    }
}

impl SectionRecord for Project {
    const SECTION: Section = Section::Projects;
    const HAS_ID: bool = true;

    fn collection(doc: &PortfolioDocument) -> &Vec<Self> {
        &doc.projects
    }

    fn collection_mut(doc: &mut PortfolioDocument) -> &mut Vec<Self> {
        &mut doc.projects
    }

    fn record_id(&self) -> Option<RecordId> {
        present_id(self.id)
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn key_value(&self, field: KeyField) -> Option<KeyValue> {
        match field {
            KeyField::Id => present_id(self.id).map(KeyValue::Id),
            KeyField::Title => present_text(&self.title),
            KeyField::Name | KeyField::Author => None,
        }
    }

    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.title, self.category, self.year)
    }
}

impl SectionRecord for ExpertiseItem {
    const SECTION: Section = Section::Expertise;
    const HAS_ID: bool = false;

    fn collection(doc: &PortfolioDocument) -> &Vec<Self> {
        &doc.expertise_items
    }

    fn collection_mut(doc: &mut PortfolioDocument) -> &mut Vec<Self> {
        &mut doc.expertise_items
    }

    fn key_value(&self, field: KeyField) -> Option<KeyValue> {
        match field {
            KeyField::Title => present_text(&self.title),
            _ => None,
        }
    }

    fn display_label(&self) -> String {
        format!("{} [{}]", self.title, self.tools)
    }
}

impl SectionRecord for Credential {
    const SECTION: Section = Section::Credentials;
    const HAS_ID: bool = false;

    fn collection(doc: &PortfolioDocument) -> &Vec<Self> {
        &doc.credentials
    }

    fn collection_mut(doc: &mut PortfolioDocument) -> &mut Vec<Self> {
        &mut doc.credentials
    }

    fn key_value(&self, field: KeyField) -> Option<KeyValue> {
        match field {
            KeyField::Name => present_text(&self.name),
            _ => None,
        }
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }
}

impl SectionRecord for Testimonial {
    const SECTION: Section = Section::Testimonials;
    const HAS_ID: bool = false;

    fn collection(doc: &PortfolioDocument) -> &Vec<Self> {
        &doc.testimonials
    }

    fn collection_mut(doc: &mut PortfolioDocument) -> &mut Vec<Self> {
        &mut doc.testimonials
    }

    // `title` here is the author's job title; it still wins over `author`
    // in the resolution order.
    fn key_value(&self, field: KeyField) -> Option<KeyValue> {
        match field {
            KeyField::Title => present_text(&self.title),
            KeyField::Author => present_text(&self.author),
            _ => None,
        }
    }

    fn display_label(&self) -> String {
        format!("{}, {}", self.author, self.title)
    }
}

impl SectionRecord for BlogPost {
    const SECTION: Section = Section::BlogPosts;
    const HAS_ID: bool = true;

    fn collection(doc: &PortfolioDocument) -> &Vec<Self> {
        &doc.blog_posts
    }

    fn collection_mut(doc: &mut PortfolioDocument) -> &mut Vec<Self> {
        &mut doc.blog_posts
    }

    fn record_id(&self) -> Option<RecordId> {
        present_id(self.id)
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn key_value(&self, field: KeyField) -> Option<KeyValue> {
        match field {
            KeyField::Id => present_id(self.id).map(KeyValue::Id),
            KeyField::Title => present_text(&self.title),
            KeyField::Name | KeyField::Author => None,
        }
    }

    fn display_label(&self) -> String {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_natural_key, KeyField, KeyValue};
    use crate::model::portfolio::{BlogPost, Credential, Testimonial};

    #[test]
    fn id_wins_over_title_when_set() {
        let post = BlogPost {
            id: 42,
            title: "Flood maps".to_string(),
            ..BlogPost::default()
        };
        assert_eq!(
            resolve_natural_key(&post),
            Some((KeyField::Id, KeyValue::Id(42)))
        );
    }

    #[test]
    fn zero_id_falls_through_to_title() {
        let post = BlogPost {
            title: "Flood maps".to_string(),
            ..BlogPost::default()
        };
        assert_eq!(
            resolve_natural_key(&post),
            Some((KeyField::Title, KeyValue::Text("Flood maps".to_string())))
        );
    }

    #[test]
    fn testimonial_resolves_job_title_before_author() {
        let testimonial = Testimonial {
            quote: "q".to_string(),
            author: "Jane".to_string(),
            title: "City Engineer".to_string(),
        };
        assert_eq!(resolve_natural_key(&testimonial).unwrap().0, KeyField::Title);

        let untitled = Testimonial {
            title: String::new(),
            ..testimonial
        };
        assert_eq!(resolve_natural_key(&untitled).unwrap().0, KeyField::Author);
    }

    #[test]
    fn blank_record_has_no_key() {
        assert_eq!(resolve_natural_key(&Credential::default()), None);
    }
}
