//! Typed accessors behind each registry field.
//!
//! Every flat record type binds its field descriptors to plain function
//! pointers once, at definition time, so editors never index records by
//! string name.

use super::{FieldSpec, BLOG_POST_FIELDS, CREDENTIAL_FIELDS, EXPERTISE_FIELDS, TESTIMONIAL_FIELDS};
use crate::model::portfolio::{BlogPost, Credential, ExpertiseItem, Testimonial};
use crate::model::project::RecordId;
use crate::model::section::SectionRecord;
use std::fmt::{Display, Formatter};

/// Current value of one form input.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    Number(f64),
}

impl FormValue {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }

    /// Zero renders as a blank input, matching how empty records open.
    pub fn number_or_blank(value: f64) -> Self {
        if value == 0.0 {
            Self::Text(String::new())
        } else {
            Self::Number(value)
        }
    }

    /// Blank means "nothing entered"; numbers are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Number(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(value) => format_plain_number(value),
        }
    }
}

impl Display for FormValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => f.write_str(&format_plain_number(*value)),
        }
    }
}

fn format_plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn number_to_id(value: FormValue) -> RecordId {
    value.as_number().map_or(0, |number| number.trunc() as RecordId)
}

/// One field descriptor plus typed read/write access into `R`.
pub struct FieldBinding<R> {
    pub spec: FieldSpec,
    pub read: fn(&R) -> FormValue,
    pub write: fn(&mut R, FormValue),
}

/// A flat record that the generic record editor can edit.
pub trait FormRecord: SectionRecord + Default + 'static {
    fn bindings() -> &'static [FieldBinding<Self>];
}

static EXPERTISE_BINDINGS: [FieldBinding<ExpertiseItem>; 3] = [
    FieldBinding {
        spec: EXPERTISE_FIELDS[0],
        read: |item| FormValue::text(&item.title),
        write: |item, value| item.title = value.into_text(),
    },
    FieldBinding {
        spec: EXPERTISE_FIELDS[1],
        read: |item| FormValue::text(&item.icon_name),
        write: |item, value| item.icon_name = value.into_text(),
    },
    FieldBinding {
        spec: EXPERTISE_FIELDS[2],
        read: |item| FormValue::text(&item.tools),
        write: |item, value| item.tools = value.into_text(),
    },
];

static CREDENTIAL_BINDINGS: [FieldBinding<Credential>; 1] = [FieldBinding {
    spec: CREDENTIAL_FIELDS[0],
    read: |credential| FormValue::text(&credential.name),
    write: |credential, value| credential.name = value.into_text(),
}];

static TESTIMONIAL_BINDINGS: [FieldBinding<Testimonial>; 3] = [
    FieldBinding {
        spec: TESTIMONIAL_FIELDS[0],
        read: |testimonial| FormValue::text(&testimonial.quote),
        write: |testimonial, value| testimonial.quote = value.into_text(),
    },
    FieldBinding {
        spec: TESTIMONIAL_FIELDS[1],
        read: |testimonial| FormValue::text(&testimonial.author),
        write: |testimonial, value| testimonial.author = value.into_text(),
    },
    FieldBinding {
        spec: TESTIMONIAL_FIELDS[2],
        read: |testimonial| FormValue::text(&testimonial.title),
        write: |testimonial, value| testimonial.title = value.into_text(),
    },
];

static BLOG_POST_BINDINGS: [FieldBinding<BlogPost>; 7] = [
    FieldBinding {
        spec: BLOG_POST_FIELDS[0],
        read: |post| FormValue::number_or_blank(post.id as f64),
        write: |post, value| post.id = number_to_id(value),
    },
    FieldBinding {
        spec: BLOG_POST_FIELDS[1],
        read: |post| FormValue::text(&post.title),
        write: |post, value| post.title = value.into_text(),
    },
    FieldBinding {
        spec: BLOG_POST_FIELDS[2],
        read: |post| FormValue::text(&post.excerpt),
        write: |post, value| post.excerpt = value.into_text(),
    },
    FieldBinding {
        spec: BLOG_POST_FIELDS[3],
        read: |post| FormValue::text(&post.image_url),
        write: |post, value| post.image_url = value.into_text(),
    },
    FieldBinding {
        spec: BLOG_POST_FIELDS[4],
        read: |post| FormValue::text(&post.link),
        write: |post, value| post.link = value.into_text(),
    },
    FieldBinding {
        spec: BLOG_POST_FIELDS[5],
        read: |post| FormValue::text(&post.meta_description),
        write: |post, value| post.meta_description = value.into_text(),
    },
    FieldBinding {
        spec: BLOG_POST_FIELDS[6],
        read: |post| FormValue::text(&post.og_image),
        write: |post, value| post.og_image = value.into_text(),
    },
];

impl FormRecord for ExpertiseItem {
    fn bindings() -> &'static [FieldBinding<Self>] {
        &EXPERTISE_BINDINGS
    }
}

impl FormRecord for Credential {
    fn bindings() -> &'static [FieldBinding<Self>] {
        &CREDENTIAL_BINDINGS
    }
}

impl FormRecord for Testimonial {
    fn bindings() -> &'static [FieldBinding<Self>] {
        &TESTIMONIAL_BINDINGS
    }
}

impl FormRecord for BlogPost {
    fn bindings() -> &'static [FieldBinding<Self>] {
        &BLOG_POST_BINDINGS
    }
}
