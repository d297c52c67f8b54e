//! Section field registry.
//!
//! # Responsibility
//! - Map each editable section to its ordered form field descriptors.
//! - Bind descriptors to typed record accessors (see [`bindings`]).
//!
//! # Invariants
//! - Field lists are compile-time constants; repeated lookups are equal.
//! - `Projects` has no flat field list; it uses the dedicated project editor.
//! - Unknown section names resolve to an empty list, never an error.

pub mod bindings;

use std::fmt::{Display, Formatter};

pub use bindings::{FieldBinding, FormRecord, FormValue};

/// Editable collections of the portfolio document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Projects,
    Expertise,
    Credentials,
    Testimonials,
    BlogPosts,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Self::Projects,
        Self::Expertise,
        Self::Credentials,
        Self::Testimonials,
        Self::BlogPosts,
    ];

    /// Key of the collection inside the JSON document.
    pub fn collection_key(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Expertise => "expertiseItems",
            Self::Credentials => "credentials",
            Self::Testimonials => "testimonials",
            Self::BlogPosts => "blogPosts",
        }
    }

    /// Tab label on the admin screen.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Expertise => "Expertise",
            Self::Credentials => "Credentials",
            Self::Testimonials => "Testimonials",
            Self::BlogPosts => "Blog Posts",
        }
    }

    /// Command-line spelling.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Expertise => "expertise",
            Self::Credentials => "credentials",
            Self::Testimonials => "testimonials",
            Self::BlogPosts => "blog-posts",
        }
    }

    /// Singular noun used in editor headings ("Add Blog Post").
    pub fn singular(self) -> &'static str {
        match self {
            Self::Projects => "Project",
            Self::Expertise => "Expertise Item",
            Self::Credentials => "Credential",
            Self::Testimonials => "Testimonial",
            Self::BlogPosts => "Blog Post",
        }
    }

    /// Resolves any of the collection key, display name or slug.
    pub fn from_name(name: &str) -> Option<Section> {
        let trimmed = name.trim();
        Self::ALL.into_iter().find(|section| {
            section.collection_key().eq_ignore_ascii_case(trimmed)
                || section.display_name().eq_ignore_ascii_case(trimmed)
                || section.slug().eq_ignore_ascii_case(trimmed)
        })
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Form input kind for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Url,
}

/// Descriptor for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

pub(crate) const EXPERTISE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::required("iconName", "Icon Name (e.g., WaterIcon)", FieldKind::Text),
    FieldSpec::required("tools", "Tools (comma-separated)", FieldKind::Text),
];

pub(crate) const CREDENTIAL_FIELDS: [FieldSpec; 1] =
    [FieldSpec::required("name", "Credential Name", FieldKind::Text)];

pub(crate) const TESTIMONIAL_FIELDS: [FieldSpec; 3] = [
    FieldSpec::required("quote", "Quote", FieldKind::TextArea),
    FieldSpec::required("author", "Author", FieldKind::Text),
    FieldSpec::required("title", "Author's Title", FieldKind::Text),
];

pub(crate) const BLOG_POST_FIELDS: [FieldSpec; 7] = [
    FieldSpec::required("id", "ID", FieldKind::Number),
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::required("excerpt", "Excerpt", FieldKind::TextArea),
    FieldSpec::required("imageUrl", "Image URL", FieldKind::Url),
    FieldSpec::required("link", "Post Link", FieldKind::Url),
    FieldSpec::optional("metaDescription", "SEO Meta Description", FieldKind::TextArea),
    FieldSpec::optional("ogImage", "OpenGraph Image URL", FieldKind::Url),
];

/// Returns the ordered field list for `section`.
///
/// `Projects` returns an empty slice: callers render nothing and use the
/// project editor instead.
pub fn fields(section: Section) -> &'static [FieldSpec] {
    match section {
        Section::Projects => &[],
        Section::Expertise => &EXPERTISE_FIELDS,
        Section::Credentials => &CREDENTIAL_FIELDS,
        Section::Testimonials => &TESTIMONIAL_FIELDS,
        Section::BlogPosts => &BLOG_POST_FIELDS,
    }
}

/// Name-based lookup; unknown names yield an empty slice.
pub fn fields_by_name(name: &str) -> &'static [FieldSpec] {
    match Section::from_name(name) {
        Some(section) => fields(section),
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::{fields, fields_by_name, FieldKind, Section};

    #[test]
    fn flat_sections_have_non_empty_field_lists() {
        for section in Section::ALL {
            let list = fields(section);
            if section == Section::Projects {
                assert!(list.is_empty());
            } else {
                assert!(!list.is_empty(), "{section} should have fields");
            }
        }
    }

    #[test]
    fn lookup_by_name_accepts_all_spellings() {
        assert_eq!(fields_by_name("blogPosts"), fields(Section::BlogPosts));
        assert_eq!(fields_by_name("Blog Posts"), fields(Section::BlogPosts));
        assert_eq!(fields_by_name("blog-posts"), fields(Section::BlogPosts));
        assert!(fields_by_name("Gallery").is_empty());
    }

    #[test]
    fn blog_post_seo_fields_are_optional() {
        let optional: Vec<&str> = fields(Section::BlogPosts)
            .iter()
            .filter(|field| !field.required)
            .map(|field| field.name)
            .collect();
        assert_eq!(optional, vec!["metaDescription", "ogImage"]);
        assert_eq!(fields(Section::BlogPosts)[0].kind, FieldKind::Number);
    }
}
