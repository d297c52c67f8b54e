//! Root document and the flat (non-project) record types.

use super::project::{Project, RecordId};
use serde::{Deserialize, Serialize};

/// One service area card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertiseItem {
    pub icon_name: String,
    pub title: String,
    /// Comma-separated tool names, kept as display text.
    pub tools: String,
}

/// Professional license or certification line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    /// Job title of the author, not a heading.
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub id: RecordId,
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
    pub link: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub og_image: String,
}

/// The full persisted unit: five independently editable collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub expertise_items: Vec<ExpertiseItem>,
    #[serde(default)]
    pub credentials: Vec<Credential>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub blog_posts: Vec<BlogPost>,
}

impl PortfolioDocument {
    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.projects.len()
            + self.expertise_items.len()
            + self.credentials.len()
            + self.testimonials.len()
            + self.blog_posts.len()
    }

    pub fn project(&self, id: RecordId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }
}
