//! Post model

use serde::{Deserialize, Serialize};

use crate::helpers::{self, DateKey};

/// Title used when a page carries none
pub const UNTITLED: &str = "Untitled";

/// A normalized blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (the source page URL)
    pub id: String,

    /// Post title
    pub title: String,

    /// Short summary
    pub description: String,

    /// Publication date as written in the source, empty when unknown
    pub date: String,

    /// Post category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Difficulty level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,

    /// Post tags, in source order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Slug segments joined with `/`
    pub slug: String,

    /// URL path
    pub url: String,

    /// Post language
    pub lang: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(url: impl Into<String>, slugs: &[String], lang: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: url.clone(),
            title: UNTITLED.to_string(),
            description: String::new(),
            date: String::new(),
            category: None,
            difficulty: None,
            tags: Vec::new(),
            slug: slugs.join("/"),
            url,
            lang: lang.into(),
            author: None,
            image: None,
        }
    }

    /// Sort key for the publication date
    pub fn date_key(&self) -> DateKey {
        DateKey::parse(&self.date)
    }

    /// Whether title, description, a tag or the author contains `needle`.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self
                .author
                .as_ref()
                .is_some_and(|a| a.to_lowercase().contains(needle))
    }

    /// Publication date formatted for the post's language
    pub fn display_date(&self) -> String {
        helpers::format_date(&self.date, &self.lang)
    }

    /// Image path with any language prefix removed
    pub fn image_url(&self) -> Option<String> {
        self.image.as_deref().map(helpers::normalize_image_url)
    }
}
