//! Facet lists derived from posts

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::content::Post;

/// A classification field posts can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetField {
    Category,
    Difficulty,
    Tags,
}

/// Distinct non-empty values of `field` across `posts`, in code-point order
pub fn derive_facet(posts: &[Post], field: FacetField) -> Vec<String> {
    let mut values = BTreeSet::new();

    for post in posts {
        match field {
            FacetField::Category => values.extend(post.category.as_deref()),
            FacetField::Difficulty => values.extend(post.difficulty.as_deref()),
            FacetField::Tags => values.extend(post.tags.iter().map(String::as_str)),
        }
    }

    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// The filter options offered for a set of posts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
    pub tags: Vec<String>,
}

impl Facets {
    pub fn from_posts(posts: &[Post]) -> Self {
        Self {
            categories: derive_facet(posts, FacetField::Category),
            difficulties: derive_facet(posts, FacetField::Difficulty),
            tags: derive_facet(posts, FacetField::Tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(category: Option<&str>, difficulty: Option<&str>, tags: &[&str]) -> Post {
        let mut post = Post::new("/en/docs/p", &["p".to_string()], "en");
        post.category = category.map(str::to_string);
        post.difficulty = difficulty.map(str::to_string);
        post.tags = tags.iter().map(|t| t.to_string()).collect();
        post
    }

    #[test]
    fn test_empty_posts() {
        assert!(derive_facet(&[], FacetField::Category).is_empty());
        assert_eq!(Facets::from_posts(&[]), Facets::default());
    }

    #[test]
    fn test_sorted_unique_without_empty() {
        let posts = vec![
            post(Some("development"), Some("advanced"), &["sdk", "rust"]),
            post(Some("ai-ml"), None, &["rag", "sdk", ""]),
            post(Some(""), Some("beginner"), &[]),
            post(None, Some("advanced"), &["ai-ml"]),
            post(Some("development"), None, &["Rust"]),
        ];

        assert_eq!(
            derive_facet(&posts, FacetField::Category),
            vec!["ai-ml", "development"]
        );
        assert_eq!(
            derive_facet(&posts, FacetField::Difficulty),
            vec!["advanced", "beginner"]
        );
        // code-point order: uppercase before lowercase
        assert_eq!(
            derive_facet(&posts, FacetField::Tags),
            vec!["Rust", "ai-ml", "rag", "rust", "sdk"]
        );
    }

    #[test]
    fn test_facets_bundle() {
        let posts = vec![post(Some("guide"), Some("intermediate"), &["cli"])];
        let facets = Facets::from_posts(&posts);
        assert_eq!(facets.categories, vec!["guide"]);
        assert_eq!(facets.difficulties, vec!["intermediate"]);
        assert_eq!(facets.tags, vec!["cli"]);
    }
}
