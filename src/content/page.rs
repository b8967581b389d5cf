//! Page descriptors handed over by a content source

use serde::Deserialize;

use super::PageData;

/// A content page as produced by a content source: its URL, its slug
/// segments and its loosely-typed metadata bag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageDescriptor {
    pub url: String,
    #[serde(default)]
    pub slugs: Vec<String>,
    #[serde(default)]
    pub data: PageData,
}

impl PageDescriptor {
    pub fn new(url: impl Into<String>, slugs: Vec<String>, data: PageData) -> Self {
        Self {
            url: url.into(),
            slugs,
            data,
        }
    }

    /// Index and landing pages are structural, not content. A page
    /// without a URL can't be linked to and is never content either.
    pub fn is_content(&self) -> bool {
        !self.url.is_empty()
            && !self.slugs.is_empty()
            && !self.slugs.iter().any(|s| s == "index")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(slugs: &[&str]) -> PageDescriptor {
        PageDescriptor::new(
            "/en/docs/x",
            slugs.iter().map(|s| s.to_string()).collect(),
            PageData::default(),
        )
    }

    #[test]
    fn test_is_content() {
        assert!(page(&["intro"]).is_content());
        assert!(page(&["guides", "setup"]).is_content());
        assert!(!page(&[]).is_content());
        assert!(!page(&["index"]).is_content());
        assert!(!page(&["guides", "index"]).is_content());
        assert!(page(&["indexing"]).is_content());
    }

    #[test]
    fn test_page_without_url_is_not_content() {
        let page = PageDescriptor::new("", vec!["intro".to_string()], PageData::default());
        assert!(!page.is_content());
    }

    #[test]
    fn test_deserialize_descriptor() {
        let json = r#"{
            "url": "/en/docs/rag",
            "slugs": ["rag"],
            "data": { "title": "Intro to RAG", "exports": { "tags": ["rag"] } }
        }"#;
        let page: PageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(page.url, "/en/docs/rag");
        assert_eq!(page.slugs, vec!["rag"]);
        assert_eq!(page.data.front.title.as_deref(), Some("Intro to RAG"));
        assert_eq!(
            page.data.fallback().and_then(|f| f.tags.clone()),
            Some(vec!["rag".to_string()])
        );
    }
}
