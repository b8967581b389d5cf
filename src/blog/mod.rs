//! Blog listing - post extraction, facets and the filter/sort pipeline

mod extract;
mod facets;
mod filter;
mod selection;

pub use extract::extract;
pub use facets::{derive_facet, FacetField, Facets};
pub use filter::{apply, compare_titles, FilteredView};
pub use selection::{Action, ParseSortKeyError, Selection, SortKey};

use serde::Serialize;

use crate::content::{PageDescriptor, Post};

/// The posts of one language together with their facets
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub lang: String,
    pub posts: Vec<Post>,
    pub facets: Facets,
}

impl Catalog {
    /// Extract posts from `pages` and derive their facets
    pub fn from_pages(pages: &[PageDescriptor], lang: &str) -> Self {
        let posts = extract(pages, lang);
        let facets = Facets::from_posts(&posts);
        Self {
            lang: lang.to_string(),
            posts,
            facets,
        }
    }

    /// Run the pipeline over this catalog
    pub fn view(&self, selection: &Selection) -> FilteredView {
        FilteredView::new(&self.posts, selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FrontMatter, PageData};

    #[test]
    fn test_catalog_from_pages() {
        let page = |slug: &str, category: &str, date: &str| {
            PageDescriptor::new(
                format!("/en/docs/{}", slug),
                vec![slug.to_string()],
                PageData::new(FrontMatter {
                    category: Some(category.to_string()),
                    date: Some(date.to_string()),
                    ..Default::default()
                }),
            )
        };
        let pages = vec![
            page("index", "ignored", "2030-01-01"),
            page("older", "development", "2023-01-01"),
            page("newer", "ai-ml", "2024-01-01"),
        ];

        let catalog = Catalog::from_pages(&pages, "en");
        assert_eq!(catalog.lang, "en");
        assert_eq!(catalog.posts.len(), 2);
        assert_eq!(catalog.posts[0].slug, "newer");
        assert_eq!(catalog.facets.categories, vec!["ai-ml", "development"]);

        let selection = Selection::default().reduce(Action::ToggleCategory("development".into()));
        let view = catalog.view(&selection);
        assert_eq!(view.total, 1);
        assert_eq!(view.posts[0].slug, "older");
    }
}
