//! Post extraction - normalizes content pages into posts

use crate::content::{PageDescriptor, Post};

/// Turn the pages of one language into posts, newest first.
///
/// Index pages and pages without a URL are skipped. Missing metadata
/// falls back to the post defaults; nothing here fails. Without a language
/// there are no posts.
pub fn extract(pages: &[PageDescriptor], lang: &str) -> Vec<Post> {
    if lang.trim().is_empty() {
        tracing::debug!("No language given, skipping {} pages", pages.len());
        return Vec::new();
    }

    let mut keyed: Vec<_> = pages
        .iter()
        .filter(|page| {
            if page.url.is_empty() {
                tracing::debug!("Skipping page without url: {:?}", page.slugs);
            }
            page.is_content()
        })
        .map(|page| {
            let post = to_post(page, lang);
            (post.date_key(), post)
        })
        .collect();

    // Stable: equal keys keep encounter order
    keyed.sort_by(|(a, _), (b, _)| a.cmp_newest(b));

    let posts: Vec<Post> = keyed.into_iter().map(|(_, post)| post).collect();
    tracing::debug!(
        "Extracted {} posts from {} pages ({})",
        posts.len(),
        pages.len(),
        lang
    );
    posts
}

fn to_post(page: &PageDescriptor, lang: &str) -> Post {
    let data = &page.data;
    let mut post = Post::new(page.url.clone(), &page.slugs, lang);

    if let Some(title) = data.lookup(|fm| fm.title.as_ref()) {
        post.title = title.clone();
    }
    post.description = data
        .lookup(|fm| fm.description.as_ref())
        .cloned()
        .unwrap_or_default();
    post.date = data
        .lookup(|fm| fm.published_date.as_ref())
        .or_else(|| data.lookup(|fm| fm.date.as_ref()))
        .cloned()
        .unwrap_or_default();
    post.category = data.lookup(|fm| fm.category.as_ref()).cloned();
    post.difficulty = data.lookup(|fm| fm.difficulty.as_ref()).cloned();
    post.tags = data
        .lookup(|fm| fm.tags.as_ref())
        .cloned()
        .unwrap_or_default();
    post.author = data.lookup(|fm| fm.author.as_ref()).cloned();
    post.image = data.lookup(|fm| fm.image.as_ref()).cloned();

    post
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FrontMatter, PageData, UNTITLED};

    fn page(slugs: &[&str], front: FrontMatter) -> PageDescriptor {
        let slugs: Vec<String> = slugs.iter().map(|s| s.to_string()).collect();
        let url = format!("/en/docs/{}", slugs.join("/"));
        PageDescriptor::new(url, slugs, PageData::new(front))
    }

    fn dated(slug: &str, date: &str) -> PageDescriptor {
        page(
            &[slug],
            FrontMatter {
                date: Some(date.to_string()),
                ..Default::default()
            },
        )
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_skips_index_and_empty_slugs() {
        let pages = vec![
            page(&[], FrontMatter::default()),
            page(&["index"], FrontMatter::default()),
            page(&["guides", "index"], FrontMatter::default()),
            page(&["guides", "setup"], FrontMatter::default()),
        ];

        let posts = extract(&pages, "en");
        assert_eq!(slugs(&posts), vec!["guides/setup"]);
    }

    #[test]
    fn test_defaults() {
        let posts = extract(&[page(&["bare"], FrontMatter::default())], "fr");
        let post = &posts[0];

        assert_eq!(post.id, "/en/docs/bare");
        assert_eq!(post.url, post.id);
        assert_eq!(post.lang, "fr");
        assert_eq!(post.title, UNTITLED);
        assert_eq!(post.description, "");
        assert_eq!(post.date, "");
        assert_eq!(post.category, None);
        assert_eq!(post.difficulty, None);
        assert!(post.tags.is_empty());
        assert_eq!(post.author, None);
        assert_eq!(post.image, None);
    }

    #[test]
    fn test_fields_resolve_direct_then_exports() {
        let front = FrontMatter {
            title: Some("Direct title".to_string()),
            category: Some("development".to_string()),
            ..Default::default()
        };
        let exports = FrontMatter {
            title: Some("Exported title".to_string()),
            category: Some("ai-ml".to_string()),
            difficulty: Some("advanced".to_string()),
            tags: Some(vec!["rag".to_string(), "rag".to_string()]),
            author: Some("Ada".to_string()),
            image: Some("/en/images/rag.png".to_string()),
            description: Some("From exports".to_string()),
            ..Default::default()
        };
        let pages = vec![PageDescriptor::new(
            "/en/docs/rag",
            vec!["rag".to_string()],
            PageData::with_exports(front, exports),
        )];

        let post = &extract(&pages, "en")[0];
        assert_eq!(post.title, "Direct title");
        assert_eq!(post.category.as_deref(), Some("development"));
        assert_eq!(post.difficulty.as_deref(), Some("advanced"));
        assert_eq!(post.description, "From exports");
        assert_eq!(post.tags, vec!["rag", "rag"]);
        assert_eq!(post.author.as_deref(), Some("Ada"));
        assert_eq!(post.image.as_deref(), Some("/en/images/rag.png"));
    }

    #[test]
    fn test_published_date_wins_over_date() {
        let pages = vec![
            page(
                &["both"],
                FrontMatter {
                    published_date: Some("2024-05-01".to_string()),
                    date: Some("2020-01-01".to_string()),
                    ..Default::default()
                },
            ),
            page(
                &["date-only"],
                FrontMatter {
                    date: Some("2021-01-01".to_string()),
                    ..Default::default()
                },
            ),
        ];

        let posts = extract(&pages, "en");
        assert_eq!(posts[0].date, "2024-05-01");
        assert_eq!(posts[1].date, "2021-01-01");
    }

    #[test]
    fn test_sorted_newest_first_with_empty_dates_last() {
        let pages = vec![
            dated("undated-a", ""),
            dated("old", "2022-03-01"),
            page(&["undated-b"], FrontMatter::default()),
            dated("new", "2024-07-15"),
            dated("mid", "2023-11-30"),
        ];

        let posts = extract(&pages, "en");
        assert_eq!(
            slugs(&posts),
            vec!["new", "mid", "old", "undated-a", "undated-b"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let pages = vec![
            dated("first", "2024-01-01"),
            dated("second", "2024-01-01"),
            dated("third", "2024-01-01"),
        ];

        let posts = extract(&pages, "en");
        assert_eq!(slugs(&posts), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unparseable_date_sorts_after_valid_dates() {
        let pages = vec![
            dated("weird", "sometime in spring"),
            dated("none", ""),
            dated("valid", "2019-01-01"),
        ];

        let posts = extract(&pages, "en");
        assert_eq!(slugs(&posts), vec!["valid", "weird", "none"]);
        assert_eq!(posts[1].date, "sometime in spring");
    }

    #[test]
    fn test_blank_date_sorts_before_empty_date() {
        let pages = vec![
            dated("empty", ""),
            dated("blank", "   "),
            dated("valid", "2024-01-01"),
        ];

        let posts = extract(&pages, "en");
        assert_eq!(slugs(&posts), vec!["valid", "blank", "empty"]);
    }

    #[test]
    fn test_skips_pages_without_url() {
        let mut nameless = page(&["x"], FrontMatter::default());
        nameless.url = String::new();
        let pages = vec![nameless, page(&["y"], FrontMatter::default())];

        let posts = extract(&pages, "en");
        assert_eq!(slugs(&posts), vec!["y"]);
        assert!(posts.iter().all(|p| !p.id.is_empty() && !p.url.is_empty()));
    }

    #[test]
    fn test_empty_language_yields_no_posts() {
        let pages = vec![page(&["x"], FrontMatter::default())];
        assert!(extract(&pages, "").is_empty());
        assert!(extract(&pages, "  ").is_empty());
        assert_eq!(extract(&pages, "en")[0].lang, "en");
    }

    #[test]
    fn test_unrecognized_fields_are_dropped_silently() {
        let mut front = FrontMatter::default();
        front
            .extra
            .insert("icon".to_string(), serde_json::json!("Rocket"));
        let posts = extract(&[page(&["x"], front)], "en");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, UNTITLED);
    }
}
