//! Filter/sort pipeline over extracted posts

use serde::Serialize;
use std::cmp::Ordering;

use super::selection::{Selection, SortKey};
use crate::content::Post;

/// A filtered, ordered listing together with its size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredView {
    pub total: usize,
    pub posts: Vec<Post>,
}

impl FilteredView {
    pub fn new(posts: &[Post], selection: &Selection) -> Self {
        let posts = apply(posts, selection);
        Self {
            total: posts.len(),
            posts,
        }
    }
}

/// Filter and sort `posts` by `selection`.
///
/// Text, category, difficulty and tag predicates are conjunctive; within
/// the tag dimension any selected tag matches. The input is left as is.
pub fn apply(posts: &[Post], selection: &Selection) -> Vec<Post> {
    let query = selection.query.to_lowercase();

    let mut filtered: Vec<Post> = posts
        .iter()
        .filter(|post| query.is_empty() || post.matches_text(&query))
        .filter(|post| in_selection(post.category.as_ref(), &selection.categories))
        .filter(|post| in_selection(post.difficulty.as_ref(), &selection.difficulties))
        .filter(|post| {
            selection.tags.is_empty() || post.tags.iter().any(|t| selection.tags.contains(t))
        })
        .cloned()
        .collect();

    sort_posts(&mut filtered, selection.sort);
    filtered
}

/// An empty selection admits everything; otherwise the value must be set,
/// non-empty and selected
fn in_selection(value: Option<&String>, selected: &[String]) -> bool {
    selected.is_empty()
        || value
            .filter(|v| !v.is_empty())
            .is_some_and(|v| selected.contains(v))
}

fn sort_posts(posts: &mut [Post], sort: SortKey) {
    match sort {
        SortKey::Newest => posts.sort_by_cached_key(|p| NewestFirst(p.date_key())),
        SortKey::Oldest => posts.sort_by_cached_key(|p| OldestFirst(p.date_key())),
        SortKey::TitleAsc => posts.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::TitleDesc => posts.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }
}

#[derive(PartialEq, Eq)]
struct NewestFirst(crate::helpers::DateKey);

impl Ord for NewestFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_newest(&other.0)
    }
}

impl PartialOrd for NewestFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(PartialEq, Eq)]
struct OldestFirst(crate::helpers::DateKey);

impl Ord for OldestFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_oldest(&other.0)
    }
}

impl PartialOrd for OldestFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Locale-style title comparison: letters compare without case or accents
/// first, then lowercase sorts before uppercase, then accented after plain.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| -> Vec<char> {
        s.chars()
            .flat_map(|c| fold_accent(c).to_lowercase())
            .collect()
    };

    primary(a)
        .cmp(&primary(b))
        .then_with(|| accent_pattern(a).cmp(&accent_pattern(b)))
        .then_with(|| case_pattern(a).cmp(&case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn accent_pattern(s: &str) -> Vec<bool> {
    s.chars().map(|c| fold_accent(c) != c).collect()
}

fn case_pattern(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

/// Base letter of common Latin accented letters
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' => 'A',
        'ç' | 'ć' | 'č' => 'c',
        'Ç' | 'Ć' | 'Č' => 'C',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ě' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ě' => 'E',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' => 'I',
        'ñ' | 'ń' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ň' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' => 'O',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'š' | 'ś' => 's',
        'Š' | 'Ś' => 'S',
        'ž' | 'ź' | 'ż' => 'z',
        'Ž' | 'Ź' | 'Ż' => 'Z',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::extract;
    use crate::blog::selection::Action;
    use crate::content::{FrontMatter, PageData, PageDescriptor};

    fn post(slug: &str) -> Post {
        Post::new(format!("/en/docs/{}", slug), &[slug.to_string()], "en")
    }

    fn titled(title: &str, tags: &[&str]) -> Post {
        let mut p = post(&title.to_lowercase().replace(' ', "-"));
        p.title = title.to_string();
        p.tags = tags.iter().map(|t| t.to_string()).collect();
        p
    }

    fn with_category(slug: &str, category: Option<&str>) -> Post {
        let mut p = post(slug);
        p.category = category.map(str::to_string);
        p
    }

    fn with_date(slug: &str, date: &str) -> Post {
        let mut p = post(slug);
        p.date = date.to_string();
        p
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    fn sorted_by(sort: SortKey) -> Selection {
        Selection::default().reduce(Action::SetSort(sort))
    }

    #[test]
    fn test_query_matches_title_or_tags() {
        let posts = vec![
            titled("Agent Skills SDK", &["sdk"]),
            titled("Intro to RAG", &["rag", "ai-ml"]),
        ];
        let selection = Selection::default().reduce(Action::SetQuery("sdk".to_string()));

        assert_eq!(titles(&apply(&posts, &selection)), vec!["Agent Skills SDK"]);
    }

    #[test]
    fn test_query_is_case_insensitive_and_checks_author() {
        let mut with_author = titled("Notes", &[]);
        with_author.author = Some("Ada Lovelace".to_string());
        let mut described = titled("Other", &[]);
        described.description = "All about LOVELACE engines".to_string();
        let posts = vec![with_author, described, titled("Unrelated", &[])];

        let selection = Selection::default().reduce(Action::SetQuery("LoveLace".to_string()));
        assert_eq!(titles(&apply(&posts, &selection)), vec!["Notes", "Other"]);
    }

    #[test]
    fn test_category_filter() {
        let posts = vec![
            with_category("a", Some("ai-ml")),
            with_category("b", Some("development")),
            with_category("c", None),
        ];
        let selection = Selection::default().reduce(Action::ToggleCategory("ai-ml".to_string()));

        assert_eq!(slugs(&apply(&posts, &selection)), vec!["a"]);
    }

    #[test]
    fn test_difficulty_filter_excludes_missing() {
        let mut easy = post("easy");
        easy.difficulty = Some("beginner".to_string());
        let mut hard = post("hard");
        hard.difficulty = Some("advanced".to_string());
        let posts = vec![easy, hard, post("unknown")];

        let selection = Selection::default()
            .reduce(Action::ToggleDifficulty("beginner".to_string()))
            .reduce(Action::ToggleDifficulty("advanced".to_string()));
        assert_eq!(slugs(&apply(&posts, &selection)), vec!["easy", "hard"]);
    }

    #[test]
    fn test_empty_category_is_treated_as_missing() {
        let posts = vec![
            with_category("blank", Some("")),
            with_category("guide", Some("guide")),
        ];
        let selection = Selection::default()
            .reduce(Action::ToggleCategory(String::new()))
            .reduce(Action::ToggleCategory("guide".to_string()));

        assert_eq!(slugs(&apply(&posts, &selection)), vec!["guide"]);
    }

    #[test]
    fn test_tags_are_or_within_dimension() {
        let posts = vec![
            titled("One", &["rag"]),
            titled("Two", &["sdk", "cli"]),
            titled("Three", &["misc"]),
        ];
        let selection = Selection::default()
            .reduce(Action::ToggleTag("rag".to_string()))
            .reduce(Action::ToggleTag("cli".to_string()));

        assert_eq!(titles(&apply(&posts, &selection)), vec!["One", "Two"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let mut both = titled("Both", &["rag"]);
        both.category = Some("ai-ml".to_string());
        let mut category_only = titled("Category only", &["sdk"]);
        category_only.category = Some("ai-ml".to_string());
        let mut tag_only = titled("Tag only", &["rag"]);
        tag_only.category = Some("development".to_string());
        let posts = vec![both, category_only, tag_only];

        let selection = Selection::default()
            .reduce(Action::ToggleCategory("ai-ml".to_string()))
            .reduce(Action::ToggleTag("rag".to_string()));
        assert_eq!(titles(&apply(&posts, &selection)), vec!["Both"]);
    }

    #[test]
    fn test_sort_a_to_z_is_locale_aware() {
        let posts = vec![titled("Banana", &[]), titled("apple", &[]), titled("Cherry", &[])];

        let asc = apply(&posts, &sorted_by(SortKey::TitleAsc));
        assert_eq!(titles(&asc), vec!["apple", "Banana", "Cherry"]);

        let desc = apply(&posts, &sorted_by(SortKey::TitleDesc));
        assert_eq!(titles(&desc), vec!["Cherry", "Banana", "apple"]);
    }

    #[test]
    fn test_compare_titles() {
        assert_eq!(compare_titles("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_titles("Éclair", "eclair"), Ordering::Greater);
        assert_eq!(compare_titles("Éclair", "Fig"), Ordering::Less);
        assert_eq!(compare_titles("zèbre", "zebre"), Ordering::Greater);
        assert_eq!(compare_titles("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_newest_and_oldest_put_missing_dates_last() {
        let posts = vec![
            with_date("none", ""),
            with_date("old", "2021-06-01"),
            with_date("garbled", "not a date"),
            with_date("new", "2024-02-10"),
        ];

        let newest = apply(&posts, &sorted_by(SortKey::Newest));
        assert_eq!(slugs(&newest), vec!["new", "old", "garbled", "none"]);

        let oldest = apply(&posts, &sorted_by(SortKey::Oldest));
        assert_eq!(slugs(&oldest), vec!["garbled", "old", "new", "none"]);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let posts = vec![titled("B", &[]), titled("A", &[])];
        let before = posts.clone();

        let sorted = apply(&posts, &sorted_by(SortKey::TitleAsc));
        assert_eq!(titles(&sorted), vec!["A", "B"]);
        assert_eq!(posts, before);
    }

    #[test]
    fn test_noop_selection_keeps_extracted_order() {
        let dates = ["2023-01-01", "", "2024-06-30", "2023-01-01", "bogus", "2022-12-31"];
        let pages: Vec<PageDescriptor> = dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let front = FrontMatter {
                    date: Some(date.to_string()),
                    ..Default::default()
                };
                PageDescriptor::new(
                    format!("/en/docs/p{}", i),
                    vec![format!("p{}", i)],
                    PageData::new(front),
                )
            })
            .collect();

        let posts = extract(&pages, "en");
        assert_eq!(apply(&posts, &Selection::default()), posts);
    }

    #[test]
    fn test_filtered_view_counts() {
        let posts = vec![titled("Agent Skills SDK", &["sdk"]), titled("Intro", &[])];
        let selection = Selection::default().reduce(Action::SetQuery("sdk".to_string()));

        let view = FilteredView::new(&posts, &selection);
        assert_eq!(view.total, 1);
        assert_eq!(view.posts.len(), 1);
    }
}
