//! List posts through the filter/sort pipeline

use anyhow::Result;
use std::fmt::Write;

use crate::blog::{FilteredView, Selection};
use crate::i18n::I18n;
use crate::Blogshelf;

/// Print the posts of `lang` matching `selection`
pub fn run(shelf: &Blogshelf, lang: &str, selection: &Selection, json: bool) -> Result<()> {
    let catalog = shelf.load_catalog(lang)?;
    let view = catalog.view(selection);
    tracing::debug!(
        "{} of {} posts match {:?}",
        view.total,
        catalog.posts.len(),
        selection
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let i18n = shelf.i18n()?;
        print!("{}", render(&view, selection, &i18n, lang));
    }

    Ok(())
}

/// Human-readable listing
pub fn render(view: &FilteredView, selection: &Selection, i18n: &I18n, lang: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {} ({}: {})",
        view.total,
        i18n.get(lang, "posts"),
        i18n.get(lang, "sort_by"),
        i18n.sort_label(selection.sort, lang)
    );

    if view.posts.is_empty() {
        let _ = writeln!(out, "  {}", i18n.get(lang, "no_results"));
        return out;
    }

    for post in &view.posts {
        let date = post.display_date();
        let date = if date.is_empty() { "-".to_string() } else { date };
        let _ = write!(out, "  {} - {} [{}]", date, post.title, post.url);

        let labels: Vec<String> = [
            i18n.translate_category(post.category.as_deref(), lang),
            i18n.translate_difficulty(post.difficulty.as_deref(), lang),
        ]
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect();
        if !labels.is_empty() {
            let _ = write!(out, " ({})", labels.join(", "));
        }
        if !post.tags.is_empty() {
            let _ = write!(out, " #{}", post.tags.join(" #"));
        }
        out.push('\n');
    }

    out
}
