//! List the facet values offered as filters

use anyhow::Result;
use std::fmt::Write;

use crate::blog::Facets;
use crate::i18n::I18n;
use crate::Blogshelf;

/// Print the categories, difficulties and tags of `lang`
pub fn run(shelf: &Blogshelf, lang: &str, json: bool) -> Result<()> {
    let catalog = shelf.load_catalog(lang)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog.facets)?);
    } else {
        let i18n = shelf.i18n()?;
        print!("{}", render(&catalog.facets, &i18n, lang));
    }

    Ok(())
}

/// Human-readable facet lists with translated labels
pub fn render(facets: &Facets, i18n: &I18n, lang: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} ({}):", i18n.get(lang, "category"), facets.categories.len());
    for category in &facets.categories {
        let label = i18n.translate_category(Some(category), lang);
        write_value(&mut out, category, &label);
    }

    let _ = writeln!(out, "{} ({}):", i18n.get(lang, "difficulty"), facets.difficulties.len());
    for difficulty in &facets.difficulties {
        let label = i18n.translate_difficulty(Some(difficulty), lang);
        write_value(&mut out, difficulty, &label);
    }

    let _ = writeln!(out, "{} ({}):", i18n.get(lang, "tags"), facets.tags.len());
    for tag in &facets.tags {
        write_value(&mut out, tag, tag);
    }

    out
}

fn write_value(out: &mut String, value: &str, label: &str) {
    if value == label {
        let _ = writeln!(out, "  {}", value);
    } else {
        let _ = writeln!(out, "  {} - {}", value, label);
    }
}
