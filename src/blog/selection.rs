//! Filter selection and its transitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordering applied to a filtered listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "a-z")]
    TitleAsc,
    #[serde(rename = "z-a")]
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::TitleAsc => "a-z",
            SortKey::TitleDesc => "z-a",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key `{0}`, expected one of: newest, oldest, a-z, z-a")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

/// The user's current filter and sort state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub query: String,
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
    pub tags: Vec<String>,
    pub sort: SortKey,
}

/// A change to a [`Selection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetQuery(String),
    ToggleCategory(String),
    ToggleDifficulty(String),
    ToggleTag(String),
    SetSort(SortKey),
    /// Clears the query and every facet selection, keeps the sort key
    ClearFilters,
}

impl Selection {
    /// Apply a transition, returning the next selection
    pub fn reduce(&self, action: Action) -> Selection {
        let mut next = self.clone();
        match action {
            Action::SetQuery(query) => next.query = query,
            Action::ToggleCategory(value) => toggle(&mut next.categories, value),
            Action::ToggleDifficulty(value) => toggle(&mut next.difficulties, value),
            Action::ToggleTag(value) => toggle(&mut next.tags, value),
            Action::SetSort(sort) => next.sort = sort,
            Action::ClearFilters => {
                next = Selection {
                    sort: self.sort,
                    ..Default::default()
                }
            }
        }
        next
    }

    /// True when no predicate narrows the listing
    pub fn has_filters(&self) -> bool {
        !self.query.is_empty()
            || !self.categories.is_empty()
            || !self.difficulties.is_empty()
            || !self.tags.is_empty()
    }
}

fn toggle(values: &mut Vec<String>, value: String) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}
