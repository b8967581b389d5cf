//! CLI commands

pub mod facets;
pub mod list;
