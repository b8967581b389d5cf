//! Content module - page descriptors, front-matter and posts

mod frontmatter;
pub mod loader;
mod page;
mod post;

pub use frontmatter::{FrontMatter, PageData, Presence};
pub use loader::{ContentSource, DirSource, JsonSource, SourceError};
pub use page::PageDescriptor;
pub use post::{Post, UNTITLED};
