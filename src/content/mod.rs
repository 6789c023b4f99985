//! Content module - loads posts, renders Markdown and orders the collection

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

use std::path::PathBuf;
use thiserror::Error;

pub use frontmatter::FrontMatter;
pub use markdown::{prune, MarkdownRenderer, Rendered};
pub use post::{Cover, NavLink, Navigation, Post};

/// Errors raised while turning content files into posts
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{} has no `date` in its front-matter", path.display())]
    MissingDate { path: PathBuf },

    #[error("{} has an unreadable date `{value}`", path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("{} would replace the index page; move it into a directory", path.display())]
    ReservedSlug { path: PathBuf },

    #[error("slug `{slug}` is used by both {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
