//! Content module - post documents, their header codec and repository

pub mod duplicate;
pub mod frontmatter;
mod post;
mod repository;

pub use frontmatter::{CoverConfig, PostFrontMatter};
pub use post::{filename_for, slugify, split_filename, ListPage, Post, PostDraft, PostSummary};
pub use repository::PostRepository;
