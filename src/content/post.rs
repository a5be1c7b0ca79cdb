//! Post models and title/filename derivation

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;

use super::frontmatter::PostFrontMatter;

lazy_static! {
    /// Stored filenames are `YYYY-MM-DD-<slug>.md`; this matches the stem.
    static ref FILENAME_RE: Regex = Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)$").unwrap();
}

/// Longest slug we will derive from a title
const MAX_SLUG_LEN: usize = 50;

/// A post loaded from disk
///
/// A transient projection of a stored document; the directory on disk is
/// the single source of truth and no `Post` is shared across operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Parsed front-matter fields
    pub front_matter: PostFrontMatter,

    /// Raw markdown following the header
    pub body: String,

    /// URL-friendly name, taken from the stored filename
    pub slug: String,

    /// Full path of the stored file
    pub source: PathBuf,
}

impl Post {
    /// Post title from front matter
    pub fn title(&self) -> &str {
        &self.front_matter.title
    }
}

/// Fields a caller provides to create or update a post
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub description: String,
    pub author: String,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub cover_image: String,
    pub hidden_in_list: bool,
    /// Custom slug; derived from the title when empty
    pub slug: String,
    pub weight: i32,
}

impl PostDraft {
    /// Create a draft with the required fields
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            weight: 1,
            ..Default::default()
        }
    }
}

/// A lightweight projection used for listing; never persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub lastmod: String,
    pub keywords: Vec<String>,
    /// Site-relative cover URL as stored in front matter
    pub cover_image: String,
    /// Cover bytes, attached when the image file is found on disk
    pub cover_thumbnail: Option<Vec<u8>>,
}

/// Result of a paginated query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListPage {
    pub items: Vec<PostSummary>,
    /// Matching posts across the whole directory, independent of page
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Derive a filesystem/URL-safe slug from a title
///
/// Keeps ASCII alphanumerics and CJK-range characters (case preserved),
/// replaces everything else with `-`, collapses runs, trims, caps the
/// length and falls back to `"post"` for titles that slugify to nothing.
/// Collision checks compare slugs case-insensitively.
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut prev_dash = false;

    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() || is_cjk(c) {
            slug.push(c);
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    let capped: String = slug.chars().take(MAX_SLUG_LEN).collect();
    let trimmed = capped.trim_matches('-');

    if trimmed.is_empty() {
        "post".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'   // CJK Extension A
        | '\u{F900}'..='\u{FAFF}'   // CJK Compatibility Ideographs
        | '\u{3040}'..='\u{30FF}'   // Hiragana and Katakana
        | '\u{AC00}'..='\u{D7AF}'   // Hangul Syllables
    )
}

/// Build the stored filename for a creation date and slug
pub fn filename_for(date: &str, slug: &str) -> String {
    format!("{}-{}.md", date, slug)
}

/// Split a stored file stem into its `(date, slug)` parts
pub fn split_filename(stem: &str) -> Option<(&str, &str)> {
    let caps = FILENAME_RE.captures(stem)?;
    let date = caps.get(1)?.as_str();
    let slug = caps.get(2)?.as_str();
    Some((date, slug))
}
