//! Duplicate title detection
//!
//! Two titles collide when their normalized forms are equal, or when the
//! slugs they derive are equal (punctuation differences can render the
//! same filename). Every save/update/delete path shares this one rule.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;

use super::frontmatter::parse_summary;
use super::post::{slugify, split_filename};

/// Normalize a title for comparison: lower-case, trim, collapse internal
/// whitespace
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check whether a candidate title collides with an existing post,
/// returning the conflicting path when it does
pub fn check(title: &str, directory: &Path) -> Result<Option<PathBuf>> {
    check_excluding(title, None, directory)
}

/// Like [`check`], but ignoring the post that currently holds
/// `exclude_title`, so editing a post does not collide with itself
pub fn check_excluding(
    title: &str,
    exclude_title: Option<&str>,
    directory: &Path,
) -> Result<Option<PathBuf>> {
    if !directory.exists() {
        return Ok(None);
    }

    let wanted_norm = normalize_title(title);
    let wanted_slug = slugify(title).to_lowercase();
    let excluded = exclude_title.map(|t| (normalize_title(t), slugify(t).to_lowercase()));

    let mut paths: Vec<PathBuf> = WalkDir::new(directory)
        .max_depth(1)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("md"))
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();

    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem == "_index" {
            continue;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read post {:?}: {}", path, e);
                continue;
            }
        };
        let summary = parse_summary(&content, stem);

        let existing_norm = normalize_title(&summary.title);
        let existing_slug = split_filename(stem)
            .map(|(_, slug)| slug.to_string())
            .unwrap_or_else(|| slugify(&summary.title))
            .to_lowercase();

        if let Some((exclude_norm, exclude_slug)) = &excluded {
            if existing_norm == *exclude_norm || existing_slug == *exclude_slug {
                continue;
            }
        }

        if existing_norm == wanted_norm || existing_slug == wanted_slug {
            return Ok(Some(path));
        }
    }

    Ok(None)
}
