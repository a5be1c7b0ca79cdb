//! Post repository
//!
//! CRUD and query operations over the markdown documents in a directory.
//! Every operation is a complete round-trip through the filesystem; the
//! directory is the single source of truth. The repository performs no
//! locking (single interactive user assumed), so callers issuing
//! overlapping list/check calls must guard against out-of-order responses
//! themselves.

use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::WriterConfig;
use crate::error::{Result, WriterError};
use crate::helpers;

use super::duplicate;
use super::frontmatter::{self, CoverConfig, PostFrontMatter};
use super::post::{filename_for, slugify, split_filename, ListPage, Post, PostDraft, PostSummary};

lazy_static! {
    /// Markdown image links, `![alt](url)`
    static ref IMAGE_LINK_RE: Regex = Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").unwrap();
}

/// Page size used when a caller passes zero
const DEFAULT_PAGE_SIZE: usize = 10;

/// Repository over directories of `YYYY-MM-DD-<slug>.md` documents
#[derive(Debug, Clone)]
pub struct PostRepository {
    static_dir: String,
    default_author: String,
}

impl Default for PostRepository {
    fn default() -> Self {
        Self {
            static_dir: "static".to_string(),
            default_author: frontmatter::default_author(),
        }
    }
}

impl PostRepository {
    /// Create a repository using the writer configuration
    pub fn new(config: &WriterConfig) -> Self {
        Self {
            static_dir: config.static_dir.clone(),
            default_author: config.default_author.clone(),
        }
    }

    /// Save a new post, dated today
    ///
    /// Fails with `DuplicateTitle` when a differently-named file already
    /// uses an equivalent title, and with `InvalidArgument` when the
    /// required fields are missing.
    pub fn save(&self, draft: &PostDraft, directory: &Path) -> Result<PathBuf> {
        self.save_dated(draft, directory, Local::now().date_naive())
    }

    /// Save a new post with an explicit creation date
    pub fn save_dated(
        &self,
        draft: &PostDraft,
        directory: &Path,
        date: NaiveDate,
    ) -> Result<PathBuf> {
        self.write_post(draft, directory, date, None)
    }

    /// Load a post by title
    ///
    /// The title is resolved to a filename through the slug derivation;
    /// when that misses (custom slugs, legacy files) the stored headers
    /// are scanned for an exact title match.
    pub fn load(&self, title: &str, directory: &Path) -> Result<Post> {
        let path = self
            .find(title, directory)?
            .ok_or_else(|| WriterError::NotFound {
                title: title.to_string(),
            })?;
        self.load_path(&path)
    }

    /// Load a post from a known path
    pub fn load_path(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path).map_err(|e| WriterError::io(path, e))?;
        let (mut front_matter, body) = frontmatter::parse(&content, path)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if front_matter.title.trim().is_empty() {
            front_matter.title = stem.to_string();
        }

        let slug = split_filename(stem)
            .map(|(_, slug)| slug.to_string())
            .or_else(|| front_matter.slug.clone())
            .unwrap_or_else(|| slugify(&front_matter.title));

        Ok(Post {
            front_matter,
            body,
            slug,
            source: path.to_path_buf(),
        })
    }

    /// Replace a stored post's fields, re-saving under the new title
    ///
    /// The creation date embedded in the stored filename is preserved.
    /// When the title changes, the old file is removed only after the new
    /// file has been fully written, so a failed write never loses the
    /// original content.
    pub fn update(
        &self,
        original_title: &str,
        draft: &PostDraft,
        directory: &Path,
    ) -> Result<PathBuf> {
        let original = self.load(original_title, directory)?;

        let date = original
            .source
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(split_filename)
            .map(|(date, _)| date.to_string())
            .or_else(|| original.front_matter.date.clone())
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Local::now().date_naive());

        let new_path = self.write_post(draft, directory, date, Some(original_title))?;

        if new_path != original.source {
            // Case-insensitive filesystems can alias the two names
            let same_file = match (
                fs::canonicalize(&new_path),
                fs::canonicalize(&original.source),
            ) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            };
            if !same_file {
                fs::remove_file(&original.source)
                    .map_err(|e| WriterError::io(&original.source, e))?;
            }
        }

        Ok(new_path)
    }

    /// Delete a post and, best-effort, the images it references
    ///
    /// The cover image and any body image links that resolve to files
    /// under `image_dir` are removed; a missing image never fails the
    /// delete.
    pub fn delete(
        &self,
        title: &str,
        directory: &Path,
        image_dir: &str,
        site_root: &str,
    ) -> Result<()> {
        let post = self.load(title, directory)?;

        if let Some(cover) = &post.front_matter.cover {
            self.remove_image(&cover.image, image_dir, site_root);
        }
        for url in extract_image_urls(&post.body) {
            self.remove_image(&url, image_dir, site_root);
        }

        fs::remove_file(&post.source).map_err(|e| WriterError::io(&post.source, e))?;
        Ok(())
    }

    /// List posts with search and pagination
    ///
    /// Enumerates `*.md` files non-recursively, decodes each through the
    /// lightweight summary path, filters case-insensitively against the
    /// search term (title, slug and keywords; an empty term matches all),
    /// orders by filename descending (reverse chronological given the date
    /// prefix), counts, then slices. An out-of-range page yields an empty
    /// slice, not an error. Cover bytes are attached to the returned page
    /// when the image file is found.
    pub fn list(
        &self,
        directory: &Path,
        site_root: &str,
        image_dir: &str,
        page: usize,
        page_size: usize,
        search: &str,
    ) -> Result<ListPage> {
        let page = page.max(1);
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        let term = search.trim().to_lowercase();

        let mut entries: Vec<(String, PostSummary)> = Vec::new();
        if directory.exists() {
            for entry in WalkDir::new(directory)
                .max_depth(1)
                .min_depth(1)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !path.is_file() || !is_markdown_file(path) {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if stem == "_index" {
                    continue;
                }

                let content = match fs::read_to_string(path) {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::warn!("Failed to read post {:?}: {}", path, e);
                        continue;
                    }
                };

                let summary = frontmatter::parse_summary(&content, stem);
                if !matches_search(&summary, &term) {
                    continue;
                }

                let name = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or(stem)
                    .to_string();
                entries.push((name, summary));
            }
        }

        entries.sort_by(|a, b| b.0.cmp(&a.0));
        let total_count = entries.len();

        let start = (page - 1).saturating_mul(page_size);
        let mut items: Vec<PostSummary> = entries
            .into_iter()
            .skip(start)
            .take(page_size)
            .map(|(_, summary)| summary)
            .collect();

        for summary in &mut items {
            self.attach_thumbnail(summary, image_dir, site_root);
        }

        Ok(ListPage {
            items,
            total_count,
            page,
            page_size,
        })
    }

    /// Resolve a title to the stored file, if any
    pub fn find(&self, title: &str, directory: &Path) -> Result<Option<PathBuf>> {
        if !directory.exists() {
            return Ok(None);
        }

        let wanted_slug = slugify(title).to_lowercase();
        let mut candidates: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(directory)
            .max_depth(1)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                candidates.push(path.to_path_buf());
            }
        }
        candidates.sort();

        for path in &candidates {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some((_, slug)) = split_filename(stem) {
                if slug.to_lowercase() == wanted_slug {
                    return Ok(Some(path.clone()));
                }
            }
        }

        // Fall back to the title stored in each header; covers custom
        // slugs and files that predate the naming convention
        for path in &candidates {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(content) = fs::read_to_string(path) else {
                continue;
            };
            let summary = frontmatter::parse_summary(&content, stem);
            if summary.title == title {
                return Ok(Some(path.clone()));
            }
        }

        Ok(None)
    }

    fn write_post(
        &self,
        draft: &PostDraft,
        directory: &Path,
        date: NaiveDate,
        exclude_title: Option<&str>,
    ) -> Result<PathBuf> {
        if draft.title.trim().is_empty() {
            return Err(WriterError::InvalidArgument {
                reason: "title must not be empty".to_string(),
            });
        }
        if draft.body.trim().is_empty() {
            return Err(WriterError::InvalidArgument {
                reason: "content must not be empty".to_string(),
            });
        }
        if directory.as_os_str().is_empty() {
            return Err(WriterError::InvalidArgument {
                reason: "target directory must be set".to_string(),
            });
        }

        // Re-validate collisions here to close the gap between a caller's
        // pre-check and the write
        if let Some(existing) = duplicate::check_excluding(&draft.title, exclude_title, directory)?
        {
            return Err(WriterError::DuplicateTitle {
                title: draft.title.clone(),
                existing,
            });
        }

        fs::create_dir_all(directory).map_err(|e| WriterError::io(directory, e))?;

        let slug = if draft.slug.trim().is_empty() {
            slugify(&draft.title)
        } else {
            slugify(&draft.slug)
        };
        let date_str = date.format("%Y-%m-%d").to_string();
        let path = directory.join(filename_for(&date_str, &slug));

        let front_matter = self.front_matter_for(draft, &date_str);
        let document = frontmatter::encode(&front_matter, &draft.body);
        safe_write(&path, &document)?;

        tracing::debug!("Stored post {:?}", path);
        Ok(path)
    }

    fn front_matter_for(&self, draft: &PostDraft, date: &str) -> PostFrontMatter {
        let author = if draft.author.trim().is_empty() {
            self.default_author.clone()
        } else {
            draft.author.trim().to_string()
        };

        PostFrontMatter {
            title: draft.title.trim().to_string(),
            date: Some(date.to_string()),
            lastmod: Some(Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string()),
            description: Some(draft.description.trim().to_string())
                .filter(|d| !d.is_empty()),
            author,
            tags: clean_list(&draft.tags),
            keywords: clean_list(&draft.keywords),
            cover: Some(draft.cover_image.trim())
                .filter(|c| !c.is_empty())
                .map(|image| CoverConfig {
                    image: image.to_string(),
                    hidden_in_list: draft.hidden_in_list,
                }),
            slug: Some(draft.slug.trim())
                .filter(|s| !s.is_empty())
                .map(slugify),
            weight: if draft.weight <= 0 { 1 } else { draft.weight },
        }
    }

    fn attach_thumbnail(&self, summary: &mut PostSummary, image_dir: &str, site_root: &str) {
        if summary.cover_image.is_empty() {
            return;
        }
        let Some(path) =
            helpers::to_fs_path(&summary.cover_image, image_dir, site_root, &self.static_dir)
        else {
            return;
        };
        // A missing or unreadable image yields no thumbnail, nothing more
        if let Ok(bytes) = fs::read(&path) {
            summary.cover_thumbnail = Some(bytes);
        }
    }

    fn remove_image(&self, url: &str, image_dir: &str, site_root: &str) {
        if image_dir.is_empty() {
            return;
        }
        let image_root = Path::new(image_dir);

        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(path) = helpers::to_fs_path(url, image_dir, site_root, &self.static_dir) {
            candidates.push(path);
        }
        if let Some(name) = Path::new(url.trim_start_matches('/')).file_name() {
            candidates.push(image_root.join(name));
        }

        for candidate in candidates {
            if candidate.starts_with(image_root) && candidate.exists() {
                if let Err(e) = fs::remove_file(&candidate) {
                    tracing::warn!("Failed to delete image {:?}: {}", candidate, e);
                }
                return;
            }
        }
    }
}

/// Write through a temporary file in the same directory, then rename;
/// a failure leaves no partial file behind
fn safe_write(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("md.tmp");
    fs::write(&tmp, content).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        WriterError::io(&tmp, e)
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        WriterError::io(path, e)
    })?;
    Ok(())
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}

fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Match a summary against a lowercased search term; title, slug and
/// keywords all count, and a multi-word term matches when every word
/// hits somewhere
fn matches_search(summary: &PostSummary, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let title = summary.title.to_lowercase();
    let slug = summary.slug.to_lowercase();
    let keywords: Vec<String> = summary.keywords.iter().map(|k| k.to_lowercase()).collect();

    let hit = |needle: &str| {
        title.contains(needle) || slug.contains(needle) || keywords.iter().any(|k| k.contains(needle))
    };

    if hit(term) {
        return true;
    }

    let words: Vec<&str> = term.split_whitespace().collect();
    words.len() > 1 && words.iter().all(|w| hit(w))
}

/// Image URLs referenced by the body's markdown image links
fn extract_image_urls(body: &str) -> Vec<String> {
    IMAGE_LINK_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .to_string()
        })
        .filter(|url| !url.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> PostRepository {
        PostRepository::default()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let draft = PostDraft::new("Hello World", "Test.");

        let path = repo()
            .save_dated(&draft, tmp.path(), date("2024-01-01"))
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2024-01-01-Hello-World.md"
        );
        assert!(path.exists());

        let post = repo().load("Hello World", tmp.path()).unwrap();
        assert_eq!(post.body, "Test.");
        assert_eq!(post.front_matter.author, "Aries");
        assert_eq!(post.front_matter.weight, 1);
        assert_eq!(post.front_matter.date.as_deref(), Some("2024-01-01"));
        assert_eq!(post.slug, "Hello-World");
    }

    #[test]
    fn test_save_rejects_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();

        let err = repo
            .save(&PostDraft::new("", "body"), tmp.path())
            .unwrap_err();
        assert!(matches!(err, WriterError::InvalidArgument { .. }));

        let err = repo
            .save(&PostDraft::new("Title", "  "), tmp.path())
            .unwrap_err();
        assert!(matches!(err, WriterError::InvalidArgument { .. }));
    }

    #[test]
    fn test_save_rejects_duplicate_title() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        repo.save_dated(&PostDraft::new("My Post", "a"), tmp.path(), date("2024-01-01"))
            .unwrap();

        // Same slug on a later date is still a collision
        let err = repo
            .save_dated(&PostDraft::new("my post!", "b"), tmp.path(), date("2024-02-02"))
            .unwrap_err();
        assert!(matches!(err, WriterError::DuplicateTitle { .. }));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        repo()
            .save_dated(&PostDraft::new("Solo", "body"), tmp.path(), date("2024-01-01"))
            .unwrap();

        let names: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["2024-01-01-Solo.md"]);
    }

    #[test]
    fn test_load_missing_post() {
        let tmp = TempDir::new().unwrap();
        let err = repo().load("Nope", tmp.path()).unwrap_err();
        assert!(matches!(err, WriterError::NotFound { .. }));
    }

    #[test]
    fn test_load_by_header_title_fallback() {
        let tmp = TempDir::new().unwrap();
        // Custom slug: the filename no longer derives from the title
        let mut draft = PostDraft::new("完全不同的标题", "body");
        draft.slug = "custom-name".to_string();
        repo()
            .save_dated(&draft, tmp.path(), date("2024-01-01"))
            .unwrap();

        let post = repo().load("完全不同的标题", tmp.path()).unwrap();
        assert_eq!(post.slug, "custom-name");
    }

    #[test]
    fn test_load_malformed_document() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("2024-01-01-Broken.md"),
            "---\ntitle: \"Broken\"\nno closing fence",
        )
        .unwrap();

        let err = repo().load("Broken", tmp.path()).unwrap_err();
        assert!(matches!(err, WriterError::MalformedDocument { .. }));
    }

    #[test]
    fn test_update_renames_post() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        repo.save_dated(&PostDraft::new("A", "first body"), tmp.path(), date("2024-03-01"))
            .unwrap();

        let path = repo
            .update("A", &PostDraft::new("B", "second body"), tmp.path())
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2024-03-01-B.md"
        );

        let post = repo.load("B", tmp.path()).unwrap();
        assert_eq!(post.body, "second body");

        let err = repo.load("A", tmp.path()).unwrap_err();
        assert!(matches!(err, WriterError::NotFound { .. }));
    }

    #[test]
    fn test_update_keeps_creation_date() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        repo.save_dated(&PostDraft::new("Keep", "v1"), tmp.path(), date("2023-12-24"))
            .unwrap();

        let path = repo
            .update("Keep", &PostDraft::new("Keep", "v2"), tmp.path())
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2023-12-24-Keep.md"
        );
        assert_eq!(repo.load("Keep", tmp.path()).unwrap().body, "v2");
    }

    #[test]
    fn test_update_rejects_collision_with_other_post() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        repo.save_dated(&PostDraft::new("First", "a"), tmp.path(), date("2024-01-01"))
            .unwrap();
        repo.save_dated(&PostDraft::new("Second", "b"), tmp.path(), date("2024-01-02"))
            .unwrap();

        let err = repo
            .update("First", &PostDraft::new("Second", "c"), tmp.path())
            .unwrap_err();
        assert!(matches!(err, WriterError::DuplicateTitle { .. }));

        // The original is untouched after the failed update
        assert_eq!(repo.load("First", tmp.path()).unwrap().body, "a");
    }

    #[test]
    fn test_delete_removes_post_and_cover() {
        let tmp = TempDir::new().unwrap();
        let site_root = tmp.path().join("site");
        let image_dir = site_root.join("static").join("images");
        fs::create_dir_all(&image_dir).unwrap();
        fs::write(image_dir.join("cover.png"), b"png").unwrap();

        let posts = tmp.path().join("posts");
        let mut draft = PostDraft::new("Covered", "body");
        draft.cover_image = "/images/cover.png".to_string();
        let repo = repo();
        repo.save_dated(&draft, &posts, date("2024-01-01")).unwrap();

        repo.delete(
            "Covered",
            &posts,
            image_dir.to_str().unwrap(),
            site_root.to_str().unwrap(),
        )
        .unwrap();

        assert!(!posts.join("2024-01-01-Covered.md").exists());
        assert!(!image_dir.join("cover.png").exists());
    }

    #[test]
    fn test_delete_with_missing_cover_still_succeeds() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        let mut draft = PostDraft::new("Ghost Cover", "body");
        draft.cover_image = "/images/gone.png".to_string();
        let repo = repo();
        repo.save_dated(&draft, &posts, date("2024-01-01")).unwrap();

        repo.delete("Ghost Cover", &posts, tmp.path().to_str().unwrap(), "")
            .unwrap();
        assert!(!posts.join("2024-01-01-Ghost-Cover.md").exists());
    }

    #[test]
    fn test_delete_removes_body_images_under_image_dir() {
        let tmp = TempDir::new().unwrap();
        let image_dir = tmp.path().join("uploads");
        fs::create_dir_all(&image_dir).unwrap();
        fs::write(image_dir.join("shot.png"), b"png").unwrap();

        let posts = tmp.path().join("posts");
        let body = "Intro\n\n![screen](/images/uploads/shot.png)\n";
        let repo = repo();
        repo.save_dated(&PostDraft::new("Shots", body), &posts, date("2024-01-01"))
            .unwrap();

        repo.delete("Shots", &posts, image_dir.to_str().unwrap(), "")
            .unwrap();
        assert!(!image_dir.join("shot.png").exists());
    }

    #[test]
    fn test_delete_missing_post_fails() {
        let tmp = TempDir::new().unwrap();
        let err = repo().delete("Nope", tmp.path(), "", "").unwrap_err();
        assert!(matches!(err, WriterError::NotFound { .. }));
    }

    fn seed_posts(repo: &PostRepository, dir: &Path, count: usize) {
        for i in 0..count {
            let draft = PostDraft::new(format!("Post {:02}", i), format!("body {}", i));
            repo.save_dated(&draft, dir, date(&format!("2024-01-{:02}", i + 1)))
                .unwrap();
        }
    }

    #[test]
    fn test_list_orders_newest_first() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        seed_posts(&repo, tmp.path(), 3);

        let page = repo.list(tmp.path(), "", "", 1, 10, "").unwrap();
        assert_eq!(page.total_count, 3);
        let titles: Vec<&str> = page.items.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 02", "Post 01", "Post 00"]);
    }

    #[test]
    fn test_list_pagination_covers_all_items_once() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        seed_posts(&repo, tmp.path(), 5);

        let full = repo.list(tmp.path(), "", "", 1, 100, "").unwrap();
        let mut collected = Vec::new();
        for page in 1..=3 {
            let result = repo.list(tmp.path(), "", "", page, 2, "").unwrap();
            assert_eq!(result.total_count, 5);
            assert!(result.items.len() <= 2);
            collected.extend(result.items);
        }
        assert_eq!(collected, full.items);

        // Out-of-range page: empty slice, same count
        let beyond = repo.list(tmp.path(), "", "", 9, 2, "").unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 5);
    }

    #[test]
    fn test_list_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        seed_posts(&repo, tmp.path(), 4);

        let first = repo.list(tmp.path(), "", "", 1, 3, "").unwrap();
        let second = repo.list(tmp.path(), "", "", 1, 3, "").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_search_filters_before_counting() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        repo.save_dated(&PostDraft::new("Rust Guide", "a"), tmp.path(), date("2024-01-01"))
            .unwrap();
        repo.save_dated(&PostDraft::new("Cooking", "b"), tmp.path(), date("2024-01-02"))
            .unwrap();
        let mut tagged = PostDraft::new("Untitled Note", "c");
        tagged.keywords = vec!["rustlang".to_string()];
        repo.save_dated(&tagged, tmp.path(), date("2024-01-03"))
            .unwrap();

        let result = repo.list(tmp.path(), "", "", 1, 10, "RUST").unwrap();
        assert_eq!(result.total_count, 2);
        let titles: Vec<&str> = result.items.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Untitled Note", "Rust Guide"]);
    }

    #[test]
    fn test_list_multi_word_search_requires_all_words() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        repo.save_dated(
            &PostDraft::new("Advanced Rust Patterns", "a"),
            tmp.path(),
            date("2024-01-01"),
        )
        .unwrap();
        repo.save_dated(&PostDraft::new("Rust Basics", "b"), tmp.path(), date("2024-01-02"))
            .unwrap();

        let result = repo.list(tmp.path(), "", "", 1, 10, "rust patterns").unwrap();
        assert_eq!(result.total_count, 1);
        assert_eq!(result.items[0].title, "Advanced Rust Patterns");
    }

    #[test]
    fn test_list_skips_index_and_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let repo = repo();
        seed_posts(&repo, tmp.path(), 1);
        fs::write(tmp.path().join("_index.md"), "---\ntitle: \"_index\"\n---\n\n").unwrap();

        let result = repo.list(tmp.path(), "", "", 1, 10, "").unwrap();
        assert_eq!(result.total_count, 1);

        let gone = tmp.path().join("missing");
        let empty = repo.list(&gone, "", "", 1, 10, "").unwrap();
        assert_eq!(empty.total_count, 0);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_list_attaches_thumbnail_when_cover_exists() {
        let tmp = TempDir::new().unwrap();
        let site_root = tmp.path().join("site");
        fs::create_dir_all(site_root.join("static/images")).unwrap();
        fs::write(site_root.join("static/images/c.png"), b"bytes").unwrap();

        let posts = tmp.path().join("posts");
        let repo = repo();
        let mut with_cover = PostDraft::new("Covered", "a");
        with_cover.cover_image = "/images/c.png".to_string();
        repo.save_dated(&with_cover, &posts, date("2024-01-01")).unwrap();
        let mut without = PostDraft::new("Bare", "b");
        without.cover_image = "/images/missing.png".to_string();
        repo.save_dated(&without, &posts, date("2024-01-02")).unwrap();

        let result = repo
            .list(&posts, site_root.to_str().unwrap(), "", 1, 10, "")
            .unwrap();
        let covered = result.items.iter().find(|s| s.title == "Covered").unwrap();
        assert_eq!(covered.cover_thumbnail.as_deref(), Some(b"bytes".as_ref()));
        let bare = result.items.iter().find(|s| s.title == "Bare").unwrap();
        assert!(bare.cover_thumbnail.is_none());
    }

    #[test]
    fn test_extract_image_urls() {
        let body = "x\n![a](/images/uploads/a.png)\ntext ![](\"/images/b.png\") end\n";
        assert_eq!(
            extract_image_urls(body),
            vec!["/images/uploads/a.png", "/images/b.png"]
        );
    }
}
