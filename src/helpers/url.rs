//! Image path helper functions
//!
//! Converts absolute filesystem image paths into site-relative URLs usable
//! inside front matter. Files under the static folder are served from the
//! site's URL root (Hugo convention), so that one segment is stripped.

use std::path::{Path, PathBuf};

/// Normalize path separators to forward slashes
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert an absolute image path into a site-relative URL
///
/// # Examples
/// ```ignore
/// to_site_url("C:\\site\\static\\images\\a.png", "C:\\site", "static") // -> "/images/a.png"
/// to_site_url("/abs/other/a.png", "", "static") // -> "/abs/other/a.png"
/// ```
pub fn to_site_url(image_path: &str, site_root: &str, static_dir: &str) -> String {
    let image = normalize_separators(image_path);
    let root_owned = normalize_separators(site_root);
    let root = root_owned.trim_end_matches('/');

    if root.is_empty() {
        return image;
    }

    // Prefix comparison on normalized strings; a match must end on a
    // segment boundary so "/site" does not claim "/siteextra".
    let rest = match image.strip_prefix(root) {
        Some(r) if r.is_empty() || r.starts_with('/') => r.trim_start_matches('/'),
        _ => return image,
    };

    let rest = strip_segment(rest, static_dir);

    format!("/{}", rest)
}

/// Strip a single leading path segment if it matches `segment`
fn strip_segment<'a>(path: &'a str, segment: &str) -> &'a str {
    if segment.is_empty() {
        return path;
    }
    match path.strip_prefix(segment) {
        Some(r) if r.is_empty() => r,
        Some(r) if r.starts_with('/') => r.trim_start_matches('/'),
        _ => path,
    }
}

/// Best-effort inverse of [`to_site_url`], used when deleting a post's
/// cover image. Resolves a cover URL back to an absolute path, preferring
/// the site's static folder; falls back to looking the file up by name in
/// the image directory. Returns `None` when nothing sensible can be built.
pub fn to_fs_path(
    url: &str,
    image_dir: &str,
    site_root: &str,
    static_dir: &str,
) -> Option<PathBuf> {
    let url = normalize_separators(url);
    if url.is_empty() {
        return None;
    }

    if Path::new(&url).is_absolute() {
        return Some(PathBuf::from(url));
    }

    let relative = url.trim_start_matches('/');
    if !site_root.is_empty() {
        return Some(Path::new(site_root).join(static_dir).join(relative));
    }
    if !image_dir.is_empty() {
        let name = Path::new(relative).file_name()?;
        return Some(Path::new(image_dir).join(name));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_site_url_under_static() {
        assert_eq!(
            to_site_url("C:\\site\\static\\images\\a.png", "C:\\site", "static"),
            "/images/a.png"
        );
        assert_eq!(
            to_site_url("/home/me/blog/static/img/b.jpg", "/home/me/blog", "static"),
            "/img/b.jpg"
        );
    }

    #[test]
    fn test_to_site_url_without_static_prefix() {
        assert_eq!(
            to_site_url("/home/me/blog/assets/c.png", "/home/me/blog", "static"),
            "/assets/c.png"
        );
    }

    #[test]
    fn test_to_site_url_fallback() {
        // Unset root: separators normalized, path returned as-is
        assert_eq!(
            to_site_url("/abs/other/a.png", "", "static"),
            "/abs/other/a.png"
        );
        assert_eq!(
            to_site_url("C:\\abs\\other\\a.png", "", "static"),
            "C:/abs/other/a.png"
        );
        // Root that is not a prefix
        assert_eq!(
            to_site_url("/elsewhere/a.png", "/home/me/blog", "static"),
            "/elsewhere/a.png"
        );
    }

    #[test]
    fn test_to_site_url_prefix_must_end_on_segment() {
        assert_eq!(
            to_site_url("/home/me/blogextra/a.png", "/home/me/blog", "static"),
            "/home/me/blogextra/a.png"
        );
    }

    #[test]
    fn test_to_fs_path_site_root() {
        let resolved = to_fs_path("/images/a.png", "", "/home/me/blog", "static").unwrap();
        assert_eq!(resolved, PathBuf::from("/home/me/blog/static/images/a.png"));
    }

    #[test]
    fn test_to_fs_path_image_dir_by_name() {
        let resolved = to_fs_path("/images/uploads/a.png", "/data/uploads", "", "static").unwrap();
        assert_eq!(resolved, PathBuf::from("/data/uploads/a.png"));
    }

    #[test]
    fn test_to_fs_path_unresolvable() {
        assert_eq!(to_fs_path("", "", "", "static"), None);
        assert_eq!(to_fs_path("images/a.png", "", "", "static"), None);
    }
}
