//! Front-matter parsing and serialization
//!
//! A post document is a `---` delimited header followed by the markdown
//! body. The full decoder feeds the header through serde_yaml; the summary
//! decoder is a separate line scan that never touches the body, so listing
//! cost stays independent of document size.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{Result, WriterError};

use super::post::{split_filename, PostSummary};

const FENCE: &str = "---";

/// Custom deserializer that handles both a single comma-separated string
/// and a list of strings; entries are trimmed and empties dropped
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            self.visit_str(&value)
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                let item = item.trim().to_string();
                if !item.is_empty() {
                    vec.push(item);
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Custom deserializer for the author field: a plain string, or the
/// single-element list form some front matter uses (`author: ["Aries"]`)
fn string_or_first<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrFirst;

    impl<'de> Visitor<'de> for StringOrFirst {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.trim().to_string())
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            self.visit_str(&value)
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut first = String::new();
            while let Some(item) = seq.next_element::<String>()? {
                if first.is_empty() {
                    first = item.trim().to_string();
                }
            }
            Ok(first)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(StringOrFirst)
}

/// Custom deserializer for the cover field: either the nested
/// `image`/`hiddenInList` block or a bare URL string
fn cover_or_url<'de, D>(deserializer: D) -> std::result::Result<Option<CoverConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, MapAccess, Visitor};
    use std::fmt;

    struct CoverOrUrl;

    impl<'de> Visitor<'de> for CoverOrUrl {
        type Value = Option<CoverConfig>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a cover block or an image URL string")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            let value = value.trim();
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(CoverConfig {
                    image: value.to_string(),
                    hidden_in_list: false,
                }))
            }
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            self.visit_str(&value)
        }

        fn visit_map<M>(self, map: M) -> std::result::Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let cover =
                CoverConfig::deserialize(de::value::MapAccessDeserializer::new(map))?;
            if cover.image.is_empty() {
                Ok(None)
            } else {
                Ok(Some(cover))
            }
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(CoverOrUrl)
}

/// Cover image settings, stored as a nested block in the header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoverConfig {
    /// Site-relative cover URL
    pub image: String,
    /// Whether list pages hide the cover
    #[serde(rename = "hiddenInList")]
    pub hidden_in_list: bool,
}

/// Front-matter data of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFrontMatter {
    pub title: String,
    /// Creation date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Last modification timestamp, RFC 3339
    pub lastmod: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_first")]
    pub author: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub keywords: Vec<String>,
    #[serde(alias = "coverImage", deserialize_with = "cover_or_url")]
    pub cover: Option<CoverConfig>,
    /// Custom URL slug overriding the title-derived one
    pub slug: Option<String>,
    pub weight: i32,
}

impl Default for PostFrontMatter {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: None,
            lastmod: None,
            description: None,
            author: default_author(),
            tags: Vec::new(),
            keywords: Vec::new(),
            cover: None,
            slug: None,
            weight: 1,
        }
    }
}

/// Default author for posts that do not name one
pub fn default_author() -> String {
    "Aries".to_string()
}

/// Parse a document into front matter and body
///
/// A document without an opening fence is all body with default front
/// matter. An opened but never closed header, or YAML the header contains
/// that cannot be parsed, is a `MalformedDocument`.
pub fn parse(content: &str, source: &Path) -> Result<(PostFrontMatter, String)> {
    let rest = match content.strip_prefix(FENCE) {
        // the fence must be a line of its own
        Some(r) if r.is_empty() || r.starts_with('\n') || r.starts_with("\r\n") => r,
        _ => return Ok((PostFrontMatter::default(), content.to_string())),
    };
    let rest = strip_line_ending(rest);

    let (header, after) = split_closing_fence(rest).ok_or_else(|| WriterError::MalformedDocument {
        path: source.to_path_buf(),
        reason: "front-matter header is never closed".to_string(),
    })?;

    let mut fm = if header.trim().is_empty() {
        PostFrontMatter::default()
    } else {
        serde_yaml::from_str::<PostFrontMatter>(header).map_err(|e| {
            WriterError::MalformedDocument {
                path: source.to_path_buf(),
                reason: e.to_string(),
            }
        })?
    };

    if fm.author.trim().is_empty() {
        fm.author = default_author();
    } else {
        fm.author = fm.author.trim().to_string();
    }
    if fm.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
        fm.description = None;
    }
    if fm.slug.as_deref().is_some_and(|s| s.trim().is_empty()) {
        fm.slug = None;
    }

    Ok((fm, after.to_string()))
}

/// Find the closing fence line; returns the header text and the body after
/// the fence line plus the single blank separator line `encode` emits
fn split_closing_fence(rest: &str) -> Option<(&str, &str)> {
    // an empty header closes on the very next line
    if let Some(after) = rest.strip_prefix(FENCE) {
        if after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n") {
            return Some(("", strip_body_prefix(after)));
        }
    }

    let mut search_from = 0;
    loop {
        let pos = search_from + rest[search_from..].find("\n---")?;
        let after_fence = &rest[pos + 4..];
        if after_fence.is_empty()
            || after_fence.starts_with('\n')
            || after_fence.starts_with("\r\n")
        {
            return Some((&rest[..pos], strip_body_prefix(after_fence)));
        }
        search_from = pos + 1;
    }
}

/// Drop the closing fence's own line ending, then the blank separator line
fn strip_body_prefix(after: &str) -> &str {
    strip_line_ending(strip_line_ending(after))
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

/// Serialize front matter and body into a single document
///
/// Fields appear in a fixed order; empty fields are omitted except `title`
/// and `weight`, which are always present. String values are quoted.
pub fn encode(fm: &PostFrontMatter, body: &str) -> String {
    let mut out = String::from("---\n");

    out.push_str(&format!("title: \"{}\"\n", escape(&fm.title)));

    if let Some(date) = fm.date.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("date: {}\n", date));
    }
    if let Some(lastmod) = fm.lastmod.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("lastmod: {}\n", lastmod));
    }
    if let Some(description) = fm.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("description: \"{}\"\n", escape(description)));
    }
    if !fm.author.is_empty() {
        out.push_str(&format!("author: \"{}\"\n", escape(&fm.author)));
    }
    if !fm.tags.is_empty() {
        out.push_str(&format!("tags: [{}]\n", quoted_list(&fm.tags)));
    }
    if !fm.keywords.is_empty() {
        out.push_str(&format!("keywords: [{}]\n", quoted_list(&fm.keywords)));
    }
    if let Some(cover) = fm.cover.as_ref().filter(|c| !c.image.is_empty()) {
        out.push_str(&format!(
            "cover:\n    image: \"{}\"\n    hiddenInList: {}\n",
            escape(&cover.image),
            cover.hidden_in_list
        ));
    }
    if let Some(slug) = fm.slug.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("slug: \"{}\"\n", escape(slug)));
    }
    out.push_str(&format!("weight: {}\n", fm.weight));

    out.push_str("---\n\n");
    out.push_str(body);
    out
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", escape(item)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        let inner = &s[1..s.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(c);
            }
        }
        out
    } else {
        s.to_string()
    }
}

/// `key: value` accessor for the summary line scan
fn key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?.strip_prefix(':')
}

/// Split a `[a, b]` or bare `a, b` value into trimmed entries
fn split_inline_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    value
        .split(',')
        .map(unquote)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lightweight decode for listing
///
/// Scans header lines for the summary fields without parsing the body or
/// building a full `PostFrontMatter`. A document without a header keeps the
/// filename-derived fallbacks.
pub fn parse_summary(content: &str, file_stem: &str) -> PostSummary {
    let mut summary = PostSummary {
        title: file_stem.to_string(),
        slug: split_filename(file_stem)
            .map(|(_, slug)| slug.to_string())
            .unwrap_or_default(),
        ..Default::default()
    };
    if let Some((date, _)) = split_filename(file_stem) {
        summary.date = date.to_string();
    }

    let rest = match content.strip_prefix(FENCE) {
        Some(r) if r.is_empty() || r.starts_with('\n') || r.starts_with("\r\n") => r,
        _ => return summary,
    };

    let mut in_cover = false;
    let mut in_keywords = false;

    for raw_line in rest.lines() {
        let trimmed = raw_line.trim();
        if trimmed == FENCE {
            break;
        }

        if in_keywords {
            if let Some(item) = trimmed.strip_prefix('-') {
                let keyword = unquote(item);
                if !keyword.is_empty() {
                    summary.keywords.push(keyword);
                }
                continue;
            }
            if trimmed.is_empty() || raw_line.starts_with(' ') {
                continue;
            }
            in_keywords = false;
        }

        if in_cover {
            if let Some(value) = key_value(trimmed, "image") {
                summary.cover_image = unquote(value);
                continue;
            }
            if raw_line.starts_with(' ') || trimmed.is_empty() {
                continue;
            }
            in_cover = false;
        }

        if let Some(value) = key_value(trimmed, "title") {
            let title = unquote(value);
            if !title.is_empty() {
                summary.title = title;
            }
        } else if let Some(value) = key_value(trimmed, "slug") {
            let slug = unquote(value);
            if !slug.is_empty() {
                summary.slug = slug;
            }
        } else if let Some(value) = key_value(trimmed, "date") {
            summary.date = unquote(value);
        } else if let Some(value) = key_value(trimmed, "lastmod") {
            summary.lastmod = unquote(value);
        } else if let Some(value) = key_value(trimmed, "keywords") {
            if value.trim().is_empty() {
                in_keywords = true;
            } else {
                summary.keywords = split_inline_list(value);
            }
        } else if let Some(value) = key_value(trimmed, "cover") {
            if value.trim().is_empty() {
                in_cover = true;
            } else {
                summary.cover_image = unquote(value);
            }
        } else if let Some(value) = key_value(trimmed, "coverImage") {
            summary.cover_image = unquote(value);
        }
    }

    summary
}
