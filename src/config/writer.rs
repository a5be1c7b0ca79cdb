//! Writer configuration (_writer.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main writer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Directory holding the post documents
    pub content_dir: String,
    /// Top-level directory of the generated site; empty disables
    /// site-relative URL rewriting
    pub site_root: String,
    /// Directory where uploaded cover images live
    pub image_dir: String,
    /// Folder under the site root served from the URL root
    pub static_dir: String,
    /// Author recorded when a post does not name one
    pub default_author: String,
    /// Posts per page when listing
    pub per_page: usize,

    /// Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            content_dir: "content/posts".to_string(),
            site_root: String::new(),
            image_dir: String::new(),
            static_dir: "static".to_string(),
            default_author: "Aries".to_string(),
            per_page: 10,
            extra: HashMap::new(),
        }
    }
}

impl WriterConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: WriterConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
