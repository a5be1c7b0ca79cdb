//! hugo-writer-rs: a post repository and front-matter engine for Hugo-style sites
//!
//! This crate manages a directory of markdown articles with structured
//! front-matter headers: it creates, loads, updates, deletes, lists and
//! duplicate-checks posts, and resolves cover-image paths into
//! site-relative URLs.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::PostRepository;

/// The main writer application
#[derive(Clone)]
pub struct Writer {
    /// Writer configuration
    pub config: config::WriterConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post documents
    pub content_dir: PathBuf,
}

impl Writer {
    /// Create a new Writer instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_writer.yml");

        let config = if config_path.exists() {
            config::WriterConfig::load(&config_path)?
        } else {
            config::WriterConfig::default()
        };

        let content_dir = if Path::new(&config.content_dir).is_absolute() {
            PathBuf::from(&config.content_dir)
        } else {
            base_dir.join(&config.content_dir)
        };

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Repository over the configured content directory
    pub fn repository(&self) -> PostRepository {
        PostRepository::new(&self.config)
    }
}
