//! CLI entry point for hugo-writer-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hugo_writer_rs::content::PostDraft;

#[derive(Parser)]
#[command(name = "hugo-writer-rs")]
#[command(version)]
#[command(about = "A post repository and front-matter engine for Hugo-style sites", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Read the body from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Short description for the header
        #[arg(long, default_value = "")]
        description: String,

        /// Author name (defaults to the configured author)
        #[arg(long, default_value = "")]
        author: String,

        /// Tags, repeatable or comma-separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Keywords, repeatable or comma-separated
        #[arg(short, long, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Cover image: an absolute path (rewritten to a site URL) or a
        /// site-relative URL
        #[arg(long, default_value = "")]
        cover: String,

        /// Hide the cover on list pages
        #[arg(long)]
        hidden: bool,

        /// Custom slug overriding the title-derived one
        #[arg(long, default_value = "")]
        slug: String,

        /// Ordering weight
        #[arg(short, long, default_value = "1")]
        weight: i32,
    },

    /// List posts
    #[command(alias = "ls")]
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Posts per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Filter by a case-insensitive search term
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show a stored post
    Show {
        /// Title of the post
        title: String,
    },

    /// Delete a post and its cover image
    Delete {
        /// Title of the post
        title: String,
    },

    /// Check whether a title collides with an existing post
    Check {
        /// Candidate title
        title: String,
    },

    /// Rename a post, keeping its other fields
    Rename {
        /// Current title
        old_title: String,

        /// New title
        new_title: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "hugo_writer_rs=debug,info"
    } else {
        "hugo_writer_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::New {
            title,
            file,
            description,
            author,
            tags,
            keywords,
            cover,
            hidden,
            slug,
            weight,
        } => {
            let writer = hugo_writer_rs::Writer::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);

            let body = match file {
                Some(path) => std::fs::read_to_string(&path)?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let cover_image = if cover.is_empty() {
                cover
            } else {
                hugo_writer_rs::helpers::to_site_url(
                    &cover,
                    &writer.config.site_root,
                    &writer.config.static_dir,
                )
            };

            let draft = PostDraft {
                title,
                body,
                description,
                author,
                tags,
                keywords,
                cover_image,
                hidden_in_list: hidden,
                slug,
                weight,
            };
            hugo_writer_rs::commands::new::run(&writer, &draft)?;
        }

        Commands::List {
            page,
            page_size,
            search,
        } => {
            let writer = hugo_writer_rs::Writer::new(&base_dir)?;
            hugo_writer_rs::commands::list::run(&writer, page, page_size, &search)?;
        }

        Commands::Show { title } => {
            let writer = hugo_writer_rs::Writer::new(&base_dir)?;
            hugo_writer_rs::commands::show::run(&writer, &title)?;
        }

        Commands::Delete { title } => {
            let writer = hugo_writer_rs::Writer::new(&base_dir)?;
            tracing::info!("Deleting post: {}", title);
            hugo_writer_rs::commands::delete::run(&writer, &title)?;
        }

        Commands::Check { title } => {
            let writer = hugo_writer_rs::Writer::new(&base_dir)?;
            hugo_writer_rs::commands::check::run(&writer, &title)?;
        }

        Commands::Rename {
            old_title,
            new_title,
        } => {
            let writer = hugo_writer_rs::Writer::new(&base_dir)?;
            tracing::info!("Renaming post: {} -> {}", old_title, new_title);
            hugo_writer_rs::commands::rename::run(&writer, &old_title, &new_title)?;
        }

        Commands::Version => {
            println!("hugo-writer-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
