//! Check a title for collisions

use anyhow::Result;

use crate::content::duplicate;
use crate::Writer;

/// Report whether a title would collide with an existing post
pub fn run(writer: &Writer, title: &str) -> Result<()> {
    match duplicate::check(title, &writer.content_dir)? {
        Some(existing) => println!("Duplicate: \"{}\" conflicts with {:?}", title, existing),
        None => println!("Available: \"{}\"", title),
    }

    Ok(())
}
