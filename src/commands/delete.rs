//! Delete a post and its cover image

use anyhow::Result;

use crate::Writer;

/// Delete a post by title
pub fn run(writer: &Writer, title: &str) -> Result<()> {
    writer.repository().delete(
        title,
        &writer.content_dir,
        &writer.config.image_dir,
        &writer.config.site_root,
    )?;
    println!("Deleted: {}", title);

    Ok(())
}
