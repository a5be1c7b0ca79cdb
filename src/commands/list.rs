//! List posts with search and pagination

use anyhow::Result;

use crate::Writer;

/// List posts, one line per entry, newest first
pub fn run(writer: &Writer, page: usize, page_size: Option<usize>, search: &str) -> Result<()> {
    let page_size = page_size.unwrap_or(writer.config.per_page);
    let result = writer.repository().list(
        &writer.content_dir,
        &writer.config.site_root,
        &writer.config.image_dir,
        page,
        page_size,
        search,
    )?;

    let page_count = result.total_count.div_ceil(result.page_size).max(1);
    println!(
        "Posts ({}), page {}/{}:",
        result.total_count, result.page, page_count
    );
    for item in &result.items {
        let cover = if item.cover_image.is_empty() {
            String::new()
        } else {
            format!(" [{}]", item.cover_image)
        };
        println!("  {} - {}{}", item.date, item.title, cover);
    }

    Ok(())
}
