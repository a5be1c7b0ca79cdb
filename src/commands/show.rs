//! Show a stored post

use anyhow::Result;

use crate::Writer;

/// Print a post's fields and body
pub fn run(writer: &Writer, title: &str) -> Result<()> {
    let post = writer.repository().load(title, &writer.content_dir)?;
    let fm = &post.front_matter;

    println!("Title:  {}", fm.title);
    if let Some(date) = &fm.date {
        println!("Date:   {}", date);
    }
    println!("Author: {}", fm.author);
    if !fm.tags.is_empty() {
        println!("Tags:   {}", fm.tags.join(", "));
    }
    if let Some(cover) = &fm.cover {
        println!("Cover:  {}", cover.image);
    }
    println!("File:   {:?}", post.source);
    println!();
    println!("{}", post.body);

    Ok(())
}
