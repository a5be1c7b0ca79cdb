//! Rename a post

use anyhow::Result;

use crate::content::PostDraft;
use crate::Writer;

/// Re-title a stored post, keeping every other field
pub fn run(writer: &Writer, old_title: &str, new_title: &str) -> Result<()> {
    let repository = writer.repository();
    let post = repository.load(old_title, &writer.content_dir)?;
    let fm = &post.front_matter;

    let draft = PostDraft {
        title: new_title.to_string(),
        body: post.body.clone(),
        description: fm.description.clone().unwrap_or_default(),
        author: fm.author.clone(),
        tags: fm.tags.clone(),
        keywords: fm.keywords.clone(),
        cover_image: fm.cover.as_ref().map(|c| c.image.clone()).unwrap_or_default(),
        hidden_in_list: fm.cover.as_ref().map(|c| c.hidden_in_list).unwrap_or(false),
        slug: fm.slug.clone().unwrap_or_default(),
        weight: fm.weight,
    };

    let path = repository.update(old_title, &draft, &writer.content_dir)?;
    println!("Renamed \"{}\" to \"{}\": {:?}", old_title, new_title, path);

    Ok(())
}
