//! Create a new post

use anyhow::Result;

use crate::content::{duplicate, PostDraft};
use crate::Writer;

/// Create a new post from a draft
///
/// The duplicate pre-check gives a friendlier message than the typed
/// error; the repository re-validates on write regardless.
pub fn run(writer: &Writer, draft: &PostDraft) -> Result<()> {
    if let Some(existing) = duplicate::check(&draft.title, &writer.content_dir)? {
        anyhow::bail!(
            "a post titled \"{}\" already exists at {:?}",
            draft.title,
            existing
        );
    }

    let path = writer.repository().save(draft, &writer.content_dir)?;
    println!("Created: {:?}", path);

    Ok(())
}
