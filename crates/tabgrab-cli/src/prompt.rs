use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Select};

use tabgrab_model::{latest_revision_id, Revision, Song};

/// Ask the user to pick one search hit. A single hit is taken as-is.
pub fn pick_song(songs: &[Song]) -> Result<&Song> {
    if songs.len() == 1 {
        return Ok(&songs[0]);
    }

    let items: Vec<String> = songs
        .iter()
        .map(|s| format!("{} - {} (#{})", s.artist, s.title, s.song_id))
        .collect();

    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose a song")
        .items(&items)
        .default(0)
        .interact()
        .context("Song selection cancelled")?;

    Ok(&songs[idx])
}

/// Ask the user to pick a revision; the latest one is preselected so
/// hitting Enter keeps the default.
pub fn pick_revision(revisions: &[Revision]) -> Result<u64> {
    if revisions.len() == 1 {
        return Ok(revisions[0].revision_id);
    }

    let latest = latest_revision_id(revisions).context("no revisions to choose from")?;
    let default = revisions
        .iter()
        .position(|r| r.revision_id == latest)
        .unwrap_or(0);

    let items: Vec<String> = revisions
        .iter()
        .map(|r| {
            let created = r.created_at.as_deref().unwrap_or("?");
            let author = r.author_name().unwrap_or("?");
            let marker = if r.revision_id == latest { " (latest)" } else { "" };
            format!("revision {} / {created} / {author}{marker}", r.revision_id)
        })
        .collect();

    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose a revision")
        .items(&items)
        .default(default)
        .interact()
        .context("Revision selection cancelled")?;

    Ok(revisions[idx].revision_id)
}

/// Prompt for search text when interactive mode starts with no targets.
pub fn ask_search_text() -> Result<String> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Search text")
        .interact_text()
        .context("Search prompt cancelled")?;

    let text = text.trim().to_string();
    anyhow::ensure!(!text.is_empty(), "Search text cannot be empty");
    Ok(text)
}
