use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use tabgrab_model::{Asset, Revision, RevisionExport};

use crate::client::Client;
use crate::error::AcquireError;

/// Tab page URLs carry the song id as a `-s<digits>` path suffix, e.g.
/// `https://www.songsterr.com/a/wsa/pissgrave-rusted-wind-tab-s505453`.
fn song_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-s(\d+)").expect("valid regex"))
}

/// Extract the numeric song id from a tab page URL.
pub fn extract_song_id(url: &str) -> Result<u64, AcquireError> {
    let parsed = Url::parse(url)
        .map_err(|e| AcquireError::resolution(url, format!("not a valid URL: {e}")))?;

    let host = parsed.host_str().unwrap_or("");
    if host != "songsterr.com" && !host.ends_with(".songsterr.com") {
        return Err(AcquireError::resolution(
            url,
            format!("unexpected host '{host}'"),
        ));
    }

    let captures = song_id_pattern()
        .captures(parsed.path())
        .ok_or_else(|| AcquireError::resolution(url, "no song id in URL path"))?;

    captures[1]
        .parse()
        .map_err(|_| AcquireError::resolution(url, "song id out of range"))
}

/// Fetch the revision list for a song. An empty list is a resolution
/// failure: every downloadable tab has at least one revision.
pub async fn revisions(client: &Client, song_id: u64) -> Result<Vec<Revision>, AcquireError> {
    let url = format!("{}/api/meta/{song_id}/revisions", client.api_base());
    let revisions: Vec<Revision> = client.get_json(&url).await?;

    if revisions.is_empty() {
        return Err(AcquireError::resolution(&url, "no revisions returned"));
    }

    tracing::debug!(song_id, count = revisions.len(), "Fetched revision list");
    Ok(revisions)
}

/// Resolve a revision to its downloadable asset.
///
/// The revision endpoint's payload carries the Guitar Pro export URL in
/// `source` plus the artist/title the filename is derived from.
pub async fn resolve_asset(client: &Client, revision_id: u64) -> Result<Asset, AcquireError> {
    let url = format!("{}/api/revision/{revision_id}", client.api_base());
    let export: RevisionExport = client.get_json(&url).await?;

    let source = export
        .source
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AcquireError::resolution(&url, "no export URL in revision data"))?;

    let asset = Asset::new(source, export.artist.as_deref(), export.title.as_deref());
    tracing::info!(revision_id, url = %asset.url, file = %asset.filename, "Resolved export asset");
    Ok(asset)
}
