use tabgrab_model::Song;

use crate::client::Client;
use crate::error::AcquireError;

/// Query the song search endpoint, preserving the service's ranking order.
///
/// Returns at most `max_results` hits; the `size` query parameter asks the
/// service for that many, and the list is capped locally as well in case
/// the service ignores it. Zero matches is a resolution failure.
pub async fn search(
    client: &Client,
    pattern: &str,
    max_results: usize,
) -> Result<Vec<Song>, AcquireError> {
    let url = format!("{}/api/songs", client.api_base());
    let query = [
        ("size", max_results.to_string()),
        ("pattern", pattern.to_string()),
    ];

    let mut songs: Vec<Song> = client.get_json_query(&url, &query).await?;

    if songs.is_empty() {
        return Err(AcquireError::resolution(pattern, "no songs matched the search"));
    }

    songs.truncate(max_results);
    tracing::info!(pattern = %pattern, hits = songs.len(), "Search complete");
    Ok(songs)
}
