use serde::Deserialize;

/// A search hit from the song search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub song_id: u64,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
}

/// One revision of a tab, as listed by the revisions endpoint.
///
/// A tab usually has a single revision; transcription updates add more.
/// The revision with the highest `revision_id` is the current one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub revision_id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub profile_name: Option<String>,
}

impl Revision {
    /// Author profile name, if the service included one.
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref()?.profile_name.as_deref()
    }
}

/// The revision endpoint's payload: where the Guitar Pro export lives,
/// plus the metadata the filename is derived from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionExport {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Pick the current revision: highest revision id wins.
pub fn latest_revision_id(revisions: &[Revision]) -> Option<u64> {
    revisions.iter().map(|r| r.revision_id).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_hits() {
        let json = r#"[
            {"songId": 455052, "artist": "Viagra Boys", "title": "Sports", "tracks": []},
            {"songId": 68807, "artist": "Amebix", "title": "Chain Reaction"}
        ]"#;

        let songs: Vec<Song> = serde_json::from_str(json).unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].song_id, 455052);
        assert_eq!(songs[0].artist, "Viagra Boys");
        assert_eq!(songs[1].title, "Chain Reaction");
    }

    #[test]
    fn test_parse_revisions() {
        let json = r#"[
            {"revisionId": 100, "createdAt": "2020-01-01T00:00:00Z",
             "author": {"profileName": "someone"}},
            {"revisionId": 250},
            {"revisionId": 175, "author": {}}
        ]"#;

        let revisions: Vec<Revision> = serde_json::from_str(json).unwrap();
        assert_eq!(revisions.len(), 3);
        assert_eq!(revisions[0].author_name(), Some("someone"));
        assert_eq!(revisions[1].author_name(), None);
        assert_eq!(revisions[2].author_name(), None);
    }

    #[test]
    fn test_latest_revision_is_highest_id() {
        let json = r#"[{"revisionId": 100}, {"revisionId": 250}, {"revisionId": 175}]"#;
        let revisions: Vec<Revision> = serde_json::from_str(json).unwrap();

        assert_eq!(latest_revision_id(&revisions), Some(250));
        assert_eq!(latest_revision_id(&[]), None);
    }

    #[test]
    fn test_parse_revision_export() {
        let json = r#"{
            "source": "https://gp.example.com/files/123.gp5",
            "artist": "Pissgrave",
            "title": "Rusted Wind",
            "tracks": [{"title": "Guitar"}]
        }"#;

        let export: RevisionExport = serde_json::from_str(json).unwrap();
        assert_eq!(export.source.as_deref(), Some("https://gp.example.com/files/123.gp5"));
        assert_eq!(export.artist.as_deref(), Some("Pissgrave"));

        // A payload without a source must still deserialize; the caller
        // decides whether that is an error.
        let export: RevisionExport = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert!(export.source.is_none());
    }
}
