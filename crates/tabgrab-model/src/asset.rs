use unicode_normalization::UnicodeNormalization;
use url::Url;

/// Fallback extension when the export URL's path has none.
const DEFAULT_EXT: &str = ".gp";

/// A resolved, directly downloadable tab file: the export URL plus the
/// filename it will be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub url: String,
    pub filename: String,
}

impl Asset {
    /// Build an asset for an export URL, deriving the filename as
    /// `{artist} - {title}{ext}` with the extension taken from the URL path.
    pub fn new(url: &str, artist: Option<&str>, title: Option<&str>) -> Self {
        let artist = sanitize_filename(artist.unwrap_or("Unknown Artist"));
        let title = sanitize_filename(title.unwrap_or("Unknown Title"));
        let ext = extension_of(url).unwrap_or_else(|| DEFAULT_EXT.to_string());

        Self {
            url: url.to_string(),
            filename: format!("{artist} - {title}{ext}"),
        }
    }
}

/// Normalize Unicode to NFC and replace characters that are illegal in
/// file names on common filesystems (`\ / : * ? " < > |`) with underscores.
///
/// NFC keeps accented artist names (Motörhead, Édith Piaf) as single
/// precomposed code points, so the same tab always lands on the same name.
pub fn sanitize_filename(input: &str) -> String {
    let nfc: String = input.nfc().collect();

    nfc.trim()
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// Extension (with leading dot) of the final path segment of `url`, if any.
fn extension_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{ext}"))
}
