use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::Read;

use anyhow::{Context, Result};

/// One user-supplied input item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A direct tab page URL.
    Url(String),
    /// A free-text search phrase.
    Search(String),
}

impl Target {
    pub fn as_str(&self) -> &str {
        match self {
            Target::Url(s) | Target::Search(s) => s,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Read newline-delimited targets from a file, or stdin when `path` is "-".
pub fn read_target_lines(path: &str) -> Result<Vec<String>> {
    let contents = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read targets from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read target file {path}"))?
    };

    Ok(filter_lines(&contents))
}

/// Trim lines, skipping blanks and `#` comments.
fn filter_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Build the target list from positional arguments and file/stdin lines.
///
/// Positional words that are not all URLs collapse into a single search
/// phrase; file lines are classified one by one. Duplicates are dropped,
/// first occurrence wins.
pub fn collect(positional: &[String], file_lines: &[String]) -> Vec<Target> {
    let mut targets = Vec::new();

    if !positional.is_empty() {
        if positional.iter().all(|arg| is_url(arg)) {
            targets.extend(positional.iter().cloned().map(Target::Url));
        } else {
            let phrase = positional.join(" ").trim().to_string();
            if !phrase.is_empty() {
                targets.push(Target::Search(phrase));
            }
        }
    }

    for line in file_lines {
        if is_url(line) {
            targets.push(Target::Url(line.clone()));
        } else {
            targets.push(Target::Search(line.clone()));
        }
    }

    dedupe(targets)
}

fn dedupe(targets: Vec<Target>) -> Vec<Target> {
    let mut seen = HashSet::new();
    targets
        .into_iter()
        .filter(|t| seen.insert(t.as_str().to_string()))
        .collect()
}
