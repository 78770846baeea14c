use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tabgrab_acquire::{download, locate, search, Client};
use tabgrab_model::latest_revision_id;

mod prompt;
mod targets;

use crate::targets::Target;

#[derive(Parser)]
#[command(name = "tabgrab")]
#[command(about = "Download Guitar Pro tabs from Songsterr by URL or search")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Tab page URL(s), or search words joined into one phrase
    #[arg(value_name = "TARGET")]
    targets: Vec<String>,

    /// Output directory for downloaded tabs
    #[arg(short, long, default_value = "./output")]
    out: PathBuf,

    /// Read newline-delimited targets from a file ('-' for stdin)
    #[arg(short, long)]
    file: Option<String>,

    /// Prompt to choose among search results and revisions
    #[arg(short, long)]
    interactive: bool,

    /// Max search results to consider
    #[arg(long, default_value_t = 20)]
    max_results: usize,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let client = Client::new()?;
    let targets = collect_targets(&cli)?;
    let failed = run(&client, &targets, &cli).await;

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(cli: &Cli) {
    // Map log level, suppressing noisy HTTP internals at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,hyper_util=info,reqwest=info",
        LogLevel::Trace => "trace,hyper_util=info,reqwest=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamps like: 2026-08-06 10:15:42.003 +02:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(
                time_format.to_string(),
            ))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
                time_format.to_string(),
            ))
            .init();
    }
}

/// Assemble the target list from argv, `--file`, or piped stdin.
fn collect_targets(cli: &Cli) -> Result<Vec<Target>> {
    let mut file_lines = Vec::new();
    if let Some(path) = &cli.file {
        file_lines = targets::read_target_lines(path)?;
    } else if cli.targets.is_empty() && !cli.interactive && !std::io::stdin().is_terminal() {
        // Piped input with no other targets: read the pipe.
        file_lines = targets::read_target_lines("-")?;
    }

    let mut list = targets::collect(&cli.targets, &file_lines);

    if list.is_empty() {
        if cli.interactive {
            list.push(Target::Search(prompt::ask_search_text()?));
        } else {
            anyhow::bail!("no targets given (pass tab URLs, search words, or --file)");
        }
    }

    Ok(list)
}

/// Process every target, printing one status line per item. Failures do
/// not stop the batch; the count of failed items is returned.
async fn run(client: &Client, targets: &[Target], cli: &Cli) -> usize {
    let mut failed = 0;
    for target in targets {
        match process_target(client, target, cli).await {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                println!("OK: {name}");
            }
            Err(err) => {
                tracing::error!(item = %target, "Target failed: {err:#}");
                eprintln!("FAILED: {target}: {err:#}");
                failed += 1;
            }
        }
    }
    failed
}

/// The per-item pipeline: resolve the target to a song, pick a revision,
/// resolve its export asset, download it.
async fn process_target(client: &Client, target: &Target, cli: &Cli) -> Result<PathBuf> {
    let song_id = match target {
        Target::Url(url) => locate::extract_song_id(url)?,
        Target::Search(phrase) => {
            let songs = search::search(client, phrase, cli.max_results).await?;
            let song = if cli.interactive {
                prompt::pick_song(&songs)?
            } else {
                // Top-ranked hit is the documented non-interactive default
                songs.first().context("empty search result")?
            };
            tracing::info!(
                song_id = song.song_id,
                artist = %song.artist,
                title = %song.title,
                "Selected song"
            );
            song.song_id
        }
    };

    let revisions = locate::revisions(client, song_id).await?;
    let revision_id = if cli.interactive {
        prompt::pick_revision(&revisions)?
    } else {
        latest_revision_id(&revisions).context("no revisions returned")?
    };
    tracing::debug!(song_id, revision_id, "Using revision");

    let asset = locate::resolve_asset(client, revision_id).await?;
    let path = download::download(client, &asset, &cli.out).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_cli(out: &std::path::Path) -> Cli {
        Cli::parse_from(["tabgrab", "--out", out.to_str().unwrap()])
    }

    /// Mount the full happy path for one song id: revision list, revision
    /// export, and the export file itself.
    async fn mount_song(server: &MockServer, song_id: u64, title: &str) {
        let revision_id = song_id * 10;
        Mock::given(method("GET"))
            .and(path(format!("/api/meta/{song_id}/revisions")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"revisionId": revision_id - 1},
                {"revisionId": revision_id}
            ])))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/api/revision/{revision_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "source": format!("{}/files/{song_id}.gp5", server.uri()),
                "artist": "Artist",
                "title": title
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/files/{song_id}.gp5")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GP DATA".to_vec()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let server = MockServer::start().await;
        mount_song(&server, 101, "Song 101").await;
        mount_song(&server, 102, "Song 102").await;

        let out = tempfile::tempdir().unwrap();
        let cli = test_cli(out.path());
        let client = Client::with_api_base(server.uri()).unwrap();

        let targets = [
            Target::Url("https://www.songsterr.com/a/wsa/a-tab-s101".into()),
            Target::Url("https://www.songsterr.com/a/wsa/no-song-id-here".into()),
            Target::Url("https://www.songsterr.com/a/wsa/b-tab-s102".into()),
        ];

        let failed = run(&client, &targets, &cli).await;

        assert_eq!(failed, 1);
        assert!(out.path().join("Artist - Song 101.gp5").exists());
        assert!(out.path().join("Artist - Song 102.gp5").exists());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_search_target_takes_top_hit_non_interactive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .and(query_param("pattern", "viagra boys sports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"songId": 101, "artist": "Viagra Boys", "title": "Sports"},
                {"songId": 102, "artist": "Viagra Boys", "title": "Sports (live)"}
            ])))
            .mount(&server)
            .await;
        mount_song(&server, 101, "Sports").await;

        let out = tempfile::tempdir().unwrap();
        let cli = test_cli(out.path());
        let client = Client::with_api_base(server.uri()).unwrap();

        let target = Target::Search("viagra boys sports".into());
        let written = process_target(&client, &target, &cli).await.unwrap();

        assert_eq!(written, out.path().join("Artist - Sports.gp5"));
        assert!(written.exists());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_instead_of_duplicating() {
        let server = MockServer::start().await;
        mount_song(&server, 101, "Song 101").await;

        let out = tempfile::tempdir().unwrap();
        let cli = test_cli(out.path());
        let client = Client::with_api_base(server.uri()).unwrap();

        let target = Target::Url("https://www.songsterr.com/a/wsa/a-tab-s101".into());
        let first = process_target(&client, &target, &cli).await.unwrap();
        let second = process_target(&client, &target, &cli).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_collect_targets_requires_input_when_not_interactive() {
        let out = tempfile::tempdir().unwrap();
        let mut cli = test_cli(out.path());
        cli.targets.clear();
        // stdin is a pipe under the test harness, but --file takes priority
        // and an empty file yields no targets.
        let empty = out.path().join("empty.txt");
        std::fs::write(&empty, "# nothing here\n").unwrap();
        cli.file = Some(empty.to_str().unwrap().to_string());

        let err = collect_targets(&cli).unwrap_err();
        assert!(err.to_string().contains("no targets"));
    }
}
