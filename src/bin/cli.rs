// CLI binary — panicking on unrecoverable errors is standard for CLI tools.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use geojson_app::launcher::{self, RetryPolicy};
use geojson_app::protocol::{self, Command, OpenPayload, COMMAND_PORT};
use geojson_app::theme::Theme;

// ── CLI argument parsing ─────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "geojson",
    about = "Open a GeoJSON file or piped data in the GeoJSON app",
    version
)]
struct Cli {
    /// GeoJSON file to open. Omit it to read document data from stdin.
    file: Option<PathBuf>,

    /// Map theme: dark, light, outdoors, satellite, streets, or
    /// satellite-streets. Anything else is ignored.
    #[arg(long)]
    theme: Option<String>,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A theme outside the closed set is treated as unset, not as an error.
    let theme = cli.theme.as_deref().and_then(Theme::parse);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .expect("failed to build HTTP client");
    let base_url = protocol::base_url(COMMAND_PORT);

    // Reach the running instance, starting one if needed.
    if let Err(e) = launcher::wait_for_server(
        &client,
        &base_url,
        &RetryPolicy::default(),
        launcher::spawn_app_process,
    )
    .await
    {
        eprintln!("geojson: {e}");
        process::exit(1);
    }

    // Build the one command this invocation delivers.
    let command = if let Some(file) = cli.file {
        // A positional argument wins; stdin is never consumed.
        let absolute = std::path::absolute(&file).unwrap_or(file);
        Command {
            theme,
            payload: Some(OpenPayload::File(absolute)),
        }
    } else {
        match launcher::drain_input(tokio::io::stdin()).await {
            // EOF before any data: nothing was piped, nothing to send.
            Ok(None) => return,
            Ok(Some(data)) => Command {
                theme,
                payload: Some(OpenPayload::Data(data)),
            },
            Err(e) => {
                eprintln!("geojson: failed to read stdin: {e}");
                process::exit(1);
            }
        }
    };

    if let Err(e) = launcher::send_open(&client, &base_url, &command.to_request()).await {
        eprintln!("geojson: {e}");
        process::exit(1);
    }
}
