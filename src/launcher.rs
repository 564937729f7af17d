//! The launch coordinator: find or start the application process, then hand
//! it exactly one open command.
//!
//! The rendezvous is the command port. If nothing answers, the coordinator
//! spawns the application once (detached, so this process never blocks on
//! it) and keeps probing on a fixed cadence until the server comes up or
//! the retry budget runs out. Application cold start takes a few hundred
//! milliseconds on a warm machine, so the budget covers a few seconds.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;

use crate::error::AppError;
use crate::protocol::{OpenRequest, HEALTH_ROUTE, OPEN_ROUTE};

// ── Retry policy ─────────────────────────────────────────────────

/// Bounded retry budget for one coordinator run.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Grace period after spawning the application before the next probe.
    pub spawn_delay: Duration,
    /// Delay between probes once a spawn has been issued.
    pub retry_delay: Duration,
    /// Probes allowed after the spawn before giving up.
    pub ceiling: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            spawn_delay: Duration::from_millis(400),
            retry_delay: Duration::from_millis(100),
            ceiling: 50,
        }
    }
}

// ── Connect loop ─────────────────────────────────────────────────

/// Probe the server until it answers, spawning the application at most once.
///
/// Returns the number of post-spawn attempts it took. A spawn failure is
/// logged and otherwise treated like any connect failure: the loop keeps
/// probing until the ceiling, where it reports `ConnectFailed`.
pub async fn wait_for_server<F>(
    client: &reqwest::Client,
    base_url: &str,
    policy: &RetryPolicy,
    mut spawn_app: F,
) -> Result<u32, AppError>
where
    F: FnMut() -> Result<(), AppError>,
{
    let mut spawned = false;
    let mut attempts: u32 = 0;

    loop {
        if probe(client, base_url).await {
            return Ok(attempts);
        }

        if !spawned {
            if let Err(e) = spawn_app() {
                eprintln!("[GeoJSON] {e}");
            }
            spawned = true;
            tokio::time::sleep(policy.spawn_delay).await;
            continue;
        }

        attempts += 1;
        if attempts > policy.ceiling {
            return Err(AppError::ConnectFailed { attempts });
        }
        tokio::time::sleep(policy.retry_delay).await;
    }
}

async fn probe(client: &reqwest::Client, base_url: &str) -> bool {
    match client.get(format!("{base_url}{HEALTH_ROUTE}")).send().await {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}

/// Deliver one open command and wait for the acknowledgement.
pub async fn send_open(
    client: &reqwest::Client,
    base_url: &str,
    request: &OpenRequest,
) -> Result<(), AppError> {
    let resp = client
        .post(format!("{base_url}{OPEN_ROUTE}"))
        .json(request)
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(AppError::Api {
            message: format!("open command rejected: {}", resp.status()),
        });
    }
    Ok(())
}

// ── Application spawn ────────────────────────────────────────────

/// Locate the application executable: `GEOJSON_APP_BIN` when set, otherwise
/// `geojson-app` next to the current executable.
pub fn app_executable() -> PathBuf {
    if let Ok(path) = std::env::var("GEOJSON_APP_BIN") {
        return PathBuf::from(path);
    }
    let name = if cfg!(windows) {
        "geojson-app.exe"
    } else {
        "geojson-app"
    };
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(name)))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Start the application process in the background. The child is left
/// running on its own; this process never waits on it.
pub fn spawn_app_process() -> Result<(), AppError> {
    let exe = app_executable();
    std::process::Command::new(&exe)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| AppError::Spawn {
            message: format!("{}: {e}", exe.display()),
        })?;
    Ok(())
}

// ── Stdin draining ───────────────────────────────────────────────

/// Read piped input to EOF. Returns `None` when EOF arrives before any data
/// (an interactive invocation with nothing piped) so the caller can exit
/// cleanly instead of sending an empty command. Chunks are concatenated in
/// arrival order.
pub async fn drain_input<R>(mut input: R) -> std::io::Result<Option<String>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut data = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut received_any = false;

    loop {
        let n = input.read(&mut chunk).await?;
        if n == 0 {
            if !received_any {
                return Ok(None);
            }
            return Ok(Some(String::from_utf8_lossy(&data).into_owned()));
        }
        received_any = true;
        #[allow(clippy::indexing_slicing)] // n <= chunk.len() per the read contract
        data.extend_from_slice(&chunk[..n]);
    }
}
