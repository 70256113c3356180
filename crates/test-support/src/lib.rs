//! Helpers for integration tests that drive a spawned fixture server.

use anyhow::Context as _;
use std::net::TcpListener;
use std::process::{Child, Command};
use std::time::{Duration, Instant};

/// A fixture server process bound to a fresh localhost port.
///
/// The process is killed when the guard drops, so a failing test does not
/// leak servers.
pub struct FixtureServer {
    child: Child,
    base_url: String,
}

impl FixtureServer {
    /// Spawn `bin` with `--bind 127.0.0.1:<fresh port>` and extra arguments,
    /// then wait until `/health` answers.
    ///
    /// # Errors
    ///
    /// Returns an error if no port can be picked, the process cannot be
    /// spawned, or the server does not become healthy within 30 seconds.
    pub async fn spawn(bin: &str, extra_args: &[&str]) -> anyhow::Result<Self> {
        let port = pick_unused_port()?;
        let child = Command::new(bin)
            .arg("--bind")
            .arg(format!("127.0.0.1:{port}"))
            .arg("--log-level")
            .arg("warn")
            .args(extra_args)
            .spawn()
            .context("spawn fixture server")?;
        let server = Self {
            child,
            base_url: format!("http://127.0.0.1:{port}"),
        };
        wait_http_ok(&server.url("/health"), Duration::from_secs(30)).await?;
        Ok(server)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Pick an unused TCP port on localhost.
///
/// The port is not reserved; another process could still grab it between the
/// pick and the bind. Good enough for tests.
///
/// # Errors
///
/// Returns an error if binding an ephemeral localhost port fails.
pub fn pick_unused_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").context("bind ephemeral port")?;
    Ok(listener.local_addr()?.port())
}

/// Poll an HTTP URL until it returns a success status.
///
/// # Errors
///
/// Returns an error if the timeout elapses first.
pub async fn wait_http_ok(url: &str, timeout_dur: Duration) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > timeout_dur {
            anyhow::bail!("timed out waiting for {url}");
        }

        match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }
}
