//! Playwright driver process
//!
//! Spawns a Node script that keeps one browser page open for the lifetime of
//! a session and executes commands received as JSON lines on stdin, answering
//! with JSON lines on stdout. Commands are strictly sequential: one request
//! is answered before the next is sent.

use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Browser layer errors
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Playwright not found. Install with: npm install playwright && npx playwright install chromium")]
    PlaywrightNotFound,

    #[error("Failed to launch browser driver: {0}")]
    Launch(String),

    #[error("Browser driver closed unexpectedly")]
    DriverClosed,

    #[error("Driver protocol error: {0}")]
    Protocol(String),

    #[error("Browser step failed: {0}")]
    StepFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BrowserResult<T> = Result<T, BrowserError>;

/// A single driver command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DriverCommand {
    /// Navigate the page to an absolute URL
    Goto { url: String },

    /// Wait for the selector to become interactable, then click it
    Click { selector: String, timeout_ms: u64 },

    /// Wait for the selector to become interactable, then replace its value
    Fill {
        selector: String,
        value: String,
        timeout_ms: u64,
    },

    /// Wait for the selector to become visible; timing out is an error
    WaitFor { selector: String, timeout_ms: u64 },

    /// Presence probe: report whether the selector became visible within the
    /// window. Timing out is a result, not an error.
    Probe { selector: String, timeout_ms: u64 },

    /// Report the page's current URL
    CurrentUrl,

    /// Close the browser and exit the driver
    Close,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverRequest {
    pub id: u64,
    #[serde(flatten)]
    pub command: DriverCommand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverResponse {
    pub id: u64,
    pub ok: bool,
    #[serde(default)]
    pub found: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The Node driver script staged next to the spawned process. It answers the
/// ready line (id 0) once the browser page is open, then serves commands.
const DRIVER_JS: &str = r#"
const readline = require('readline');
const { chromium } = require('playwright');

(async () => {
  const headless = process.argv[2] !== 'headed';
  const browser = await chromium.launch({ headless });
  const context = await browser.newContext();
  const page = await context.newPage();

  const reply = (obj) => process.stdout.write(JSON.stringify(obj) + '\n');
  reply({ id: 0, ok: true });

  const rl = readline.createInterface({ input: process.stdin });
  for await (const line of rl) {
    if (!line.trim()) continue;
    let req;
    try {
      req = JSON.parse(line);
    } catch (e) {
      reply({ id: 0, ok: false, error: 'bad request: ' + e.message });
      continue;
    }
    try {
      switch (req.cmd) {
        case 'goto':
          await page.goto(req.url);
          reply({ id: req.id, ok: true });
          break;
        case 'click':
          await page.click(req.selector, { timeout: req.timeout_ms });
          reply({ id: req.id, ok: true });
          break;
        case 'fill':
          await page.fill(req.selector, req.value, { timeout: req.timeout_ms });
          reply({ id: req.id, ok: true });
          break;
        case 'wait_for':
          await page.waitForSelector(req.selector, { state: 'visible', timeout: req.timeout_ms });
          reply({ id: req.id, ok: true });
          break;
        case 'probe':
          try {
            await page.waitForSelector(req.selector, { state: 'visible', timeout: req.timeout_ms });
            reply({ id: req.id, ok: true, found: true });
          } catch (e) {
            reply({ id: req.id, ok: true, found: false });
          }
          break;
        case 'current_url':
          reply({ id: req.id, ok: true, url: page.url() });
          break;
        case 'close':
          reply({ id: req.id, ok: true });
          await browser.close();
          process.exit(0);
        default:
          reply({ id: req.id, ok: false, error: 'unknown command: ' + req.cmd });
      }
    } catch (e) {
      reply({ id: req.id, ok: false, error: e.message });
    }
  }
  await browser.close();
})();
"#;

struct DriverIo {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Handle to the running driver process
pub struct PlaywrightDriver {
    child: Child,
    io: Mutex<DriverIo>,
    next_id: AtomicU64,
    // Keeps the staged driver script alive for the lifetime of the process
    _script_dir: tempfile::TempDir,
}

impl PlaywrightDriver {
    /// Check that Playwright is installed
    fn check_playwright_installed() -> BrowserResult<()> {
        let status = std::process::Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(BrowserError::PlaywrightNotFound),
        }
    }

    /// Spawn the driver and wait for its ready line
    pub async fn launch(headless: bool) -> BrowserResult<Self> {
        Self::check_playwright_installed()?;

        let script_dir = tempfile::tempdir()?;
        let script_path = script_dir.path().join("driver.js");
        std::fs::write(&script_path, DRIVER_JS)?;

        debug!("Spawning browser driver: {}", script_path.display());

        let mut child = Command::new("node")
            .arg(&script_path)
            .arg(if headless { "headless" } else { "headed" })
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BrowserError::Launch("driver stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BrowserError::Launch("driver stdout unavailable".to_string()))?;

        let driver = Self {
            child,
            io: Mutex::new(DriverIo {
                stdin,
                stdout: BufReader::new(stdout),
            }),
            next_id: AtomicU64::new(1),
            _script_dir: script_dir,
        };

        // The driver answers id 0 once the browser page is open
        let ready = driver.read_response().await?;
        if ready.id != 0 || !ready.ok {
            return Err(BrowserError::Launch(
                ready.error.unwrap_or_else(|| "driver not ready".to_string()),
            ));
        }

        debug!("Browser driver ready");
        Ok(driver)
    }

    async fn read_response(&self) -> BrowserResult<DriverResponse> {
        let mut io = self.io.lock().await;
        let mut line = String::new();
        let read = io.stdout.read_line(&mut line).await?;
        if read == 0 {
            return Err(BrowserError::DriverClosed);
        }
        serde_json::from_str(line.trim())
            .map_err(|e| BrowserError::Protocol(format!("bad response line '{}': {e}", line.trim())))
    }

    /// Send one command and wait for its response line
    pub async fn send(&self, command: DriverCommand) -> BrowserResult<DriverResponse> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = DriverRequest { id, command };
        let line = serde_json::to_string(&request)?;

        let mut io = self.io.lock().await;
        io.stdin.write_all(line.as_bytes()).await?;
        io.stdin.write_all(b"\n").await?;
        io.stdin.flush().await?;

        let mut buf = String::new();
        let read = io.stdout.read_line(&mut buf).await?;
        if read == 0 {
            return Err(BrowserError::DriverClosed);
        }

        let response: DriverResponse = serde_json::from_str(buf.trim())
            .map_err(|e| BrowserError::Protocol(format!("bad response line '{}': {e}", buf.trim())))?;

        if response.id != id {
            return Err(BrowserError::Protocol(format!(
                "response id mismatch: sent {id}, got {}",
                response.id
            )));
        }

        Ok(response)
    }

    /// Ask the driver to close the browser and exit, then reap the child
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.send(DriverCommand::Close).await {
            warn!("Driver close command failed: {e}");
        }

        match tokio::time::timeout(std::time::Duration::from_secs(5), self.child.wait()).await {
            Ok(Ok(status)) => debug!("Browser driver exited: {status}"),
            _ => {
                warn!("Browser driver did not exit, killing");
                let _ = self.child.start_kill();
            }
        }
    }
}

impl Drop for PlaywrightDriver {
    fn drop(&mut self) {
        // kill_on_drop covers the child; this is only a fast-path reap
        let _ = self.child.start_kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = DriverRequest {
            id: 7,
            command: DriverCommand::Click {
                selector: "button[type='submit']".to_string(),
                timeout_ms: 10_000,
            },
        };

        let line = serde_json::to_string(&request).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["cmd"], "click");
        assert_eq!(value["selector"], "button[type='submit']");
        assert_eq!(value["timeout_ms"], 10_000);
    }

    #[test]
    fn test_unit_command_serialization() {
        let request = DriverRequest {
            id: 1,
            command: DriverCommand::CurrentUrl,
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(value["cmd"], "current_url");
    }

    #[test]
    fn test_response_deserialization() {
        let response: DriverResponse =
            serde_json::from_str(r#"{"id":3,"ok":true,"found":false}"#).unwrap();
        assert_eq!(response.id, 3);
        assert!(response.ok);
        assert_eq!(response.found, Some(false));
        assert!(response.url.is_none());

        let response: DriverResponse =
            serde_json::from_str(r#"{"id":4,"ok":false,"error":"timeout"}"#).unwrap();
        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_command_round_trip() {
        let command = DriverCommand::Probe {
            selector: ".inputRadio__toggler".to_string(),
            timeout_ms: 3_000,
        };
        let line = serde_json::to_string(&command).unwrap();
        let parsed: DriverCommand = serde_json::from_str(&line).unwrap();
        match parsed {
            DriverCommand::Probe {
                selector,
                timeout_ms,
            } => {
                assert_eq!(selector, ".inputRadio__toggler");
                assert_eq!(timeout_ms, 3_000);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
