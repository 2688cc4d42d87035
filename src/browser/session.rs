//! Browser session handle
//!
//! One `BrowserSession` per scenario: the scenario creates it, drives it, and
//! closes it unconditionally at the end. Interactions use the bounded
//! explicit wait; [`BrowserSession::probe`] uses the short bounded wait and
//! returns found/not-found instead of failing, which is how branch decisions
//! are made (e.g. select an existing filter vs create one).

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::browser::driver::{BrowserError, DriverCommand, PlaywrightDriver};
use crate::config::Settings;

const URL_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Exclusive browser session for a single scenario
pub struct BrowserSession {
    driver: PlaywrightDriver,
    wait_timeout: Duration,
    probe_timeout: Duration,
}

impl BrowserSession {
    /// Launch a browser session configured from suite settings
    pub async fn launch(settings: &Settings) -> Result<Self> {
        let driver = PlaywrightDriver::launch(settings.headless())
            .await
            .context("Failed to launch browser session")?;

        Ok(Self {
            driver,
            wait_timeout: settings.wait_timeout(),
            probe_timeout: settings.probe_timeout(),
        })
    }

    /// Navigate to an absolute URL
    pub async fn open(&self, url: &str) -> Result<()> {
        debug!("Navigating to {url}");
        self.run(DriverCommand::Goto {
            url: url.to_string(),
        })
        .await
    }

    /// Click once the element is interactable
    pub async fn click(&self, selector: &str) -> Result<()> {
        self.run(DriverCommand::Click {
            selector: selector.to_string(),
            timeout_ms: self.wait_timeout.as_millis() as u64,
        })
        .await
    }

    /// Replace the element's value once it is interactable
    pub async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.run(DriverCommand::Fill {
            selector: selector.to_string(),
            value: value.to_string(),
            timeout_ms: self.wait_timeout.as_millis() as u64,
        })
        .await
    }

    /// Wait for the element to become visible; timing out fails the scenario
    pub async fn wait_visible(&self, selector: &str) -> Result<()> {
        self.run(DriverCommand::WaitFor {
            selector: selector.to_string(),
            timeout_ms: self.wait_timeout.as_millis() as u64,
        })
        .await
    }

    /// Presence probe with the short bounded wait. Not finding the element
    /// is a result, not a failure: the caller commits to its alternate
    /// branch and never revisits this one.
    pub async fn probe(&self, selector: &str) -> Result<bool> {
        self.probe_within(selector, self.probe_timeout).await
    }

    /// Presence probe with an explicit window
    pub async fn probe_within(&self, selector: &str, window: Duration) -> Result<bool> {
        let response = self
            .driver
            .send(DriverCommand::Probe {
                selector: selector.to_string(),
                timeout_ms: window.as_millis() as u64,
            })
            .await?;

        if !response.ok {
            return Err(step_error(response.error).into());
        }

        let found = response.found.unwrap_or(false);
        debug!("Probe '{selector}': found={found}");
        Ok(found)
    }

    /// Current page URL
    pub async fn current_url(&self) -> Result<String> {
        let response = self.driver.send(DriverCommand::CurrentUrl).await?;
        if !response.ok {
            return Err(step_error(response.error).into());
        }
        response
            .url
            .ok_or_else(|| BrowserError::Protocol("current_url response without url".to_string()).into())
    }

    /// Poll the page URL until it contains `marker`, bounded by the explicit
    /// wait. Returns found/not-found rather than failing on timeout.
    pub async fn wait_for_url_contains(&self, marker: &str) -> Result<bool> {
        self.url_contains_within(marker, self.wait_timeout).await
    }

    /// URL poll with an explicit window
    pub async fn url_contains_within(&self, marker: &str, window: Duration) -> Result<bool> {
        let deadline = Instant::now() + window;

        loop {
            let url = self.current_url().await?;
            if url.contains(marker) {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                debug!("URL never contained '{marker}' within {window:?} (last: {url})");
                return Ok(false);
            }
            sleep(URL_POLL_INTERVAL).await;
        }
    }

    /// Short bounded wait used for branch probes
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Bounded explicit wait used for interactions
    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    /// Close the browser and reap the driver. Called unconditionally at
    /// scenario end; the driver's Drop impl is only a backstop for panics.
    pub async fn close(mut self) {
        self.driver.shutdown().await;
    }

    async fn run(&self, command: DriverCommand) -> Result<()> {
        let response = self.driver.send(command).await?;
        if !response.ok {
            return Err(step_error(response.error).into());
        }
        Ok(())
    }
}

fn step_error(error: Option<String>) -> BrowserError {
    BrowserError::StepFailed(error.unwrap_or_else(|| "unknown driver error".to_string()))
}
