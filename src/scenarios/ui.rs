//! UI scenarios for authentication and widget creation
//!
//! Each scenario owns its browser session: acquire, drive, assert, release.
//! The session is closed on every path, including assertion failures and
//! step errors.

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::browser::BrowserSession;
use crate::config::Settings;
use crate::models::{Scenario, ScenarioResult};
use crate::steps::{LoginSteps, WidgetSteps};
use crate::utils::timer::Timer;

/// Suffix appended to the configured password to force a rejected login
const INVALID_PASSWORD_SUFFIX: &str = "_invalid";

/// Landing URL fragment that marks a completed login
fn post_login_marker(settings: &Settings) -> String {
    format!("#{}/launches/all", settings.project_name())
}

/// Scenario 3: login with valid credentials lands on the launches view
pub struct ValidLoginScenario<'a> {
    settings: &'a Settings,
}

impl<'a> ValidLoginScenario<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::ValidLogin);
        let timer = Timer::start("valid login scenario");

        let session = BrowserSession::launch(self.settings).await?;
        let outcome = self.drive(&session, &timer).await;
        session.close().await;
        outcome
    }

    async fn drive(&self, session: &BrowserSession, timer: &Timer) -> Result<ScenarioResult> {
        LoginSteps::new(session)
            .login(
                self.settings.base_url(),
                self.settings.username(),
                self.settings.password(),
            )
            .await?;

        let marker = post_login_marker(self.settings);
        let reached = session.wait_for_url_contains(&marker).await?;
        let duration_ms = timer.elapsed_ms();

        if reached {
            Ok(ScenarioResult::pass(Scenario::ValidLogin, duration_ms))
        } else {
            Ok(ScenarioResult::fail(
                Scenario::ValidLogin,
                duration_ms,
                format!("URL never contained '{marker}' after login"),
            ))
        }
    }
}

/// Scenario 4 (negative): login with invalid credentials must not reach
/// the launches view
pub struct InvalidLoginScenario<'a> {
    settings: &'a Settings,
}

impl<'a> InvalidLoginScenario<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::InvalidLogin);
        let timer = Timer::start("invalid login scenario");

        let session = BrowserSession::launch(self.settings).await?;
        let outcome = self.drive(&session, &timer).await;
        session.close().await;
        outcome
    }

    async fn drive(&self, session: &BrowserSession, timer: &Timer) -> Result<ScenarioResult> {
        let bad_password = format!("{}{}", self.settings.password(), INVALID_PASSWORD_SUFFIX);

        LoginSteps::new(session)
            .login(self.settings.base_url(), self.settings.username(), &bad_password)
            .await?;

        // The rejection is observed as an absence: the post-login marker must
        // not show up within the short window.
        let marker = post_login_marker(self.settings);
        let reached = session
            .url_contains_within(&marker, session.probe_timeout())
            .await?;
        let duration_ms = timer.elapsed_ms();

        if reached {
            Ok(ScenarioResult::fail(
                Scenario::InvalidLogin,
                duration_ms,
                format!("Login with invalid credentials reached '{marker}'"),
            ))
        } else {
            Ok(ScenarioResult::pass(Scenario::InvalidLogin, duration_ms))
        }
    }
}

/// Scenario 5: create a widget through the wizard, creating a filter on
/// the way when none exists, and observe the success notification
pub struct CreateWidgetScenario<'a> {
    settings: &'a Settings,
}

impl<'a> CreateWidgetScenario<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::CreateWidgetWithFilter);
        let timer = Timer::start("create widget scenario");

        let session = BrowserSession::launch(self.settings).await?;
        let outcome = self.drive(&session, &timer).await;
        session.close().await;
        outcome
    }

    async fn drive(&self, session: &BrowserSession, timer: &Timer) -> Result<ScenarioResult> {
        LoginSteps::new(session)
            .login(
                self.settings.base_url(),
                self.settings.username(),
                self.settings.password(),
            )
            .await?;

        let marker = post_login_marker(self.settings);
        if !session.wait_for_url_contains(&marker).await? {
            return Ok(ScenarioResult::fail(
                Scenario::CreateWidgetWithFilter,
                timer.elapsed_ms(),
                "Login did not complete before the widget flow",
            ));
        }

        let added = WidgetSteps::new(session, self.settings.project_name())
            .create_widget_with_filter()
            .await?;
        let duration_ms = timer.elapsed_ms();

        if added {
            Ok(
                ScenarioResult::pass(Scenario::CreateWidgetWithFilter, duration_ms)
                    .with_details(json!({ "notification": "success" })),
            )
        } else {
            Ok(ScenarioResult::fail(
                Scenario::CreateWidgetWithFilter,
                duration_ms,
                "Success notification did not appear after confirming the widget",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings() -> Settings {
        let mut map = HashMap::new();
        map.insert("base.api.url".into(), "http://rp.local:8080/api".into());
        map.insert("api.token".into(), "token".into());
        map.insert("project.name".into(), "default_personal".into());
        map.insert("base.url".into(), "http://rp.local:8080/ui".into());
        map.insert("username".into(), "default".into());
        map.insert("password".into(), "1q2w3e".into());
        Settings::from_map(map).unwrap()
    }

    #[test]
    fn test_post_login_marker_is_project_scoped() {
        assert_eq!(
            post_login_marker(&settings()),
            "#default_personal/launches/all"
        );
    }
}
