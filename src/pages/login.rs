//! Login page
//!
//! Models the product's login form: name input, password input, submit.

use anyhow::Result;

use crate::browser::BrowserSession;

const LOGIN_INPUT: &str = "input[name='login']";
const PASSWORD_INPUT: &str = "input[type='password']";
const SUBMIT_BUTTON: &str = "button[type='submit']";

/// Page object for the login form
pub struct LoginPage<'a> {
    session: &'a BrowserSession,
}

impl<'a> LoginPage<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session }
    }

    /// Open the login page
    pub async fn open(&self, base_url: &str) -> Result<()> {
        self.session.open(base_url).await
    }

    /// Enter the username, replacing any existing value
    pub async fn enter_login(&self, login: &str) -> Result<()> {
        self.session.fill(LOGIN_INPUT, login).await
    }

    /// Enter the password, replacing any existing value
    pub async fn enter_password(&self, password: &str) -> Result<()> {
        self.session.fill(PASSWORD_INPUT, password).await
    }

    /// Submit the login form
    pub async fn submit(&self) -> Result<()> {
        self.session.click(SUBMIT_BUTTON).await
    }
}
