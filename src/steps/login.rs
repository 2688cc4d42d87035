//! Login steps
//!
//! Fluent steps over [`LoginPage`]. `submit` and the `login` composite are
//! terminal; the rest chain.

use anyhow::Result;
use tracing::info;

use crate::browser::BrowserSession;
use crate::pages::LoginPage;

pub struct LoginSteps<'a> {
    page: LoginPage<'a>,
}

impl<'a> LoginSteps<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self {
            page: LoginPage::new(session),
        }
    }

    /// Open the login page
    pub async fn open_login_page(&mut self, url: &str) -> Result<&mut Self> {
        info!("Step: open login page {url}");
        self.page.open(url).await?;
        Ok(self)
    }

    /// Enter the username
    pub async fn enter_login(&mut self, username: &str) -> Result<&mut Self> {
        info!("Step: enter login '{username}'");
        self.page.enter_login(username).await?;
        Ok(self)
    }

    /// Enter the password
    pub async fn enter_password(&mut self, password: &str) -> Result<&mut Self> {
        info!("Step: enter password");
        self.page.enter_password(password).await?;
        Ok(self)
    }

    /// Submit the login form. Terminal step.
    pub async fn submit(&mut self) -> Result<()> {
        info!("Step: submit login form");
        self.page.submit().await
    }

    /// Full login flow: open page, enter credentials, submit.
    pub async fn login(&mut self, url: &str, username: &str, password: &str) -> Result<()> {
        info!("Step: log in as '{username}'");
        self.open_login_page(url)
            .await?
            .enter_login(username)
            .await?
            .enter_password(password)
            .await?
            .submit()
            .await
    }
}
