//! Widget steps
//!
//! Fluent steps over [`DashboardPage`] for the add-widget wizard. The
//! `create_widget_with_filter` composite runs the whole flow in its fixed
//! order and reports whether the success notification was observed.

use anyhow::Result;
use tracing::{debug, info};

use crate::browser::BrowserSession;
use crate::pages::{DashboardPage, FilterResolution};
use crate::utils::timer::Stopwatch;

pub struct WidgetSteps<'a> {
    page: DashboardPage<'a>,
}

impl<'a> WidgetSteps<'a> {
    pub fn new(session: &'a BrowserSession, project: &str) -> Self {
        Self {
            page: DashboardPage::new(session, project),
        }
    }

    /// Open the dashboards list
    pub async fn open_dashboards_list(&mut self) -> Result<&mut Self> {
        info!("Step: open dashboards list");
        self.page.open_dashboards_list().await?;
        Ok(self)
    }

    /// Open the first dashboard in the list
    pub async fn open_first_dashboard(&mut self) -> Result<&mut Self> {
        info!("Step: open first dashboard");
        self.page.open_first_dashboard().await?;
        Ok(self)
    }

    /// Start the add-widget wizard
    pub async fn click_add_new_widget(&mut self) -> Result<&mut Self> {
        info!("Step: click 'Add new widget'");
        self.page.click_add_new_widget().await?;
        Ok(self)
    }

    /// Pick the first available widget type
    pub async fn select_first_widget_type(&mut self) -> Result<&mut Self> {
        info!("Step: select first widget type");
        self.page.select_first_widget_type().await?;
        Ok(self)
    }

    /// Advance the wizard
    pub async fn click_next_step(&mut self) -> Result<&mut Self> {
        info!("Step: click 'Next step'");
        self.page.click_next_step().await?;
        Ok(self)
    }

    /// Resolve the filter stage: existing filter if one appears within the
    /// short window, otherwise create a new one.
    pub async fn resolve_filter(&mut self) -> Result<&mut Self> {
        info!("Step: resolve widget filter");
        match self.page.resolve_filter().await? {
            FilterResolution::SelectedExisting => info!("  selected an existing filter"),
            FilterResolution::CreatedNew => info!("  no filter present, created a new one"),
        }
        Ok(self)
    }

    /// Confirm the widget
    pub async fn click_add_button(&mut self) -> Result<&mut Self> {
        info!("Step: click 'Add'");
        self.page.click_add_button().await?;
        Ok(self)
    }

    /// Whether the success notification appeared. Terminal step.
    pub async fn widget_added(&mut self) -> Result<bool> {
        info!("Step: check success notification");
        self.page.widget_added().await
    }

    /// Full widget creation flow: list → first dashboard → add widget →
    /// pick type → next → next → resolve filter → next → add → observe
    /// the success notification.
    pub async fn create_widget_with_filter(&mut self) -> Result<bool> {
        info!("Step: create widget with filter");
        let mut watch = Stopwatch::new();

        self.open_dashboards_list()
            .await?
            .open_first_dashboard()
            .await?;
        watch.lap("open dashboard");

        self.click_add_new_widget()
            .await?
            .select_first_widget_type()
            .await?
            .click_next_step()
            .await?
            .click_next_step()
            .await?;
        watch.lap("wizard to filter stage");

        self.resolve_filter().await?.click_next_step().await?;
        watch.lap("filter resolved");

        self.click_add_button().await?;
        let added = self.widget_added().await?;
        watch.lap("confirm and observe");

        debug!("Widget flow timing:\n{}", watch.format());
        Ok(added)
    }
}
