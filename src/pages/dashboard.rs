//! Dashboard page
//!
//! Covers the dashboard list, the add-widget wizard, and the filter
//! sub-flow. The filter stage is the one branch point in the whole UI
//! surface: a short presence probe decides between selecting an existing
//! filter and creating a new one, and the decision is never revisited.

use anyhow::Result;
use tracing::debug;

use crate::browser::BrowserSession;

const FIRST_DASHBOARD_NAME: &str = ".dashboardTable__name--t2a89";
const ADD_NEW_WIDGET_BUTTON: &str = "//button[.//span[text()='Add new widget']]";
const FIRST_RADIO_OPTION: &str = ".inputRadio__toggler--ygpdQ";
const NEXT_STEP_BUTTON: &str = "//span[text()='Next step']";
const ADD_FILTER_BUTTON: &str = "//span[text()='Add filter']";
const FILTER_NAME_INPUT: &str = "input[placeholder='Input filter name']";
const ENTER_NAME_INPUT: &str = "input[placeholder='Enter name']";
const SUBMIT_FILTER_BUTTON: &str = "button:has-text('Submit')";
const ADD_BUTTON: &str = "//button[contains(., 'Add')]";
const SUCCESS_POPUP: &str = "div._system-alert_14lm6_1._success_14lm6_14.notification-item";

/// Which branch the filter stage took
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterResolution {
    /// An existing filter was visible within the short window and was selected
    SelectedExisting,
    /// No filter appeared; a new one was created
    CreatedNew,
}

/// Page object for the dashboard list and widget wizard
pub struct DashboardPage<'a> {
    session: &'a BrowserSession,
    dashboards_link: String,
}

impl<'a> DashboardPage<'a> {
    /// The dashboards navigation link is project-scoped, so the page needs
    /// the project name to build its locator.
    pub fn new(session: &'a BrowserSession, project: &str) -> Self {
        Self {
            session,
            dashboards_link: format!("a[href='#{project}/dashboard']"),
        }
    }

    /// Open the list of dashboards
    pub async fn open_dashboards_list(&self) -> Result<()> {
        self.session.click(&self.dashboards_link).await
    }

    /// Open the first dashboard in the list
    pub async fn open_first_dashboard(&self) -> Result<()> {
        self.session.click(FIRST_DASHBOARD_NAME).await
    }

    /// Click the "Add new widget" button. The button can render before the
    /// dashboard body settles, so wait for it explicitly first.
    pub async fn click_add_new_widget(&self) -> Result<()> {
        self.session.wait_visible(ADD_NEW_WIDGET_BUTTON).await?;
        self.session.click(ADD_NEW_WIDGET_BUTTON).await
    }

    /// Select the first available widget type
    pub async fn select_first_widget_type(&self) -> Result<()> {
        self.session.click(FIRST_RADIO_OPTION).await
    }

    /// Advance to the next wizard step
    pub async fn click_next_step(&self) -> Result<()> {
        self.session.click(NEXT_STEP_BUTTON).await
    }

    /// Resolve the filter stage: select an existing filter when one shows
    /// up within the short probe window, otherwise create a new one.
    pub async fn resolve_filter(&self) -> Result<FilterResolution> {
        if self.session.probe(FIRST_RADIO_OPTION).await? {
            self.session.click(FIRST_RADIO_OPTION).await?;
            Ok(FilterResolution::SelectedExisting)
        } else {
            debug!("No existing filter within probe window, creating one");
            self.add_filter("New", "New").await?;
            Ok(FilterResolution::CreatedNew)
        }
    }

    /// Create a filter with the given name and entity value
    pub async fn add_filter(&self, filter_name: &str, name_value: &str) -> Result<()> {
        self.session.click(ADD_FILTER_BUTTON).await?;
        self.session.fill(FILTER_NAME_INPUT, filter_name).await?;
        self.session.fill(ENTER_NAME_INPUT, name_value).await?;
        self.session.click(SUBMIT_FILTER_BUTTON).await
    }

    /// Confirm the widget
    pub async fn click_add_button(&self) -> Result<()> {
        self.session.click(ADD_BUTTON).await
    }

    /// Whether the transient success notification appeared within the
    /// bounded wait
    pub async fn widget_added(&self) -> Result<bool> {
        self.session
            .probe_within(SUCCESS_POPUP, self.session.wait_timeout())
            .await
    }
}
