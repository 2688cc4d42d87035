//! Page abstractions
//!
//! One object per logical UI page. Each operation waits for its
//! precondition element within the bounded timeout and performs exactly one
//! interaction.

mod dashboard;
mod login;

pub use dashboard::{DashboardPage, FilterResolution};
pub use login::LoginPage;
