pub mod auth;
pub mod dashboard;
pub mod query_panel;
pub mod subscription_panel;

pub use auth::{LoginScreen, RegisterScreen};
pub use dashboard::Dashboard;
pub use query_panel::{QueryPanel, SubscribeAttempt};
pub use subscription_panel::SubscriptionPanel;
