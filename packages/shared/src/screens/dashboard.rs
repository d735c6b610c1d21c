use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::navigation::{Screen, Transition};
use crate::services::errors::session_service_errors::SessionServiceError;
use crate::services::music_service::MusicService;
use crate::services::profile_service::ProfileService;
use crate::services::session_service::SessionService;

use super::query_panel::{QueryPanel, SubscribeAttempt};
use super::subscription_panel::SubscriptionPanel;

/// Authenticated landing screen. Owns both panels and the user's display name.
pub struct Dashboard {
    pub user_name: Option<String>,
    pub error: Option<String>,
    /// Flipped on every successful subscribe.
    pub subscription_updated: bool,
    pub query: QueryPanel,
    pub subscriptions: SubscriptionPanel,
    sessions: Arc<SessionService>,
    profiles: ProfileService,
}

impl Dashboard {
    pub fn new(
        sessions: Arc<SessionService>,
        profiles: ProfileService,
        music: Arc<MusicService>,
    ) -> Self {
        Self {
            user_name: None,
            error: None,
            subscription_updated: false,
            query: QueryPanel::new(music.clone(), sessions.clone()),
            subscriptions: SubscriptionPanel::new(music, sessions.clone()),
            sessions,
            profiles,
        }
    }

    async fn drop_session(&self) {
        if let Err(e) = self.sessions.clear().await {
            warn!("Failed to clear session: {}", e);
        }
    }

    /// Verifies the stored session against the profile endpoint and loads the panels.
    pub async fn enter(&mut self) -> Transition {
        let ctx = match self.sessions.require_active().await {
            Ok(ctx) => ctx,
            Err(SessionServiceError::Missing) => {
                info!("No session token found, redirecting to login");
                return Transition::Redirect(Screen::Login);
            }
            Err(e) => {
                if matches!(e, SessionServiceError::Storage(_)) {
                    self.drop_session().await;
                }
                self.error = Some(e.to_string());
                return Transition::Redirect(Screen::Login);
            }
        };

        match self.profiles.fetch_profile(&ctx).await {
            Ok(user_name) => {
                self.error = None;
                let changed = self.user_name.as_deref() != Some(user_name.as_str());
                self.user_name = Some(user_name);
                if changed {
                    info!("Dashboard ready for {}", ctx.masked_token());
                }
            }
            Err(e) => {
                error!("Dashboard authentication failed: {}", e);
                self.drop_session().await;
                self.user_name = None;
                self.error = Some(e.to_string());
                return Transition::Redirect(Screen::Login);
            }
        }

        self.sync_subscriptions().await
    }

    async fn sync_subscriptions(&mut self) -> Transition {
        match self.user_name.as_deref() {
            Some(user_name) => {
                self.subscriptions
                    .sync(user_name, self.subscription_updated)
                    .await
            }
            None => Transition::Stay,
        }
    }

    /// Reacts to a subscribe in the query panel.
    pub async fn on_subscription_update(&mut self) -> Transition {
        self.subscription_updated = !self.subscription_updated;
        self.enter().await
    }

    /// Subscribes to a displayed query result and refreshes the dashboard on success.
    pub async fn subscribe(&mut self, index: usize) -> Transition {
        match self.query.subscribe(index).await {
            SubscribeAttempt::Subscribed => self.on_subscription_update().await,
            SubscribeAttempt::Rejected => Transition::Stay,
            SubscribeAttempt::SessionEnded => Transition::Redirect(Screen::Login),
        }
    }

    pub async fn logout(&mut self) -> Screen {
        self.drop_session().await;
        self.user_name = None;
        info!("Logged out");
        Screen::Login
    }
}
