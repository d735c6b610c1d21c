use std::sync::Arc;
use tracing::debug;

use crate::models::music::Subscription;
use crate::models::navigation::{Screen, Transition};
use crate::models::session::SessionContext;
use crate::services::errors::music_service_errors::MusicServiceError;
use crate::services::errors::session_service_errors::SessionServiceError;
use crate::services::music_service::MusicService;
use crate::services::session_service::SessionService;

pub struct SubscriptionPanel {
    pub subscriptions: Vec<Subscription>,
    pub error: Option<String>,
    /// Owner and change flag seen by the last fetch.
    synced_with: Option<(String, bool)>,
    music: Arc<MusicService>,
    sessions: Arc<SessionService>,
}

impl SubscriptionPanel {
    pub fn new(music: Arc<MusicService>, sessions: Arc<SessionService>) -> Self {
        Self {
            subscriptions: Vec::new(),
            error: None,
            synced_with: None,
            music,
            sessions,
        }
    }

    async fn session(&mut self) -> Result<SessionContext, Transition> {
        match self.sessions.require_active().await {
            Ok(ctx) => Ok(ctx),
            Err(e) => {
                self.error = Some(e.to_string());
                match e {
                    SessionServiceError::Expired => Err(Transition::Redirect(Screen::Login)),
                    _ => Err(Transition::Stay),
                }
            }
        }
    }

    /// Refetches when the owning user or the change flag differs from the last fetch.
    pub async fn sync(&mut self, user_name: &str, subscription_updated: bool) -> Transition {
        let key = (user_name.to_string(), subscription_updated);
        if self.synced_with.as_ref() == Some(&key) {
            debug!("Subscription list already in sync for {}", user_name);
            return Transition::Stay;
        }
        self.synced_with = Some(key);
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Transition {
        let ctx = match self.session().await {
            Ok(ctx) => ctx,
            Err(transition) => return transition,
        };

        let result = self.music.list_subscriptions(&ctx).await;

        match result {
            Ok(subscriptions) => {
                self.error = None;
                self.subscriptions = subscriptions;
            }
            Err(MusicServiceError::NoSubscriptions) => {
                self.subscriptions.clear();
                self.error = Some(MusicServiceError::NoSubscriptions.to_string());
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        Transition::Stay
    }

    /// Deletes on the server, then drops the entry locally without a refetch.
    pub async fn remove(&mut self, uuid: &str) -> Transition {
        let ctx = match self.session().await {
            Ok(ctx) => ctx,
            Err(transition) => return transition,
        };

        let result = self.music.remove_subscription(&ctx, uuid).await;

        match result {
            Ok(()) => {
                self.error = None;
                self.subscriptions.retain(|sub| sub.uuid != uuid);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        Transition::Stay
    }
}
