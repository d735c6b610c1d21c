use std::sync::Arc;
use tracing::debug;

use crate::models::music::{QueryFilters, Track};
use crate::models::navigation::{Screen, Transition};
use crate::models::session::SessionContext;
use crate::services::errors::music_service_errors::MusicServiceError;
use crate::services::errors::session_service_errors::SessionServiceError;
use crate::services::music_service::MusicService;
use crate::services::session_service::SessionService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeAttempt {
    /// Written on the server; the dashboard should refresh.
    Subscribed,
    Rejected,
    SessionEnded,
}

pub struct QueryPanel {
    pub filters: QueryFilters,
    pub results: Vec<Track>,
    pub error: Option<String>,
    pub notice: Option<String>,
    music: Arc<MusicService>,
    sessions: Arc<SessionService>,
}

impl QueryPanel {
    pub fn new(music: Arc<MusicService>, sessions: Arc<SessionService>) -> Self {
        Self {
            filters: QueryFilters::default(),
            results: Vec::new(),
            error: None,
            notice: None,
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

    pub async fn submit(&mut self) -> Transition {
        self.notice = None;
        if self.filters.is_empty() {
            // Checked before the session so an empty form never costs a call.
            self.error = Some(MusicServiceError::EmptyFilters.to_string());
            return Transition::Stay;
        }
        self.error = None;

        let ctx = match self.session().await {
            Ok(ctx) => ctx,
            Err(transition) => return transition,
        };

        let result = self.music.query(&ctx, &self.filters).await;

        match result {
            Ok(results) => self.results = results,
            Err(MusicServiceError::NoResults) => {
                self.results.clear();
                self.error = Some(MusicServiceError::NoResults.to_string());
            }
            // A failed call says nothing about the last results.
            Err(e) => self.error = Some(e.to_string()),
        }
        Transition::Stay
    }

    /// Subscribes to the displayed result at `index`.
    pub async fn subscribe(&mut self, index: usize) -> SubscribeAttempt {
        self.notice = None;
        let track = match self.results.get(index) {
            Some(track) => track.clone(),
            None => {
                debug!("No displayed result at index {}", index);
                self.error = Some(format!("There is no result number {}.", index + 1));
                return SubscribeAttempt::Rejected;
            }
        };

        let ctx = match self.session().await {
            Ok(ctx) => ctx,
            Err(Transition::Redirect(_)) => return SubscribeAttempt::SessionEnded,
            Err(Transition::Stay) => return SubscribeAttempt::Rejected,
        };

        let result = self.music.subscribe(&ctx, &track).await;

        match result {
            Ok(confirmation) => {
                self.error = None;
                self.notice = Some(confirmation);
                SubscribeAttempt::Subscribed
            }
            Err(e) => {
                self.error = Some(e.to_string());
                SubscribeAttempt::Rejected
            }
        }
    }
}
