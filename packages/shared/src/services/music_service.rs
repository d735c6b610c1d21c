use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::models::music::{
    QueryFilters, RemoveSubscriptionRequest, SubscribeRequest, Subscription, Track,
};
use crate::models::session::SessionContext;
use crate::repositories::music_api_repository::MusicApiRepository;
use crate::services::errors::music_service_errors::MusicServiceError;
use crate::utils::html::encode_html;

pub struct MusicService {
    api: Arc<dyn MusicApiRepository>,
}

impl MusicService {
    pub fn new(api: Arc<dyn MusicApiRepository>) -> Self {
        MusicService { api }
    }

    pub async fn query(
        &self,
        ctx: &SessionContext,
        filters: &QueryFilters,
    ) -> Result<Vec<Track>, MusicServiceError> {
        if filters.is_empty() {
            return Err(MusicServiceError::EmptyFilters);
        }

        let response = self.api.query(ctx, filters).await.map_err(|e| {
            error!("Error during query: {}", e);
            MusicServiceError::QueryFailed
        })?;

        if !response.is_success() {
            error!("Query returned status {}", response.status);
            return Err(MusicServiceError::QueryFailed);
        }

        match response.body.results {
            Some(results) if response.body.success && !results.is_empty() => {
                debug!("Query returned {} results", results.len());
                Ok(results)
            }
            _ => Err(MusicServiceError::NoResults),
        }
    }

    /// Current subscriptions. A response without the list field counts as none.
    pub async fn list_subscriptions(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<Subscription>, MusicServiceError> {
        let response = self.api.list_subscriptions(ctx).await.map_err(|e| {
            error!("Error fetching subscriptions: {}", e);
            MusicServiceError::FetchSubscriptionsFailed
        })?;

        if !response.is_success() {
            error!("Subscription list returned status {}", response.status);
            return Err(MusicServiceError::FetchSubscriptionsFailed);
        }

        response
            .body
            .subscriptions
            .ok_or(MusicServiceError::NoSubscriptions)
    }

    /// Subscribes after checking the current list for the same title and year.
    ///
    /// The check and the write are separate calls, so two concurrent attempts
    /// can both pass the check.
    pub async fn subscribe(
        &self,
        ctx: &SessionContext,
        track: &Track,
    ) -> Result<String, MusicServiceError> {
        let current = match self.list_subscriptions(ctx).await {
            Ok(subscriptions) => subscriptions,
            Err(MusicServiceError::NoSubscriptions) => Vec::new(),
            Err(_) => return Err(MusicServiceError::SubscribeFailed),
        };

        if current.iter().any(|sub| sub.track.same_release(track)) {
            warn!("Already Subscribed {} ({})", track.title, track.year);
            return Err(MusicServiceError::AlreadySubscribed {
                title: track.title.clone(),
                year: track.year.clone(),
            });
        }

        let request = SubscribeRequest {
            title: encode_html(&track.title),
            year: track.year.clone(),
        };

        let response = self.api.subscribe(ctx, &request).await.map_err(|e| {
            error!("Error subscribing to music: {}", e);
            MusicServiceError::SubscribeFailed
        })?;

        if !response.is_success() {
            error!(
                "Failed to subscribe, status {}: {:?}",
                response.status, response.body.error
            );
            return Err(MusicServiceError::SubscribeFailed);
        }

        info!(
            "Subscribed to {} ({}) as {:?}",
            track.title, track.year, response.body.uuid
        );
        Ok(format!(
            "Successfully subscribed to {} ({})",
            track.title, track.year
        ))
    }

    pub async fn remove_subscription(
        &self,
        ctx: &SessionContext,
        uuid: &str,
    ) -> Result<(), MusicServiceError> {
        let request = RemoveSubscriptionRequest {
            uuid: uuid.to_string(),
        };

        let response = self
            .api
            .remove_subscription(ctx, &request)
            .await
            .map_err(|e| {
                error!("Error removing subscription: {}", e);
                MusicServiceError::RemoveFailed
            })?;

        if !response.is_success() {
            error!("Removing {} returned status {}", uuid, response.status);
            return Err(MusicServiceError::RemoveFailed);
        }

        info!("Subscription {} removed successfully.", uuid);
        Ok(())
    }
}
