use std::sync::Arc;
use tracing::{error, info};

use crate::models::session::SessionContext;
use crate::repositories::music_api_repository::MusicApiRepository;
use crate::services::errors::profile_service_errors::{
    ProfileServiceError, PROFILE_FALLBACK_MESSAGE,
};

pub struct ProfileService {
    api: Arc<dyn MusicApiRepository>,
}

impl ProfileService {
    pub fn new(api: Arc<dyn MusicApiRepository>) -> Self {
        ProfileService { api }
    }

    /// Returns the display name of the session's owner.
    pub async fn fetch_profile(&self, ctx: &SessionContext) -> Result<String, ProfileServiceError> {
        let response = self.api.profile(ctx).await.map_err(|e| {
            error!("Error fetching user data: {}", e);
            ProfileServiceError::FetchFailed
        })?;

        if !response.is_success() {
            error!("Profile fetch returned status {}", response.status);
            return Err(ProfileServiceError::FetchFailed);
        }

        let body = response.body;
        match (body.success, body.user_name) {
            (true, Some(user_name)) => {
                info!("User successfully authenticated: {}", user_name);
                Ok(user_name)
            }
            (success, _) => {
                error!(
                    "Authentication failed for token {} (success: {})",
                    ctx.masked_token(),
                    success
                );
                Err(ProfileServiceError::AuthenticationFailed(
                    body.message
                        .unwrap_or_else(|| PROFILE_FALLBACK_MESSAGE.to_string()),
                ))
            }
        }
    }
}
