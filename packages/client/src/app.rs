use anyhow::Result;
use std::sync::Arc;

use shared::config::ClientConfig;
use shared::repositories::music_api_repository::{HttpMusicApiRepository, MusicApiRepository};
use shared::repositories::session_repository::FileSessionRepository;
use shared::screens::{Dashboard, LoginScreen, RegisterScreen};
use shared::services::auth_service::AuthService;
use shared::services::music_service::MusicService;
use shared::services::profile_service::ProfileService;
use shared::services::session_service::SessionService;
use shared::utils::clock::SystemClock;

/// Wired services for one process.
pub struct App {
    pub config: ClientConfig,
    pub sessions: Arc<SessionService>,
    auth: Arc<AuthService>,
    music: Arc<MusicService>,
    api: Arc<dyn MusicApiRepository>,
}

impl App {
    pub fn build(config: ClientConfig) -> Result<Self> {
        let api: Arc<dyn MusicApiRepository> = Arc::new(HttpMusicApiRepository::from_config(&config)?);
        let session_repository = Arc::new(FileSessionRepository::new(config.session_file.clone()));
        let sessions = Arc::new(SessionService::new(session_repository, Arc::new(SystemClock)));

        let auth = Arc::new(AuthService::new(
            api.clone(),
            sessions.clone(),
            config.session_ttl_seconds(),
            config.redirect_delay,
        ));
        let music = Arc::new(MusicService::new(api.clone()));

        Ok(App {
            config,
            sessions,
            auth,
            music,
            api,
        })
    }

    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(self.auth.clone())
    }

    pub fn register_screen(&self) -> RegisterScreen {
        RegisterScreen::new(self.auth.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            self.sessions.clone(),
            ProfileService::new(self.api.clone()),
            self.music.clone(),
        )
    }
}
