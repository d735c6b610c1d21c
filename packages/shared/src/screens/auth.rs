use std::sync::Arc;

use crate::services::auth_service::{AuthService, LoginOutcome, RegisterOutcome};

/// Login form. Failures end up in `error`; nothing escapes `submit`.
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    auth: Arc<AuthService>,
}

impl LoginScreen {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            error: None,
            auth,
        }
    }

    pub async fn submit(&mut self) -> Option<LoginOutcome> {
        self.error = None;
        let result = self.auth.login(&self.email, &self.password).await;

        match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

pub struct RegisterScreen {
    pub email: String,
    pub user_name: String,
    pub password: String,
    pub error: Option<String>,
    pub notice: Option<String>,
    auth: Arc<AuthService>,
}

impl RegisterScreen {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self {
            email: String::new(),
            user_name: String::new(),
            password: String::new(),
            error: None,
            notice: None,
            auth,
        }
    }

    pub async fn submit(&mut self) -> Option<RegisterOutcome> {
        self.error = None;
        self.notice = None;
        let result = self
            .auth
            .register(&self.email, &self.user_name, &self.password)
            .await;

        match result {
            Ok(outcome) => {
                self.notice = Some(outcome.message.clone());
                Some(outcome)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ApiResponse;
    use crate::models::auth::responses::{LoginResponse, RegisterResponse};
    use crate::models::navigation::Screen;
    use crate::repositories::music_api_repository::MockMusicApiRepository;
    use crate::repositories::session_repository::InMemorySessionRepository;
    use crate::services::session_service::SessionService;
    use crate::utils::clock::ManualClock;
    use std::time::Duration;

    fn auth(mock_api: MockMusicApiRepository) -> Arc<AuthService> {
        let sessions = Arc::new(SessionService::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(ManualClock::new(0)),
        ));
        Arc::new(AuthService::new(
            Arc::new(mock_api),
            sessions,
            3600,
            Duration::from_millis(200),
        ))
    }

    #[tokio::test]
    async fn test_login_screen_failure_sets_error() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_login()
            .returning(|_| Ok(ApiResponse::new(401, LoginResponse::default())));

        let mut screen = LoginScreen::new(auth(mock_api));
        screen.email = "user@example.com".to_string();
        screen.password = "bad".to_string();

        assert!(screen.submit().await.is_none());
        assert_eq!(screen.error.as_deref(), Some("Email or password is invalid."));
    }

    #[tokio::test]
    async fn test_login_screen_success_clears_previous_error() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api.expect_login().returning(|_| {
            Ok(ApiResponse::new(
                200,
                LoginResponse {
                    success: true,
                    session_token: Some("tok".to_string()),
                    message: None,
                },
            ))
        });

        let mut screen = LoginScreen::new(auth(mock_api));
        screen.error = Some("old error".to_string());

        let outcome = screen.submit().await.unwrap();
        assert_eq!(outcome.next, Screen::Dashboard);
        assert!(screen.error.is_none());
    }

    #[tokio::test]
    async fn test_register_screen_success_sets_notice() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_register()
            .returning(|_| Ok(ApiResponse::new(201, RegisterResponse::default())));

        let mut screen = RegisterScreen::new(auth(mock_api));
        let outcome = screen.submit().await.unwrap();

        assert_eq!(outcome.next, Screen::Login);
        assert_eq!(
            screen.notice.as_deref(),
            Some("Registration successful! Redirecting to login...")
        );
        assert!(screen.error.is_none());
    }
}
