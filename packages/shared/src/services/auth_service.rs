use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::models::auth::requests::{LoginRequest, RegisterRequest};
use crate::models::navigation::Screen;
use crate::models::session::Session;
use crate::repositories::errors::gateway_errors::GatewayError;
use crate::repositories::music_api_repository::MusicApiRepository;
use crate::services::errors::auth_service_errors::{
    AuthServiceError, LOGIN_FALLBACK_MESSAGE, REGISTER_FALLBACK_MESSAGE,
};
use crate::services::session_service::SessionService;

pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful! Redirecting to login...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub session: Session,
    pub next: Screen,
    pub redirect_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub message: String,
    pub next: Screen,
}

pub struct AuthService {
    api: Arc<dyn MusicApiRepository>,
    sessions: Arc<SessionService>,
    session_ttl_seconds: i64,
    redirect_delay: Duration,
}

impl AuthService {
    pub fn new(
        api: Arc<dyn MusicApiRepository>,
        sessions: Arc<SessionService>,
        session_ttl_seconds: i64,
        redirect_delay: Duration,
    ) -> Self {
        AuthService {
            api,
            sessions,
            session_ttl_seconds,
            redirect_delay,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthServiceError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self.api.login(&request).await.map_err(|e| {
            error!("Login request for {} failed: {}", email, e);
            AuthServiceError::Unexpected
        })?;

        let body = response.body;
        if !body.success {
            warn!("Login rejected for {} (status {})", email, response.status);
            return Err(AuthServiceError::Rejected(
                body.message
                    .unwrap_or_else(|| LOGIN_FALLBACK_MESSAGE.to_string()),
            ));
        }

        let token = match body.session_token {
            Some(token) if !token.is_empty() => token,
            _ => {
                error!("No session token received from server for {}", email);
                return Err(AuthServiceError::MissingToken);
            }
        };

        let session = self.sessions.save(&token, self.session_ttl_seconds).await?;
        info!("User {} logged in, session expires at {}", email, session.expires_at);

        Ok(LoginOutcome {
            session,
            next: Screen::Dashboard,
            redirect_delay: self.redirect_delay,
        })
    }

    pub async fn register(
        &self,
        email: &str,
        user_name: &str,
        password: &str,
    ) -> Result<RegisterOutcome, AuthServiceError> {
        let request = RegisterRequest {
            email: email.to_string(),
            user_name: user_name.to_string(),
            password: password.to_string(),
        };

        let response = match self.api.register(&request).await {
            Ok(response) => response,
            Err(GatewayError::Decode(e)) => {
                error!("Failed to parse registration response: {}", e);
                return Err(AuthServiceError::MalformedResponse);
            }
            Err(e) => {
                error!("Registration request for {} failed: {}", email, e);
                return Err(AuthServiceError::Unexpected);
            }
        };

        if response.is_created() || response.body.success {
            info!("Registered {} as {}", email, user_name);
            return Ok(RegisterOutcome {
                message: REGISTER_SUCCESS_MESSAGE.to_string(),
                next: Screen::Login,
            });
        }

        debug!("Registration refused with status {}", response.status);
        Err(AuthServiceError::Rejected(
            response
                .body
                .message
                .unwrap_or_else(|| REGISTER_FALLBACK_MESSAGE.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ApiResponse;
    use crate::models::auth::responses::{LoginResponse, RegisterResponse};
    use crate::repositories::music_api_repository::MockMusicApiRepository;
    use crate::repositories::session_repository::{InMemorySessionRepository, SessionRepository};
    use crate::utils::clock::ManualClock;

    const NOW: i64 = 1_700_000_000;

    fn auth_service(mock_api: MockMusicApiRepository) -> (AuthService, Arc<InMemorySessionRepository>) {
        let repo = Arc::new(InMemorySessionRepository::new());
        let sessions = Arc::new(SessionService::new(
            repo.clone(),
            Arc::new(ManualClock::new(NOW)),
        ));
        let service = AuthService::new(
            Arc::new(mock_api),
            sessions,
            3600,
            Duration::from_millis(200),
        );
        (service, repo)
    }

    fn login_body(success: bool, token: Option<&str>, message: Option<&str>) -> LoginResponse {
        LoginResponse {
            success,
            session_token: token.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_login_success_stores_one_hour_session() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_login()
            .withf(|req| req.email == "user@example.com" && req.password == "pw")
            .times(1)
            .returning(|_| Ok(ApiResponse::new(200, login_body(true, Some("tok-1"), None))));
        let (service, repo) = auth_service(mock_api);

        let outcome = service.login("user@example.com", "pw").await.unwrap();

        assert_eq!(outcome.next, Screen::Dashboard);
        assert_eq!(outcome.redirect_delay, Duration::from_millis(200));
        assert_eq!(outcome.session.expires_at, NOW + 3600);
        let stored = repo.load().await.unwrap().unwrap();
        assert_eq!(stored.token, "tok-1");
        assert_eq!(stored.expires_at, NOW + 3600);
    }

    #[tokio::test]
    async fn test_login_rejected_shows_server_message_verbatim() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api.expect_login().returning(|_| {
            Ok(ApiResponse::new(
                401,
                login_body(false, None, Some("Email or password is invalid")),
            ))
        });
        let (service, repo) = auth_service(mock_api);

        let err = service.login("user@example.com", "bad").await.unwrap_err();

        assert_eq!(err.to_string(), "Email or password is invalid");
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_rejected_without_message_uses_fallback() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_login()
            .returning(|_| Ok(ApiResponse::new(401, login_body(false, None, None))));
        let (service, repo) = auth_service(mock_api);

        let err = service.login("user@example.com", "bad").await.unwrap_err();

        assert_eq!(err.to_string(), LOGIN_FALLBACK_MESSAGE);
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_success_without_token_stores_nothing() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_login()
            .returning(|_| Ok(ApiResponse::new(200, login_body(true, None, None))));
        let (service, repo) = auth_service(mock_api);

        let err = service.login("user@example.com", "pw").await.unwrap_err();

        assert!(matches!(err, AuthServiceError::MissingToken));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_transport_error_is_generic() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_login()
            .returning(|_| Err(GatewayError::Transport("connection refused".to_string())));
        let (service, _repo) = auth_service(mock_api);

        let err = service.login("user@example.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "An unexpected error occurred.");
    }

    #[tokio::test]
    async fn test_register_created_status_is_success() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_register()
            .withf(|req| req.user_name == "Listener")
            .returning(|_| Ok(ApiResponse::new(201, RegisterResponse::default())));
        let (service, _repo) = auth_service(mock_api);

        let outcome = service
            .register("new@example.com", "Listener", "pw")
            .await
            .unwrap();
        assert_eq!(outcome.next, Screen::Login);
        assert_eq!(outcome.message, REGISTER_SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_success_flag_is_success() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api.expect_register().returning(|_| {
            Ok(ApiResponse::new(
                200,
                RegisterResponse {
                    success: true,
                    message: None,
                },
            ))
        });
        let (service, _repo) = auth_service(mock_api);

        assert!(service.register("a@example.com", "A", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_conflict_shows_server_message() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api.expect_register().returning(|_| {
            Ok(ApiResponse::new(
                409,
                RegisterResponse {
                    success: false,
                    message: Some("The email already exists".to_string()),
                },
            ))
        });
        let (service, _repo) = auth_service(mock_api);

        let err = service
            .register("taken@example.com", "Dup", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "The email already exists");
    }

    #[tokio::test]
    async fn test_register_failure_without_message_uses_fallback() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_register()
            .returning(|_| Ok(ApiResponse::new(400, RegisterResponse::default())));
        let (service, _repo) = auth_service(mock_api);

        let err = service.register("a@example.com", "A", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), REGISTER_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_unparseable_body() {
        let mut mock_api = MockMusicApiRepository::new();
        mock_api
            .expect_register()
            .returning(|_| Err(GatewayError::Decode("expected value".to_string())));
        let (service, _repo) = auth_service(mock_api);

        let err = service.register("a@example.com", "A", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse server response");
    }
}
