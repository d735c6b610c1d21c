use crate::services::errors::session_service_errors::SessionServiceError;

pub const LOGIN_FALLBACK_MESSAGE: &str = "Email or password is invalid.";
pub const REGISTER_FALLBACK_MESSAGE: &str = "An error occurred during registration.";

#[derive(Debug)]
pub enum AuthServiceError {
    /// The server said no; carries its message or the screen's fallback.
    Rejected(String),
    MissingToken,
    MalformedResponse,
    Unexpected,
    Session(SessionServiceError),
}

impl std::fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthServiceError::Rejected(msg) => write!(f, "{}", msg),
            AuthServiceError::MissingToken => {
                write!(f, "No session token was received from the server.")
            }
            AuthServiceError::MalformedResponse => write!(f, "Failed to parse server response"),
            AuthServiceError::Unexpected => write!(f, "An unexpected error occurred."),
            AuthServiceError::Session(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AuthServiceError {}

impl From<SessionServiceError> for AuthServiceError {
    fn from(err: SessionServiceError) -> Self {
        AuthServiceError::Session(err)
    }
}
