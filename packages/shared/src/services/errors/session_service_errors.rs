use crate::repositories::errors::session_repository_errors::SessionRepositoryError;

#[derive(Debug)]
pub enum SessionServiceError {
    Missing,
    Expired,
    Storage(SessionRepositoryError),
}

impl std::fmt::Display for SessionServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionServiceError::Missing => {
                write!(f, "Session token is missing. Please log in again.")
            }
            SessionServiceError::Expired => {
                write!(f, "Your session has expired. Please log in again.")
            }
            // The cause is logged where it happens, never shown.
            SessionServiceError::Storage(_) => {
                write!(f, "Failed to read the stored session. Please log in again.")
            }
        }
    }
}

impl std::error::Error for SessionServiceError {}

impl From<SessionRepositoryError> for SessionServiceError {
    fn from(err: SessionRepositoryError) -> Self {
        SessionServiceError::Storage(err)
    }
}
