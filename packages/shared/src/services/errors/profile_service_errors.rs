pub const PROFILE_FALLBACK_MESSAGE: &str = "Failed to authenticate user.";

#[derive(Debug)]
pub enum ProfileServiceError {
    AuthenticationFailed(String),
    FetchFailed,
}

impl std::fmt::Display for ProfileServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileServiceError::AuthenticationFailed(msg) => write!(f, "{}", msg),
            ProfileServiceError::FetchFailed => write!(f, "Failed to fetch user data."),
        }
    }
}

impl std::error::Error for ProfileServiceError {}
