#[derive(Debug)]
pub enum SessionRepositoryError {
    Io(String),
    Serialization(String),
}

impl std::fmt::Display for SessionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionRepositoryError::Io(msg) => write!(f, "Session storage error: {}", msg),
            SessionRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionRepositoryError {}
