#[derive(Debug)]
pub enum GatewayError {
    Transport(String),
    Server { status: u16, message: String },
    Decode(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Transport(msg) => write!(f, "Transport error: {}", msg),
            GatewayError::Server { status, message } => {
                write!(f, "Gateway returned {}: {}", status, message)
            }
            GatewayError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        GatewayError::Transport(error.to_string())
    }
}
