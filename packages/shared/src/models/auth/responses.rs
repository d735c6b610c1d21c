use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    /// The gateway also sends `session_expiration`. It is not read: the
    /// client keeps its own one-hour clock, whatever type the server uses.
    pub session_token: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub success: bool,
    pub user_name: Option<String>,
    pub message: Option<String>,
}
