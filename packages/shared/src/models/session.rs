/// A logged-in session. Its on-disk form lives in the session repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    /// Absolute expiry, epoch seconds.
    pub expires_at: i64,
}

impl Session {
    pub fn new(token: String, now: i64, ttl_seconds: i64) -> Self {
        Session {
            token,
            expires_at: now + ttl_seconds,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn context(&self) -> SessionContext {
        SessionContext {
            token: self.token.clone(),
        }
    }
}

/// Credential handed to every protected gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub token: String,
}

impl SessionContext {
    /// Token prefix that is safe to put in logs.
    pub fn masked_token(&self) -> String {
        mask_token(&self.token)
    }
}

pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{}…", prefix)
}
