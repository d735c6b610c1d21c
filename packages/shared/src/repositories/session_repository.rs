use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::models::session::Session;
use crate::repositories::errors::session_repository_errors::SessionRepositoryError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &Session) -> Result<(), SessionRepositoryError>;
    async fn load(&self) -> Result<Option<Session>, SessionRepositoryError>;
    async fn clear(&self) -> Result<(), SessionRepositoryError>;
}

/// The two storage entries, kept as strings the way browser local storage keeps them.
#[derive(Debug, Default, Deserialize, Serialize)]
struct StoredEntries {
    #[serde(skip_serializing_if = "Option::is_none")]
    session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_expiration: Option<String>,
}

impl StoredEntries {
    fn from_session(session: &Session) -> Self {
        StoredEntries {
            session_token: Some(session.token.clone()),
            session_expiration: Some(session.expires_at.to_string()),
        }
    }

    fn into_session(self) -> Option<Session> {
        let token = self.session_token?;
        let expires_at = self.session_expiration?.trim().parse().ok()?;
        Some(Session { token, expires_at })
    }

    fn is_blank(&self) -> bool {
        self.session_token.is_none() && self.session_expiration.is_none()
    }
}

/// Session entries persisted as a small JSON file.
pub struct FileSessionRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_entries(&self) -> Result<StoredEntries, SessionRepositoryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(StoredEntries::default()),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| SessionRepositoryError::Serialization(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoredEntries::default()),
            Err(e) => Err(SessionRepositoryError::Io(e.to_string())),
        }
    }

    async fn remove_file(&self) -> Result<(), SessionRepositoryError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionRepositoryError::Io(e.to_string())),
        }
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), SessionRepositoryError> {
        let _guard = self.lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SessionRepositoryError::Io(e.to_string()))?;
            }
        }
        let contents = serde_json::to_string_pretty(&StoredEntries::from_session(session))
            .map_err(|e| SessionRepositoryError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| SessionRepositoryError::Io(e.to_string()))?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>, SessionRepositoryError> {
        let _guard = self.lock.lock().await;
        let entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(SessionRepositoryError::Serialization(e)) => {
                warn!(
                    "Unreadable session file {} ({}), discarding",
                    self.path.display(),
                    e
                );
                self.remove_file().await?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if entries.is_blank() {
            return Ok(None);
        }
        match entries.into_session() {
            Some(session) => Ok(Some(session)),
            None => {
                // A half-written pair is not a session.
                warn!(
                    "Incomplete session entries in {}, discarding",
                    self.path.display()
                );
                self.remove_file().await?;
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<(), SessionRepositoryError> {
        let _guard = self.lock.lock().await;
        self.remove_file().await?;
        debug!("Session cleared from {}", self.path.display());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), SessionRepositoryError> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>, SessionRepositoryError> {
        Ok(self.session.read().await.clone())
    }

    async fn clear(&self) -> Result<(), SessionRepositoryError> {
        *self.session.write().await = None;
        Ok(())
    }
}
