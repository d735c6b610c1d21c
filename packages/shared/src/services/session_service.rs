use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::models::navigation::Screen;
use crate::models::session::{Session, SessionContext};
use crate::repositories::session_repository::SessionRepository;
use crate::services::errors::session_service_errors::SessionServiceError;
use crate::utils::clock::Clock;

/// Result of one expiry check cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    Absent,
    Active(Session),
    /// The session had run out and has been cleared.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Expired { redirect: Screen },
}

/// Handle to a running expiry watcher. Dropping `events` stops the task on its next tick.
pub struct ExpiryWatch {
    pub events: mpsc::Receiver<SessionEvent>,
    pub handle: JoinHandle<()>,
}

pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        SessionService { repository, clock }
    }

    pub async fn save(&self, token: &str, ttl_seconds: i64) -> Result<Session, SessionServiceError> {
        let session = Session::new(token.to_string(), self.clock.now(), ttl_seconds);
        self.repository.save(&session).await?;
        debug!("Session stored, expires at {}", session.expires_at);
        Ok(session)
    }

    pub async fn read(&self) -> Result<Option<Session>, SessionServiceError> {
        Ok(self.repository.load().await?)
    }

    pub async fn clear(&self) -> Result<(), SessionServiceError> {
        self.repository.clear().await?;
        Ok(())
    }

    pub fn is_expired(&self, session: &Session) -> bool {
        session.is_expired(self.clock.now())
    }

    /// One watcher cycle: clears an expired session and reports it.
    pub async fn check_expiration(&self) -> Result<SessionCheck, SessionServiceError> {
        match self.repository.load().await? {
            None => Ok(SessionCheck::Absent),
            Some(session) if self.is_expired(&session) => {
                info!("Session has expired. Logging out...");
                self.repository.clear().await?;
                Ok(SessionCheck::Expired)
            }
            Some(session) => Ok(SessionCheck::Active(session)),
        }
    }

    /// Point-of-use guard for protected calls.
    pub async fn require_active(&self) -> Result<SessionContext, SessionServiceError> {
        match self.check_expiration().await {
            Ok(SessionCheck::Active(session)) => Ok(session.context()),
            Ok(SessionCheck::Absent) => Err(SessionServiceError::Missing),
            Ok(SessionCheck::Expired) => Err(SessionServiceError::Expired),
            Err(SessionServiceError::Storage(cause)) => {
                error!("Failed to read stored session: {}", cause);
                Err(SessionServiceError::Storage(cause))
            }
            Err(e) => Err(e),
        }
    }

    /// Runs `check_expiration` every `period`, starting immediately.
    pub fn watch_expiry(self: Arc<Self>, period: Duration) -> ExpiryWatch {
        let (tx, rx) = mpsc::channel(4);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.is_closed() {
                    debug!("Expiry watcher stopped, no listener");
                    break;
                }
                match self.check_expiration().await {
                    Ok(SessionCheck::Expired) => {
                        let event = SessionEvent::Expired {
                            redirect: Screen::Login,
                        };
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => error!("Session expiry check failed: {}", e),
                }
            }
        });
        ExpiryWatch { events: rx, handle }
    }
}
