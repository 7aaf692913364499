//! Session manager
//!
//! Owns the single page client used by a sweep. The client is acquired and
//! released explicitly; nothing else in the crate holds one.

use crate::client::{ClientError, PageClient, PageClientFactory};
use thiserror::Error;

/// Errors raised by the session manager
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No page client session has been started")]
    NotStarted,

    #[error("Failed to launch page client: {0}")]
    Launch(#[source] ClientError),
}

/// Owns the lifetime of one page client instance
pub struct SessionManager {
    factory: Box<dyn PageClientFactory>,
    client: Option<Box<dyn PageClient>>,
    launches: u32,
}

impl SessionManager {
    pub fn new(factory: Box<dyn PageClientFactory>) -> Self {
        Self {
            factory,
            client: None,
            launches: 0,
        }
    }

    /// Acquires a fresh page client, releasing any client already held
    pub async fn start(&mut self) -> Result<(), SessionError> {
        self.stop().await;

        tracing::info!("Starting page client session");
        let client = self.factory.launch().await.map_err(SessionError::Launch)?;
        self.client = Some(client);
        self.launches += 1;
        Ok(())
    }

    /// Replaces the current client with a fresh one
    pub async fn restart(&mut self) -> Result<(), SessionError> {
        tracing::warn!("Restarting page client session");
        self.start().await
    }

    /// Releases the held client, if any; safe to call repeatedly
    pub async fn stop(&mut self) {
        if let Some(mut client) = self.client.take() {
            tracing::info!("Stopping page client session");
            if let Err(e) = client.close().await {
                tracing::warn!("Failed to close page client cleanly: {}", e);
            }
        }
    }

    /// Borrows the held client
    pub fn client(&mut self) -> Result<&mut (dyn PageClient + 'static), SessionError> {
        self.client.as_deref_mut().ok_or(SessionError::NotStarted)
    }

    pub fn is_active(&self) -> bool {
        self.client.is_some()
    }

    /// Number of clients launched over the manager's lifetime
    pub fn launches(&self) -> u32 {
        self.launches
    }
}
