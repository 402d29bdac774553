use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use shared_models::error::AppError;

use crate::storage::{StorageBackend, StorageError};

const AUTHENTICATED: &str = "true";

/// Storage keys owned by one actor's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
    pub data: &'static str,
    pub flag: &'static str,
    /// Auxiliary keys (tokens, usernames) written alongside the snapshot.
    pub extra: &'static [&'static str],
}

pub const DOCTOR_SESSION: SessionKeys = SessionKeys {
    data: "doctorData",
    flag: "isAuthenticated",
    extra: &[],
};

pub const HOSPITAL_SESSION: SessionKeys = SessionKeys {
    data: "hospitalData",
    flag: "isHospitalAuthenticated",
    extra: &["accessToken", "hospitalUsername"],
};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to serialize session snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Not signed in")]
    NotAuthenticated,
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotAuthenticated => AppError::Auth("Please log in to continue".to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Authenticated snapshot of one actor, persisted through a [`StorageBackend`].
///
/// Lifecycle: `new` (signed out) → `hydrate` (restore from storage) →
/// `login` / `update` → `clear`. Concurrent writers are last-write-wins.
pub struct SessionStore<T> {
    storage: Arc<dyn StorageBackend>,
    keys: SessionKeys,
    current: Arc<RwLock<Option<T>>>,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            keys: self.keys,
            current: Arc::clone(&self.current),
        }
    }
}

impl<T> SessionStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(storage: Arc<dyn StorageBackend>, keys: SessionKeys) -> Self {
        Self {
            storage,
            keys,
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn keys(&self) -> SessionKeys {
        self.keys
    }

    /// Restores the snapshot from storage. Returns whether a session was found.
    pub async fn hydrate(&self) -> Result<bool, SessionError> {
        let data = self.storage.get(self.keys.data).await?;
        let flag = self.storage.get(self.keys.flag).await?;

        let restored = match (data, flag.as_deref()) {
            (Some(raw), Some(AUTHENTICATED)) => match serde_json::from_str::<T>(&raw) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("Discarding unreadable {} snapshot: {}", self.keys.data, err);
                    self.storage.remove(self.keys.data).await?;
                    self.storage.remove(self.keys.flag).await?;
                    None
                }
            },
            _ => None,
        };

        let found = restored.is_some();
        *self.current.write().await = restored;
        debug!("Hydrated {} session: authenticated={}", self.keys.data, found);
        Ok(found)
    }

    pub async fn login(&self, record: T) -> Result<(), SessionError> {
        let raw = serde_json::to_string(&record)?;
        self.storage.set(self.keys.data, &raw).await?;
        self.storage.set(self.keys.flag, AUTHENTICATED).await?;
        *self.current.write().await = Some(record);
        info!("Session started for {}", self.keys.data);
        Ok(())
    }

    /// Replaces the snapshot of an already signed-in actor.
    pub async fn update(&self, record: T) -> Result<(), SessionError> {
        if !self.is_authenticated().await {
            return Err(SessionError::NotAuthenticated);
        }
        let raw = serde_json::to_string(&record)?;
        self.storage.set(self.keys.data, &raw).await?;
        *self.current.write().await = Some(record);
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), SessionError> {
        *self.current.write().await = None;
        self.storage.remove(self.keys.data).await?;
        self.storage.remove(self.keys.flag).await?;
        for key in self.keys.extra {
            self.storage.remove(key).await?;
        }
        info!("Session cleared for {}", self.keys.data);
        Ok(())
    }

    pub async fn current(&self) -> Option<T> {
        self.current.read().await.clone()
    }

    /// Like [`current`](Self::current) but fails when signed out.
    pub async fn require(&self) -> Result<T, SessionError> {
        self.current().await.ok_or(SessionError::NotAuthenticated)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn get_extra(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.storage.get(key).await?)
    }

    /// Writes `value` under `key`, or removes the key when there is none.
    pub async fn replace_extra(&self, key: &str, value: Option<&str>) -> Result<(), SessionError> {
        match value {
            Some(value) => self.storage.set(key, value).await?,
            None => self.storage.remove(key).await?,
        }
        Ok(())
    }
}
