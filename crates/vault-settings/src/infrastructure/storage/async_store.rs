//! Async facade over [`SettingsStore`].
//!
//! # Why not just call the store from async code? (for beginners)
//!
//! `SettingsStore` does plain blocking file I/O and waits on a
//! `std::sync::Mutex`.  Calling it directly inside an async task would
//! block a Tokio worker thread and stall every other task scheduled on it.
//! `tokio::task::spawn_blocking` moves the work onto Tokio's dedicated
//! blocking-thread pool, and the async caller just awaits the result.
//!
//! The contracts are the same as the synchronous store: `load` always
//! yields settings and `save` never returns an error.

use std::sync::Arc;

use tracing::{error, warn};

use super::error::SettingsError;
use super::store::SettingsStore;
use crate::domain::settings::Settings;

/// Cloneable handle running [`SettingsStore`] operations on the blocking
/// pool.  Clones share one store, and therefore one lock.
#[derive(Debug, Clone)]
pub struct AsyncSettingsStore {
    inner: Arc<SettingsStore>,
}

impl AsyncSettingsStore {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// The underlying synchronous store.
    pub fn blocking(&self) -> &SettingsStore {
        &self.inner
    }

    /// Loads the settings, falling back to empty settings on any failure.
    pub async fn load(&self) -> Settings {
        match self.try_load().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to load settings, creating new one: {e}");
                Settings::empty()
            }
        }
    }

    /// Saves a snapshot of `settings`, logging instead of returning any
    /// failure.
    pub async fn save(&self, settings: &Settings) {
        if let Err(e) = self.try_save(settings).await {
            error!("failed to save settings: {e}");
        }
    }

    /// # Errors
    ///
    /// Everything [`SettingsStore::try_load`] returns, plus
    /// [`SettingsError::Task`] if the blocking task panicked or was
    /// cancelled.
    pub async fn try_load(&self) -> Result<Settings, SettingsError> {
        let store = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || store.try_load()).await?
    }

    /// # Errors
    ///
    /// Everything [`SettingsStore::try_save`] returns, plus
    /// [`SettingsError::Task`] if the blocking task panicked or was
    /// cancelled.
    pub async fn try_save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let store = Arc::clone(&self.inner);
        let snapshot = settings.clone();
        tokio::task::spawn_blocking(move || store.try_save(&snapshot)).await?
    }
}

impl From<SettingsStore> for AsyncSettingsStore {
    fn from(store: SettingsStore) -> Self {
        Self::new(store)
    }
}

impl From<Arc<SettingsStore>> for AsyncSettingsStore {
    fn from(inner: Arc<SettingsStore>) -> Self {
        Self { inner }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
