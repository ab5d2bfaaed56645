//! JSON persistence of [`Settings`] to `settings.json`.
//!
//! # Failure policy
//!
//! The desktop UI must keep working even when the settings file is broken,
//! so the two main operations never return an error:
//!
//! - [`SettingsStore::load`] logs a warning and returns empty settings when
//!   the directory cannot be created, the file is missing or unreadable, or
//!   the JSON is malformed.  A first run and a corrupt file look the same.
//! - [`SettingsStore::save`] logs an error and returns.
//!
//! [`SettingsStore::try_load`] and [`SettingsStore::try_save`] perform the
//! same work but hand the [`SettingsError`] back to the caller.
//!
//! # Atomic save
//!
//! A save writes the whole document to its own `settings.json.<uuid>.tmp`,
//! flushes it to disk and renames it over `settings.json`.  A crash or a
//! full disk in the middle of a save leaves the previous file in place
//! instead of a truncated one, and two stores saving into the same
//! directory never share a scratch file.
//!
//! # Locking
//!
//! Every load and save on one store instance runs under the store's own
//! mutex, so two threads can never interleave reads and writes of the
//! file.  Separate instances do not share a lock.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, warn};

use super::error::SettingsError;
use super::location::SettingsLocation;
use crate::domain::settings::Settings;

/// Loads and saves the settings file at one [`SettingsLocation`].
#[derive(Debug)]
pub struct SettingsStore {
    location: SettingsLocation,
    /// Serializes all file access through this instance.  Guards no data.
    lock: Mutex<()>,
}

impl SettingsStore {
    pub fn new(location: SettingsLocation) -> Self {
        Self {
            location,
            lock: Mutex::new(()),
        }
    }

    pub fn location(&self) -> &SettingsLocation {
        &self.location
    }

    /// Loads the settings, falling back to empty settings on any failure.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to load settings, creating new one: {e}");
                Settings::empty()
            }
        }
    }

    /// Saves `settings`, logging instead of returning any failure.
    pub fn save(&self, settings: &Settings) {
        if let Err(e) = self.try_save(settings) {
            error!("failed to save settings: {e}");
        }
    }

    /// Loads the settings file.
    ///
    /// Creates the settings directory if it does not exist.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::CreateDir`] if the directory cannot be created.
    /// - [`SettingsError::Read`] if the file is missing or unreadable; use
    ///   [`SettingsError::is_not_found`] to detect a first run.
    /// - [`SettingsError::Parse`] if the contents are not a settings document.
    pub fn try_load(&self) -> Result<Settings, SettingsError> {
        let _guard = self.acquire();
        self.ensure_dir()?;

        let path = self.location.settings_file();
        let bytes = fs::read(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_slice(&bytes).map_err(|source| SettingsError::Parse {
                path: path.clone(),
                source,
            })?;

        debug!(
            "loaded {} vault(s) from {}",
            settings.directories().len(),
            path.display()
        );
        Ok(settings)
    }

    /// Writes `settings` to the settings file, replacing it atomically.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::CreateDir`] if the directory cannot be created.
    /// - [`SettingsError::Serialize`] if `settings` cannot be encoded.
    /// - [`SettingsError::Write`] if the temporary file cannot be written.
    /// - [`SettingsError::Replace`] if it cannot be renamed into place.
    ///
    /// On error the previous settings file is left untouched.
    pub fn try_save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let _guard = self.acquire();
        self.ensure_dir()?;

        let json = serde_json::to_vec_pretty(settings).map_err(SettingsError::Serialize)?;

        let temp = self.location.temp_file();
        if let Err(source) = write_synced(&temp, &json) {
            discard(&temp);
            return Err(SettingsError::Write { path: temp, source });
        }

        let target = self.location.settings_file();
        if let Err(source) = fs::rename(&temp, &target) {
            discard(&temp);
            return Err(SettingsError::Replace {
                from: temp,
                to: target,
                source,
            });
        }

        debug!(
            "saved {} vault(s) to {}",
            settings.directories().len(),
            target.display()
        );
        Ok(())
    }

    /// `create_dir_all` succeeds when the directory already exists.
    fn ensure_dir(&self) -> Result<(), SettingsError> {
        let dir = self.location.dir();
        fs::create_dir_all(dir).map_err(|source| SettingsError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// The mutex guards `()`, so a panic in another holder leaves nothing
    /// inconsistent behind and the poison can be ignored.
    fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn discard(temp: &Path) {
    if let Err(e) = fs::remove_file(temp) {
        if e.kind() != std::io::ErrorKind::NotFound {
            debug!("could not remove {}: {e}", temp.display());
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
