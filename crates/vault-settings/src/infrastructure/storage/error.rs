//! Error type for settings storage operations.

use std::path::PathBuf;

use thiserror::Error;

/// Why a settings operation failed.
///
/// [`SettingsStore::load`](crate::SettingsStore::load) and
/// [`SettingsStore::save`](crate::SettingsStore::save) only log these.
/// The `try_` variants return them to callers that want to react.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Resolving the settings directory needed a home directory and none
    /// of the home variables were set.
    #[error("could not determine the user's home directory")]
    NoHomeDirectory,

    /// The settings directory could not be created.
    #[error("could not create settings directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be opened or read.
    #[error("could not read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not a valid settings document.
    #[error("failed to parse settings JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings could not be encoded as JSON.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The temporary file could not be created, written or flushed.
    #[error("could not write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not be moved over the settings file.
    #[error("could not replace {to} with {from}: {source}")]
    Replace {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking task running a load or save did not complete.
    #[error("settings task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SettingsError {
    /// `true` when the settings file simply does not exist yet (first run).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SettingsError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
