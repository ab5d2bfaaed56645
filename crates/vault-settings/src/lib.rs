//! # vault-settings
//!
//! Persists the list of vaults a user has registered with the desktop
//! application, as JSON, in a platform-appropriate settings directory.
//!
//! # Architecture overview (for beginners)
//!
//! The crate is split the same way as the rest of the workspace:
//!
//! - **`domain`** – The settings document itself ([`Settings`] and
//!   [`VaultEntry`]).  Plain data with serde derives and no file-system
//!   access.
//!
//! - **`infrastructure`** – Everything that touches the OS: resolving the
//!   settings directory from environment variables ([`SettingsLocation`]),
//!   reading and writing `settings.json` ([`SettingsStore`]), and running
//!   that I/O off an async executor ([`AsyncSettingsStore`]).
//!
//! # Typical use
//!
//! ```no_run
//! use std::path::PathBuf;
//! use vault_settings::{SettingsLocation, SettingsStore, VaultEntry};
//!
//! let location = SettingsLocation::from_env().expect("home directory");
//! let store = SettingsStore::new(location);
//!
//! let mut settings = store.load();
//! settings
//!     .directories_mut()
//!     .push(VaultEntry::new(PathBuf::from("/home/alice/Vaults/work")));
//! store.save(&settings);
//! ```

pub mod domain;
pub mod infrastructure;

// Re-export the most-used types at the crate root so callers can write
// `vault_settings::SettingsStore` instead of the full module path.
pub use domain::settings::{Settings, VaultEntry};
pub use infrastructure::storage::{
    async_store::AsyncSettingsStore,
    error::SettingsError,
    location::{OsFamily, PlatformEnv, SettingsLocation, APP_DIR_NAME, SETTINGS_FILE_NAME},
    store::SettingsStore,
};
