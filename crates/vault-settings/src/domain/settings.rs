//! The settings document persisted to `settings.json`.
//!
//! ```json
//! {
//!   "directories": [
//!     { "path": "/home/alice/Vaults/work", "mountName": "Work" },
//!     { "path": "/home/alice/Vaults/private" }
//!   ]
//! }
//! ```
//!
//! # Field order
//!
//! `serde` serializes struct fields in declaration order, so the order of
//! the fields in [`Settings`] *is* the order of the keys in the file.
//! `directories` must stay first; new fields go after it so that diffs of
//! the settings file stay stable between releases.
//!
//! # Objects only
//!
//! A derived `Deserialize` also accepts a struct written as a JSON array
//! (`[[{"path": "/v"}]]`).  Both types here decode through `deserialize_map`
//! instead, so anything other than a JSON object is a parse error and the
//! store falls back to defaults.

use std::fmt;
use std::path::PathBuf;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level settings document.
///
/// There is no public constructor: an instance comes either from
/// [`SettingsStore::load`](crate::SettingsStore::load) or from decoding a
/// JSON document.  The caller then owns it and mutates it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Registered vaults in the order the user added them.
    ///
    /// A missing key or an explicit `null` both decode to an empty list.
    directories: Vec<VaultEntry>,
}

impl Settings {
    /// The settings a first run starts with: no vaults.
    pub(crate) fn empty() -> Self {
        Self {
            directories: Vec::new(),
        }
    }

    /// Registered vaults, in insertion order.
    pub fn directories(&self) -> &[VaultEntry] {
        &self.directories
    }

    /// Mutable access for adding, removing or reordering vaults.
    ///
    /// Changes are in memory only until the owner calls
    /// [`SettingsStore::save`](crate::SettingsStore::save).
    pub fn directories_mut(&mut self) -> &mut Vec<VaultEntry> {
        &mut self.directories
    }

    /// Replaces the whole vault list.
    pub fn set_directories(&mut self, directories: Vec<VaultEntry>) {
        self.directories = directories;
    }
}

/// A single registered vault.
///
/// The store treats this as an opaque record; the only requirement is that
/// it survives a JSON round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    /// Location of the vault directory on disk.
    pub path: PathBuf,
    /// Optional display name used when the vault is mounted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_name: Option<String>,
}

impl VaultEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mount_name: None,
        }
    }

    pub fn with_mount_name(mut self, name: impl Into<String>) -> Self {
        self.mount_name = Some(name.into());
        self
    }
}

// ── Map-only deserialization ──────────────────────────────────────────────────

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SettingsVisitor)
    }
}

struct SettingsVisitor;

impl<'de> Visitor<'de> for SettingsVisitor {
    type Value = Settings;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a settings object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Settings, A::Error> {
        let mut directories: Option<Vec<VaultEntry>> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "directories" => {
                    if directories.is_some() {
                        return Err(de::Error::duplicate_field("directories"));
                    }
                    let value: Option<Vec<VaultEntry>> = map.next_value()?;
                    directories = Some(value.unwrap_or_default());
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(Settings {
            directories: directories.unwrap_or_default(),
        })
    }
}

impl<'de> Deserialize<'de> for VaultEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VaultEntryVisitor)
    }
}

struct VaultEntryVisitor;

impl<'de> Visitor<'de> for VaultEntryVisitor {
    type Value = VaultEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a vault object with a path")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<VaultEntry, A::Error> {
        let mut path: Option<PathBuf> = None;
        let mut mount_name: Option<Option<String>> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "path" => {
                    if path.is_some() {
                        return Err(de::Error::duplicate_field("path"));
                    }
                    path = Some(map.next_value()?);
                }
                "mountName" => {
                    if mount_name.is_some() {
                        return Err(de::Error::duplicate_field("mountName"));
                    }
                    mount_name = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(VaultEntry {
            path: path.ok_or_else(|| de::Error::missing_field("path"))?,
            mount_name: mount_name.flatten(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
