//! Resolution of the platform-appropriate settings directory.
//!
//! | Platform | Directory |
//! |----------|-----------|
//! | Windows, `%APPDATA%` set   | `%APPDATA%\Cryptomator` |
//! | Windows, `%APPDATA%` unset | `<home>\.Cryptomator` |
//! | macOS                      | `~/Library/Application Support/Cryptomator` |
//! | Linux and everything else  | `~/.Cryptomator` |
//!
//! The settings file is always [`SETTINGS_FILE_NAME`] inside that directory.
//!
//! # Why not read the environment inside the store? (for beginners)
//!
//! Resolution is split into two steps: [`PlatformEnv`] snapshots the
//! environment variables once, and [`SettingsLocation::resolve`] is a pure
//! function of that snapshot plus an [`OsFamily`].  Tests can therefore ask
//! "where would the file live on macOS?" from a Linux CI machine by passing
//! hand-built inputs, without touching the real process environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::error::SettingsError;

/// Name of the per-application directory.
pub const APP_DIR_NAME: &str = "Cryptomator";

/// Name of the settings file inside the settings directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Suffix of the scratch file a save writes before renaming it into place.
const TEMP_SUFFIX: &str = ".tmp";

/// Operating-system family, as far as settings placement is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    /// Linux, the BSDs, Solaris and anything else Unix-like.
    Other,
}

impl OsFamily {
    /// Family of the platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps a `std::env::consts::OS` style name to a family.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => OsFamily::Windows,
            "macos" => OsFamily::MacOs,
            _ => OsFamily::Other,
        }
    }
}

/// The environment inputs that settings resolution depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformEnv {
    /// `%APPDATA%`, if set and non-empty.
    pub app_data: Option<PathBuf>,
    /// The user's home directory, if one could be found.
    pub home: Option<PathBuf>,
}

impl PlatformEnv {
    /// Snapshots the real process environment.
    pub fn capture(os: OsFamily) -> Self {
        Self::from_vars(os, |key| std::env::var_os(key))
    }

    /// Builds a snapshot from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.  Windows prefers `USERPROFILE` for the
    /// home directory; other platforms prefer `HOME`.
    pub fn from_vars<F>(os: OsFamily, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        let home_keys: [&str; 2] = match os {
            OsFamily::Windows => ["USERPROFILE", "HOME"],
            OsFamily::MacOs | OsFamily::Other => ["HOME", "USERPROFILE"],
        };

        Self {
            app_data: non_empty("APPDATA"),
            home: home_keys.iter().find_map(|key| non_empty(*key)),
        }
    }
}

/// Where the settings file lives.
///
/// Build one at startup with [`SettingsLocation::from_env`] (or
/// [`SettingsLocation::at`] in tests) and hand it to the store.  The path
/// is never recomputed afterwards, even if the environment changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsLocation {
    dir: PathBuf,
}

impl SettingsLocation {
    /// Uses `dir` as the settings directory as-is.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves the settings directory for the current platform and
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoHomeDirectory`] when the platform needs a
    /// home directory and none of the home variables are set.
    pub fn from_env() -> Result<Self, SettingsError> {
        let os = OsFamily::current();
        Self::resolve(os, &PlatformEnv::capture(os))
    }

    /// Pure resolution from explicit inputs.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoHomeDirectory`] when the chosen rule needs
    /// `env.home` and it is `None`.
    pub fn resolve(os: OsFamily, env: &PlatformEnv) -> Result<Self, SettingsError> {
        if let (OsFamily::Windows, Some(app_data)) = (os, env.app_data.as_ref()) {
            return Ok(Self::at(app_data.join(APP_DIR_NAME)));
        }

        let home = env.home.as_ref().ok_or(SettingsError::NoHomeDirectory)?;
        let dir = match os {
            OsFamily::MacOs => home
                .join("Library")
                .join("Application Support")
                .join(APP_DIR_NAME),
            OsFamily::Windows | OsFamily::Other => home.join(format!(".{APP_DIR_NAME}")),
        };
        Ok(Self::at(dir))
    }

    /// The settings directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of `settings.json`.
    pub fn settings_file(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }

    /// A fresh scratch path for one atomic save,
    /// `settings.json.<uuid>.tmp`.
    ///
    /// Every call returns a new name, so saves from different stores on the
    /// same directory never write to the same scratch file.
    pub fn temp_file(&self) -> PathBuf {
        self.dir
            .join(format!("{SETTINGS_FILE_NAME}.{}{TEMP_SUFFIX}", Uuid::new_v4()))
    }

    /// `true` for names produced by [`SettingsLocation::temp_file`].
    pub fn is_temp_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| {
                name.starts_with(&format!("{SETTINGS_FILE_NAME}.")) && name.ends_with(TEMP_SUFFIX)
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn env(app_data: Option<&str>, home: Option<&str>) -> PlatformEnv {
        PlatformEnv {
            app_data: app_data.map(PathBuf::from),
            home: home.map(PathBuf::from),
        }
    }

    // ── OsFamily ──────────────────────────────────────────────────────────────

    #[test]
    fn test_os_family_from_known_names() {
        assert_eq!(OsFamily::from_os_name("windows"), OsFamily::Windows);
        assert_eq!(OsFamily::from_os_name("macos"), OsFamily::MacOs);
        assert_eq!(OsFamily::from_os_name("linux"), OsFamily::Other);
        assert_eq!(OsFamily::from_os_name("solaris"), OsFamily::Other);
        assert_eq!(OsFamily::from_os_name("freebsd"), OsFamily::Other);
    }

    #[test]
    fn test_os_family_current_matches_compile_target() {
        let family = OsFamily::current();
        #[cfg(target_os = "windows")]
        assert_eq!(family, OsFamily::Windows);
        #[cfg(target_os = "macos")]
        assert_eq!(family, OsFamily::MacOs);
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        assert_eq!(family, OsFamily::Other);
    }

    // ── Resolution table ──────────────────────────────────────────────────────

    #[test]
    fn test_windows_with_app_data_uses_app_data() {
        // Arrange
        let env = env(Some(r"C:\Users\alice\AppData\Roaming"), Some(r"C:\Users\alice"));

        // Act
        let location = SettingsLocation::resolve(OsFamily::Windows, &env).expect("resolve");

        // Assert
        assert_eq!(
            location.dir(),
            PathBuf::from(r"C:\Users\alice\AppData\Roaming").join("Cryptomator")
        );
    }

    #[test]
    fn test_windows_without_app_data_uses_dot_dir_in_home() {
        let env = env(None, Some(r"C:\Users\alice"));
        let location = SettingsLocation::resolve(OsFamily::Windows, &env).expect("resolve");
        assert_eq!(
            location.dir(),
            PathBuf::from(r"C:\Users\alice").join(".Cryptomator")
        );
    }

    #[test]
    fn test_windows_with_app_data_does_not_need_home() {
        let env = env(Some(r"C:\AppData"), None);
        assert!(SettingsLocation::resolve(OsFamily::Windows, &env).is_ok());
    }

    #[test]
    fn test_macos_uses_application_support() {
        let env = env(None, Some("/Users/alice"));
        let location = SettingsLocation::resolve(OsFamily::MacOs, &env).expect("resolve");
        assert_eq!(
            location.dir(),
            PathBuf::from("/Users/alice")
                .join("Library")
                .join("Application Support")
                .join("Cryptomator")
        );
    }

    #[test]
    fn test_macos_ignores_app_data() {
        let env = env(Some("/weird/appdata"), Some("/Users/alice"));
        let location = SettingsLocation::resolve(OsFamily::MacOs, &env).expect("resolve");
        assert!(location.dir().starts_with("/Users/alice"));
    }

    #[test]
    fn test_linux_uses_dot_dir_in_home() {
        let env = env(None, Some("/home/alice"));
        let location = SettingsLocation::resolve(OsFamily::Other, &env).expect("resolve");
        assert_eq!(location.dir(), PathBuf::from("/home/alice").join(".Cryptomator"));
    }

    #[test]
    fn test_missing_home_is_an_error() {
        let result = SettingsLocation::resolve(OsFamily::Other, &env(None, None));
        assert!(matches!(result, Err(SettingsError::NoHomeDirectory)));
    }

    // ── File names ────────────────────────────────────────────────────────────

    #[test]
    fn test_settings_file_is_settings_json_inside_dir() {
        let location = SettingsLocation::at("/home/alice/.Cryptomator");
        assert_eq!(
            location.settings_file(),
            PathBuf::from("/home/alice/.Cryptomator").join("settings.json")
        );
    }

    #[test]
    fn test_temp_file_lives_next_to_settings_file() {
        let location = SettingsLocation::at("/home/alice/.Cryptomator");
        let temp = location.temp_file();
        assert_eq!(temp.parent(), Some(location.dir()));
        assert_ne!(temp, location.settings_file());
        assert!(SettingsLocation::is_temp_file(&temp), "got {temp:?}");
    }

    #[test]
    fn test_each_temp_file_name_is_unique() {
        let location = SettingsLocation::at("/home/alice/.Cryptomator");
        assert_ne!(location.temp_file(), location.temp_file());
    }

    #[test]
    fn test_settings_file_is_not_a_temp_file() {
        let location = SettingsLocation::at("/home/alice/.Cryptomator");
        assert!(!SettingsLocation::is_temp_file(&location.settings_file()));
    }

    // ── PlatformEnv ───────────────────────────────────────────────────────────

    #[test]
    fn test_from_vars_treats_empty_app_data_as_unset() {
        let env = PlatformEnv::from_vars(OsFamily::Windows, |key| match key {
            "APPDATA" => Some(OsString::new()),
            "USERPROFILE" => Some(OsString::from(r"C:\Users\alice")),
            _ => None,
        });
        assert_eq!(env.app_data, None);
        assert_eq!(env.home, Some(PathBuf::from(r"C:\Users\alice")));
    }

    #[test]
    fn test_from_vars_windows_prefers_userprofile() {
        let env = PlatformEnv::from_vars(OsFamily::Windows, |key| match key {
            "USERPROFILE" => Some(OsString::from(r"C:\Users\alice")),
            "HOME" => Some(OsString::from("/c/Users/alice")),
            _ => None,
        });
        assert_eq!(env.home, Some(PathBuf::from(r"C:\Users\alice")));
    }

    #[test]
    fn test_from_vars_unix_prefers_home_and_falls_back() {
        let both = PlatformEnv::from_vars(OsFamily::Other, |key| match key {
            "HOME" => Some(OsString::from("/home/alice")),
            "USERPROFILE" => Some(OsString::from("/other")),
            _ => None,
        });
        assert_eq!(both.home, Some(PathBuf::from("/home/alice")));

        let fallback = PlatformEnv::from_vars(OsFamily::Other, |key| match key {
            "USERPROFILE" => Some(OsString::from("/other")),
            _ => None,
        });
        assert_eq!(fallback.home, Some(PathBuf::from("/other")));
    }

    #[test]
    fn test_from_env_resolves_when_home_is_available() {
        // May legitimately fail in a stripped container with no HOME.
        let os = OsFamily::current();
        if PlatformEnv::capture(os).home.is_some() {
            let location = SettingsLocation::from_env().expect("resolve from env");
            assert!(location.dir().ends_with("Cryptomator") || location.dir().ends_with(".Cryptomator"));
        }
    }
}
