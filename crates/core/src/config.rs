//! Application Configuration
//!
//! Manages all settings including:
//! - Branding variants and the active one
//! - Preset forwarding numbers
//! - Device / adb settings
//! - Location of the preference store

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::branding::Branding;
use crate::error::{Result, SupserError};
use crate::numbers::{default_presets, NumberEntry};

/// Permission the dialer depends on
pub const CALL_PHONE_PERMISSION: &str = "android.permission.CALL_PHONE";

/// Device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Explicit adb executable
    pub adb_path: Option<PathBuf>,
    /// Android SDK root, used when `adb_path` is unset
    pub sdk_path: Option<PathBuf>,
    /// Target device serial; first online device when unset
    pub serial: Option<String>,
    /// Package whose call permission gates dialing
    pub package: String,
    /// Runtime permission checked before each dial
    pub permission: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adb_path: None,
            sdk_path: None,
            serial: None,
            package: "com.android.shell".to_string(),
            permission: CALL_PHONE_PERMISSION.to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Active branding variant
    pub variant: String,
    /// Known branding variants
    pub brandings: Vec<Branding>,
    /// Dropdown presets after the blank user entry
    pub presets: Vec<NumberEntry>,
    /// Device settings
    pub device: DeviceConfig,
    /// Preference store file; defaults to the data directory
    pub preferences_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            variant: Branding::pav_tool().variant,
            brandings: Branding::builtin(),
            presets: default_presets(),
            device: DeviceConfig::default(),
            preferences_file: None,
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "supser", "SupSer")
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the default location
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| SupserError::Config("Cannot determine config path".into()))?;
        Self::load_from(&config_file).await
    }

    /// Load configuration from `path`, writing defaults if it is missing
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            let config = AppConfig::default();
            config.save_to(path).await?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<()> {
        self.branding()?;
        if self.device.package.trim().is_empty() {
            return Err(SupserError::Config("device.package must not be empty".into()));
        }
        Ok(())
    }

    /// The active branding variant
    pub fn branding(&self) -> Result<&Branding> {
        Branding::find(&self.brandings, &self.variant)
    }

    /// Where the first-run flag is stored
    pub fn preferences_path(&self) -> Option<PathBuf> {
        self.preferences_file
            .clone()
            .or_else(|| Self::data_dir().map(|dir| dir.join("prefs.toml")))
    }

    /// Resolve the adb executable
    ///
    /// Explicit path first, then `<sdk>/platform-tools/adb`, then the
    /// `ANDROID_HOME` / `ANDROID_SDK_ROOT` SDKs.
    pub fn adb_candidates(&self) -> Vec<PathBuf> {
        let adb_name = if cfg!(windows) { "adb.exe" } else { "adb" };
        let mut candidates = Vec::new();

        if let Some(path) = &self.device.adb_path {
            candidates.push(path.clone());
        }

        let sdk_roots = self
            .device
            .sdk_path
            .clone()
            .into_iter()
            .chain(
                ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
                    .iter()
                    .filter_map(|var| std::env::var_os(var).map(PathBuf::from)),
            );

        for root in sdk_roots {
            candidates.push(root.join("platform-tools").join(adb_name));
        }

        candidates
    }
}
