//! Permission and Call-Intent Seams
//!
//! The host platform behind the dialer: permission queries, the
//! per-app settings screen and the `tel:` call intent.

use async_trait::async_trait;

use supser_mmi::TelUri;

/// Platform transport errors
///
/// A refused permission is not an error; these cover the platform
/// being unreachable.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Platform unavailable: {0}")]
    Unavailable(String),
    #[error("Platform command failed: {0}")]
    CommandFailed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Last known call permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// Not read from the platform yet
    #[default]
    Unchecked,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn from_granted(granted: bool) -> Self {
        if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

/// OS permission API
#[async_trait]
pub trait PermissionApi: Send + Sync {
    /// Is the call permission currently granted
    async fn is_granted(&self) -> Result<bool, PlatformError>;

    /// Ask for the permission; resolves to the user's answer
    async fn request(&self) -> Result<bool, PlatformError>;

    /// Open the per-app settings screen
    async fn open_app_settings(&self) -> Result<(), PlatformError>;
}

/// OS dialer intent
#[async_trait]
pub trait CallIntent: Send + Sync {
    /// Start a call; the outcome is not observed
    async fn call(&self, uri: &TelUri) -> Result<(), PlatformError>;
}
