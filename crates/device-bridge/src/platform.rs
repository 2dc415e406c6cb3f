//! adb-backed Platform
//!
//! Implements the dialer's permission and call-intent seams on a
//! handset reachable through adb.

use async_trait::async_trait;
use tracing::{info, warn};

use supser_dialer::{CallIntent, PermissionApi, PlatformError};
use supser_mmi::TelUri;

use crate::adb::{AdbClient, AdbError};
use crate::device::Device;

pub const ACTION_CALL: &str = "android.intent.action.CALL";
pub const ACTION_APPLICATION_DETAILS_SETTINGS: &str =
    "android.settings.APPLICATION_DETAILS_SETTINGS";

impl From<AdbError> for PlatformError {
    fn from(err: AdbError) -> Self {
        match err {
            AdbError::NotFound | AdbError::NoDevice | AdbError::DeviceNotFound(_) => {
                PlatformError::Unavailable(err.to_string())
            }
            AdbError::CommandFailed(msg) => PlatformError::CommandFailed(msg),
            AdbError::Io(e) => PlatformError::Io(e),
        }
    }
}

/// A handset reached through adb
pub struct AdbPlatform {
    client: AdbClient,
    device: Device,
    package: String,
    permission: String,
}

impl AdbPlatform {
    /// Bind to `serial`, or to the first online device
    pub async fn connect(
        client: AdbClient,
        serial: Option<&str>,
        package: &str,
        permission: &str,
    ) -> Result<Self, AdbError> {
        let device = match serial {
            Some(serial) => client.get_device(serial).await?,
            None => client.first_online().await?,
        };
        if !device.is_usable() {
            return Err(AdbError::DeviceNotFound(format!(
                "{} ({})",
                device.serial,
                device.state.as_str()
            )));
        }
        info!("Using device {}", device.display_name());

        Ok(Self {
            client,
            device,
            package: package.to_string(),
            permission: permission.to_string(),
        })
    }
}

#[async_trait]
impl PermissionApi for AdbPlatform {
    async fn is_granted(&self) -> Result<bool, PlatformError> {
        Ok(self
            .client
            .is_permission_granted(&self.device.serial, &self.package, &self.permission)
            .await?)
    }

    async fn request(&self) -> Result<bool, PlatformError> {
        match self
            .client
            .grant_permission(&self.device.serial, &self.package, &self.permission)
            .await
        {
            Ok(()) => self.is_granted().await,
            Err(AdbError::CommandFailed(msg)) => {
                warn!("Permission grant refused: {}", msg);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn open_app_settings(&self) -> Result<(), PlatformError> {
        let data = format!("package:{}", self.package);
        self.client
            .start_activity_with_intent(
                &self.device.serial,
                ACTION_APPLICATION_DETAILS_SETTINGS,
                Some(data.as_str()),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CallIntent for AdbPlatform {
    async fn call(&self, uri: &TelUri) -> Result<(), PlatformError> {
        self.client
            .start_activity_with_intent(
                &self.device.serial,
                ACTION_CALL,
                Some(uri.as_uri().as_str()),
            )
            .await?;
        Ok(())
    }
}

/// Platform that logs instead of touching a device
#[derive(Debug, Clone, Copy)]
pub struct DryRunPlatform {
    granted: bool,
}

impl DryRunPlatform {
    pub fn new(granted: bool) -> Self {
        Self { granted }
    }
}

#[async_trait]
impl PermissionApi for DryRunPlatform {
    async fn is_granted(&self) -> Result<bool, PlatformError> {
        Ok(self.granted)
    }

    async fn request(&self) -> Result<bool, PlatformError> {
        info!("[dry-run] permission request -> {}", self.granted);
        Ok(self.granted)
    }

    async fn open_app_settings(&self) -> Result<(), PlatformError> {
        info!("[dry-run] open app settings");
        Ok(())
    }
}

#[async_trait]
impl CallIntent for DryRunPlatform {
    async fn call(&self, uri: &TelUri) -> Result<(), PlatformError> {
        info!("[dry-run] {} {}", ACTION_CALL, uri);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adb_error_mapping() {
        assert!(matches!(
            PlatformError::from(AdbError::NoDevice),
            PlatformError::Unavailable(_)
        ));
        assert!(matches!(
            PlatformError::from(AdbError::CommandFailed("Error: bad".into())),
            PlatformError::CommandFailed(msg) if msg == "Error: bad"
        ));
    }

    #[tokio::test]
    async fn test_dry_run_reports_configured_state() {
        let platform = DryRunPlatform::new(false);
        assert!(!platform.is_granted().await.unwrap());
        assert!(!platform.request().await.unwrap());

        let uri = TelUri::for_code("*#21#");
        assert!(DryRunPlatform::new(true).call(&uri).await.is_ok());
    }
}
