//! ADB (Android Debug Bridge) Client
//!
//! Communicates with the handset via adb: device listing, activity
//! intents and package permission queries.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::device::{parse_devices, Device};

/// ADB errors
#[derive(Debug, thiserror::Error)]
pub enum AdbError {
    #[error("ADB not found")]
    NotFound,
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
    #[error("No online device connected")]
    NoDevice,
    #[error("ADB command failed: {0}")]
    CommandFailed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// ADB Client
#[derive(Debug, Clone)]
pub struct AdbClient {
    adb: PathBuf,
}

impl AdbClient {
    /// Create a client for the adb executable at `adb`
    pub fn new(adb: PathBuf) -> Self {
        Self { adb }
    }

    /// First existing candidate, falling back to `adb` on PATH
    pub fn locate(candidates: &[PathBuf]) -> Result<Self, AdbError> {
        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .or_else(|| which::which("adb").ok())
            .map(Self::new)
            .ok_or(AdbError::NotFound)
    }

    /// Get the ADB executable path
    pub fn path(&self) -> &Path {
        &self.adb
    }

    /// Run an ADB command
    async fn run(&self, args: &[&str]) -> Result<String, AdbError> {
        debug!("adb {:?}", args);

        let output = Command::new(&self.adb)
            .args(args)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AdbError::NotFound,
                _ => AdbError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AdbError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run an ADB command for a specific device
    async fn run_for_device(&self, serial: &str, args: &[&str]) -> Result<String, AdbError> {
        let mut full_args = vec!["-s", serial];
        full_args.extend(args);
        self.run(&full_args).await
    }

    /// List connected devices
    pub async fn list_devices(&self) -> Result<Vec<Device>, AdbError> {
        let output = self.run(&["devices", "-l"]).await?;
        Ok(parse_devices(&output))
    }

    /// Get a specific device
    pub async fn get_device(&self, serial: &str) -> Result<Device, AdbError> {
        self.list_devices()
            .await?
            .into_iter()
            .find(|d| d.serial == serial)
            .ok_or_else(|| AdbError::DeviceNotFound(serial.to_string()))
    }

    /// The first online device
    pub async fn first_online(&self) -> Result<Device, AdbError> {
        self.list_devices()
            .await?
            .into_iter()
            .find(Device::is_usable)
            .ok_or(AdbError::NoDevice)
    }

    /// Run a shell command with multiple arguments
    pub async fn shell_args(&self, serial: &str, args: &[&str]) -> Result<String, AdbError> {
        let mut full_args = vec!["shell"];
        full_args.extend(args);
        self.run_for_device(serial, &full_args).await
    }

    /// Launch an activity with intent
    ///
    /// `am start` exits zero even when the intent is rejected, so its
    /// output is checked for an `Error` line.
    pub async fn start_activity_with_intent(
        &self,
        serial: &str,
        action: &str,
        data: Option<&str>,
    ) -> Result<(), AdbError> {
        let args = intent_args(action, data);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self.shell_args(serial, &args).await?;
        check_am_start(&output)
    }

    /// Whether `package` holds `permission`
    pub async fn is_permission_granted(
        &self,
        serial: &str,
        package: &str,
        permission: &str,
    ) -> Result<bool, AdbError> {
        let output = self.shell_args(serial, &["dumpsys", "package", package]).await?;
        Ok(parse_permission_granted(&output, permission))
    }

    /// Grant a runtime permission to `package`
    pub async fn grant_permission(
        &self,
        serial: &str,
        package: &str,
        permission: &str,
    ) -> Result<(), AdbError> {
        self.shell_args(serial, &["pm", "grant", package, permission]).await?;
        Ok(())
    }
}

/// `am start` arguments for an intent; `data` is quoted for the device shell
pub fn intent_args(action: &str, data: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "am".to_string(),
        "start".to_string(),
        "-a".to_string(),
        action.to_string(),
    ];
    if let Some(d) = data {
        args.push("-d".to_string());
        args.push(shell_quote(d));
    }
    args
}

/// Fail on the `Error` line `am start` prints instead of a non-zero exit
pub fn check_am_start(output: &str) -> Result<(), AdbError> {
    match output.lines().find(|l| l.trim_start().starts_with("Error")) {
        Some(line) => Err(AdbError::CommandFailed(line.trim().to_string())),
        None => Ok(()),
    }
}

/// Quote an argument for the device shell
pub fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Find `<permission>: granted=true` in `dumpsys package` output
pub fn parse_permission_granted(dumpsys: &str, permission: &str) -> bool {
    dumpsys.lines().any(|line| {
        line.trim()
            .strip_prefix(permission)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(|rest| rest.contains("granted=true"))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMPSYS: &str = "\
Packages:
  Package [com.example.pavtool] (3c1f7a2):
    install permissions:
      android.permission.INTERNET: granted=true
    runtime permissions:
      android.permission.CALL_PHONE_EXTRA: granted=true
      android.permission.CALL_PHONE: granted=false, flags=[ USER_SET ]
";

    #[test]
    fn test_permission_denied() {
        assert!(!parse_permission_granted(DUMPSYS, "android.permission.CALL_PHONE"));
        assert!(parse_permission_granted(DUMPSYS, "android.permission.INTERNET"));
    }

    #[test]
    fn test_permission_granted() {
        let output = DUMPSYS.replace("CALL_PHONE: granted=false", "CALL_PHONE: granted=true");
        assert!(parse_permission_granted(&output, "android.permission.CALL_PHONE"));
        assert!(!parse_permission_granted(&output, "android.permission.CAMERA"));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("tel:*%2321%23"), "'tel:*%2321%23'");
        assert_eq!(shell_quote("tel:1'2"), r"'tel:1'\''2'");
    }

    #[test]
    fn test_call_intent_args() {
        let args = intent_args("android.intent.action.CALL", Some("tel:**21*0048223779542%23"));
        assert_eq!(
            args,
            vec![
                "am",
                "start",
                "-a",
                "android.intent.action.CALL",
                "-d",
                "'tel:**21*0048223779542%23'",
            ]
        );
        assert_eq!(intent_args("android.intent.action.MAIN", None).len(), 4);
    }

    #[test]
    fn test_am_start_output() {
        let started = "Starting: Intent { act=android.intent.action.CALL dat=tel:xxxxxxxxxxxx }\n";
        assert!(check_am_start(started).is_ok());

        let rejected = "Starting: Intent { act=android.intent.action.CALL }\n\
                        Error: Activity not started, unable to resolve Intent\n";
        match check_am_start(rejected) {
            Err(AdbError::CommandFailed(line)) => {
                assert!(line.starts_with("Error: Activity not started"))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
