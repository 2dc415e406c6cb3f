//! CLI commands for SupSer
//!
//! Provides command-line interface functionality for composing and
//! dialing supplementary-service codes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use supser_core::{AppConfig, NumberBook};
use supser_device_bridge::{AdbClient, AdbPlatform, DryRunPlatform};
use supser_dialer::{
    DialOutcome, Dialer, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
    SettingsPrompt,
};
use supser_mmi::{ComposedCode, Operation, SupplementaryService, TelUri};

use crate::app::{dialer_for, App};

/// Where the forwarding number comes from
#[derive(Debug, Clone, Default)]
pub struct NumberSource {
    pub number: Option<String>,
    pub preset: Option<String>,
}

impl NumberSource {
    pub fn is_set(&self) -> bool {
        self.number.is_some() || self.preset.is_some()
    }

    /// Warn when `operation` leaves the number out of the code
    pub fn check_used_by(&self, operation: Operation) {
        if self.is_set() && !operation.uses_number() {
            warn!("{} ignores the forwarding number", operation.label());
        }
    }

    /// Apply to a fresh number book
    pub fn apply(&self, numbers: &mut NumberBook) -> Result<()> {
        if let Some(label) = &self.preset {
            numbers
                .select_label(label)
                .ok_or_else(|| anyhow!("No preset labelled '{}'", label))?;
        }
        if let Some(number) = &self.number {
            numbers.set_selected(number.clone());
        }
        Ok(())
    }
}

/// How to reach the handset
#[derive(Debug, Clone, Default)]
pub struct DeviceTarget {
    pub serial: Option<String>,
    pub dry_run: bool,
    /// Dry runs only: pretend the permission is missing
    pub deny: bool,
}

impl DeviceTarget {
    /// Build a dialer for this target
    pub async fn connect(
        &self,
        config: &AppConfig,
        prompt: Arc<dyn SettingsPrompt>,
    ) -> Result<Dialer> {
        if self.dry_run {
            return Ok(dialer_for(DryRunPlatform::new(!self.deny), prompt));
        }

        let client = AdbClient::locate(&config.adb_candidates())?;
        info!("Using adb at {:?}", client.path());

        let serial = self.serial.as_deref().or(config.device.serial.as_deref());
        let platform = AdbPlatform::connect(
            client,
            serial,
            &config.device.package,
            &config.device.permission,
        )
        .await?;
        Ok(dialer_for(platform, prompt))
    }
}

/// Open the persisted preference store, or an in-memory one
pub async fn open_preferences(config: &AppConfig) -> Result<Box<dyn PreferenceStore>> {
    match config.preferences_path() {
        Some(path) => {
            let store = FilePreferenceStore::open(&path)
                .await
                .with_context(|| format!("Opening preferences {:?}", path))?;
            Ok(Box::new(store))
        }
        None => Ok(Box::new(MemoryPreferenceStore::new())),
    }
}

/// Service listing command
pub struct ServicesCommand;

impl ServicesCommand {
    pub fn execute(&self) -> Result<()> {
        println!("Supplementary services:");
        for service in SupplementaryService::ALL {
            println!("  {:<14} {}  {}", service.as_str(), service.code(), service);
        }
        println!();
        println!("Operations:");
        for op in Operation::ALL {
            let example = SupplementaryService::Unconditional.option().compose(op, "N");
            println!("  {:<14} {}", op.as_str(), example);
        }
        Ok(())
    }
}

/// Compose command options
pub struct ComposeCommand {
    pub service: SupplementaryService,
    pub operation: Operation,
    pub number: NumberSource,
}

impl ComposeCommand {
    /// Compose without dialing
    pub fn execute(&self, config: &AppConfig) -> Result<ComposedCode> {
        let mut numbers = NumberBook::new(&config.presets);
        self.number.apply(&mut numbers)?;
        self.number.check_used_by(self.operation);

        let code = self
            .service
            .option()
            .compose(self.operation, numbers.selected());
        println!("{}", code);
        println!("{}", TelUri::for_code(code.as_str()));
        Ok(code)
    }
}

/// Dial command options
pub struct DialCommand {
    pub service: SupplementaryService,
    pub operation: Operation,
    pub number: NumberSource,
    pub target: DeviceTarget,
}

impl DialCommand {
    /// Launch, compose, dial
    pub async fn execute(
        &self,
        config: &AppConfig,
        prompt: Arc<dyn SettingsPrompt>,
    ) -> Result<DialOutcome> {
        let dialer = self.target.connect(config, prompt).await?;
        let mut app = App::new(config, dialer)?;
        self.number.apply(&mut app.screen.numbers)?;
        self.number.check_used_by(self.operation);

        let mut prefs = open_preferences(config).await?;
        app.start(prefs.as_mut()).await?;

        let (code, outcome) = app.press(self.service, self.operation).await?;
        match &outcome {
            DialOutcome::Dispatched(uri) => println!("Dialed {} ({})", code, uri),
            DialOutcome::SettingsOpened => {
                println!("Call permission missing; opened app settings. Dial again once granted.")
            }
            DialOutcome::Dismissed => println!("Call permission missing; {} not dialed", code),
        }
        Ok(outcome)
    }
}

/// Device list command
pub struct DevicesCommand {
    pub adb_path: Option<PathBuf>,
}

impl DevicesCommand {
    /// List all connected devices
    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        let client = match &self.adb_path {
            Some(path) => AdbClient::new(path.clone()),
            None => AdbClient::locate(&config.adb_candidates())?,
        };
        let devices = client.list_devices().await?;

        if devices.is_empty() {
            println!("No devices connected");
        } else {
            println!("Connected devices:");
            for device in devices {
                println!("  {} - {}", device.display_name(), device.state.as_str());
            }
        }

        Ok(())
    }
}
