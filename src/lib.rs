//! SupSer - Supplementary Services dialer
//!
//! Composes GSM call-forwarding codes (registration, activation,
//! interrogation, deactivation, erasure) and dials them on an Android
//! handset through adb.
//!
//! ## Architecture
//!
//! - `supser-core`: configuration, branding, navigation, number book
//! - `supser-mmi`: feature-code composition and `tel:` URIs
//! - `supser-dialer`: permission-gated dialing and the first-run gate
//! - `supser-device-bridge`: adb client and adb-backed platform

#![warn(clippy::all)]

pub mod app;
pub mod commands;
pub mod shell;
pub mod terminal;

// Re-export main components for library usage
pub use supser_core as core;
pub use supser_device_bridge as bridge;
pub use supser_dialer as dialer;
pub use supser_mmi as mmi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use supser_core::{AppConfig, Branding, NumberBook};
    pub use supser_device_bridge::{AdbClient, AdbPlatform, DryRunPlatform};
    pub use supser_dialer::{DialOutcome, Dialer, PermissionState};
    pub use supser_mmi::{compose, ComposedCode, Operation, SupplementaryService, TelUri};
}
