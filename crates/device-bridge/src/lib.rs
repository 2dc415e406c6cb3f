//! Android Device Bridge
//!
//! Dials feature codes on a real handset through adb.

pub mod adb;
pub mod device;
pub mod platform;

pub use adb::{AdbClient, AdbError};
pub use device::{Device, DeviceState, DeviceType};
pub use platform::{AdbPlatform, DryRunPlatform};
