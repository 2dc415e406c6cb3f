//! SupSer Core - configuration and shared screen state
//!
//! This crate holds what both app variants share: configuration,
//! branding, drawer navigation and the forwarding number book.

pub mod branding;
pub mod config;
pub mod error;
pub mod navigation;
pub mod numbers;

pub use branding::{Branding, Color, Palette};
pub use config::{AppConfig, DeviceConfig};
pub use error::{Result, SupserError};
pub use navigation::{Navigator, Section};
pub use numbers::{NumberBook, NumberEntry};

/// SupSer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "SupSer";
