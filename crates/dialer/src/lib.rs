//! Permission-Gated Dialer
//!
//! Dials composed feature codes through the platform call intent,
//! re-checking the call permission before every attempt and routing
//! refusals to a settings prompt.

pub mod dialer;
pub mod permission;
pub mod prefs;
pub mod prompt;

pub use dialer::{DialError, DialOutcome, Dialer, LaunchReport};
pub use permission::{CallIntent, PermissionApi, PermissionState, PlatformError};
pub use prefs::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, FIRST_START_KEY};
pub use prompt::{PromptChoice, SettingsPrompt, PERMISSION_RATIONALE};
