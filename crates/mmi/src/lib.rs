//! GSM Supplementary Service codes
//!
//! Builds MMI feature-code strings (call forwarding registration,
//! activation, interrogation, deactivation and erasure) and turns them
//! into `tel:` URIs the Android dialer accepts.

pub mod composer;
pub mod operation;
pub mod service;
pub mod tel;

pub use composer::{compose, is_dialable, ComposedCode};
pub use operation::Operation;
pub use service::{SupplementaryService, SupplementaryServiceOption};
pub use tel::TelUri;

/// Terminator shared by every supplementary-service code
pub const SUFFIX: &str = "#";

/// Parse errors for service and operation names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MmiError {
    #[error("Unknown supplementary service: {0}")]
    UnknownService(String),
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}
