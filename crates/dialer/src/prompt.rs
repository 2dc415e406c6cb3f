//! Settings Prompt

use async_trait::async_trait;

/// Text shown when dialing without the call permission
pub const PERMISSION_RATIONALE: &str =
    "This feature requires phone call permission to function. Please allow it in app settings.";

/// Modal choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// Open the per-app settings screen
    Settings,
    /// Dismiss
    Cancel,
}

impl PromptChoice {
    pub fn label(&self) -> &'static str {
        match self {
            PromptChoice::Settings => "Settings",
            PromptChoice::Cancel => "Cancel",
        }
    }
}

/// Blocking two-button modal
#[async_trait]
pub trait SettingsPrompt: Send + Sync {
    async fn ask(&self, message: &str) -> PromptChoice;
}
