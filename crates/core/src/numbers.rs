//! Forwarding Number Book
//!
//! The number field with its dropdown: a blank user entry, the
//! configured presets and any custom numbers committed this session.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Label given to numbers committed from the field
pub const CUSTOM_LABEL: &str = "Custom";

/// Label of the blank first entry
pub const USER_ENTRY_LABEL: &str = "User entry";

/// A saved forwarding target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberEntry {
    pub number: String,
    pub label: String,
}

impl NumberEntry {
    pub fn new(number: &str, label: &str) -> Self {
        Self {
            number: number.to_string(),
            label: label.to_string(),
        }
    }
}

/// Default preset numbers
pub fn default_presets() -> Vec<NumberEntry> {
    vec![
        NumberEntry::new("+48223779542", "Landline 1"),
        NumberEntry::new("+48223779543", "Landline 2"),
        NumberEntry::new("+48223779544", "Landline 3"),
    ]
}

/// Selected number plus the dropdown entries
#[derive(Debug, Clone)]
pub struct NumberBook {
    entries: Vec<NumberEntry>,
    selected: String,
}

impl NumberBook {
    /// Start with the blank user entry followed by `presets`
    pub fn new(presets: &[NumberEntry]) -> Self {
        let mut entries = Vec::with_capacity(presets.len() + 1);
        entries.push(NumberEntry::new("", USER_ENTRY_LABEL));
        entries.extend(presets.iter().cloned());
        Self {
            selected: entries[0].number.clone(),
            entries,
        }
    }

    pub fn entries(&self) -> &[NumberEntry] {
        &self.entries
    }

    /// Current forwarding number
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Typing into the field replaces the current value
    pub fn set_selected(&mut self, number: impl Into<String>) {
        self.selected = number.into();
    }

    /// Pick a dropdown entry
    pub fn select_index(&mut self, index: usize) -> Option<&NumberEntry> {
        let entry = self.entries.get(index)?;
        self.selected = entry.number.clone();
        Some(entry)
    }

    /// Pick a dropdown entry by label, case-insensitively
    pub fn select_label(&mut self, label: &str) -> Option<&NumberEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.label.eq_ignore_ascii_case(label))?;
        self.select_index(index)
    }

    pub fn contains(&self, number: &str) -> bool {
        self.entries.iter().any(|e| e.number == number)
    }

    /// Save the current value as a custom entry
    ///
    /// Returns `false` when the value is empty or already listed.
    pub fn commit_custom(&mut self) -> bool {
        if self.selected.is_empty() || self.contains(&self.selected) {
            return false;
        }
        debug!("Adding custom number {}", self.selected);
        self.entries
            .push(NumberEntry::new(&self.selected, CUSTOM_LABEL));
        true
    }
}

impl Default for NumberBook {
    fn default() -> Self {
        Self::new(&default_presets())
    }
}
