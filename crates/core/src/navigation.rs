//! Drawer Navigation
//!
//! Sections reachable from the drawer menu. New sections are added as
//! variants; callers must not assume the list is closed.

use serde::{Deserialize, Serialize};

use crate::branding::Branding;

/// A top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Section {
    SupplementaryServices,
    AutoCalls,
}

impl Section {
    /// Drawer order
    pub const ALL: &'static [Section] = &[Section::SupplementaryServices, Section::AutoCalls];

    /// Drawer button text
    pub fn title(&self) -> &'static str {
        match self {
            Section::SupplementaryServices => "Supplementary Services",
            Section::AutoCalls => "Auto Calls",
        }
    }

    /// Short header suffix
    pub fn header(&self) -> &'static str {
        match self {
            Section::SupplementaryServices => "SS",
            Section::AutoCalls => "Calls",
        }
    }

    /// Sections that only show a work-in-progress notice
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Section::AutoCalls)
    }

    pub fn from_name(name: &str) -> Option<Section> {
        let key = name.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|s| {
            s.header().eq_ignore_ascii_case(&key) || s.title().to_ascii_lowercase() == key
        })
    }
}

impl Default for Section {
    fn default() -> Self {
        Section::SupplementaryServices
    }
}

/// Drawer and section selection state
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    selected: Section,
    drawer_open: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Section {
        self.selected
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Switch section; picking from the drawer closes it
    pub fn select(&mut self, section: Section) {
        self.selected = section;
        self.drawer_open = false;
    }

    /// Header line, e.g. "PAV Tool - SS"
    pub fn header_text(&self, branding: &Branding) -> String {
        format!("{} - {}", branding.app_title, self.selected.header())
    }
}
