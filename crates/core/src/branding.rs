//! Branding
//!
//! One application, several shipped variants. A variant differs only
//! in package name, title and palette.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SupserError};

/// RGB Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// 24-bit ANSI foreground escape for terminal rendering
    pub fn ansi_fg(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(SupserError::InvalidColor(hex)))
    }
}

/// Colors used by headers, buttons and the number field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub on_secondary: Color,
    pub secondary_container: Color,
    pub tertiary_container: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x00, 0x5c, 0xb5),
            secondary: Color::rgb(0x55, 0x5f, 0x71),
            on_secondary: Color::rgb(0xff, 0xff, 0xff),
            secondary_container: Color::rgb(0xd9, 0xe3, 0xf8),
            tertiary_container: Color::rgb(0xf9, 0xd8, 0xff),
        }
    }
}

/// A shipped app variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    /// Variant identifier used on the command line
    pub variant: String,
    /// Title shown in every header
    pub app_title: String,
    /// Android package the variant is installed as
    pub package_name: String,
    pub palette: Palette,
}

impl Branding {
    pub fn pav_tool() -> Self {
        Self {
            variant: "pavtool".to_string(),
            app_title: "PAV Tool".to_string(),
            package_name: "com.example.pavtool".to_string(),
            palette: Palette::default(),
        }
    }

    pub fn supser_app() -> Self {
        Self {
            variant: "supserapp".to_string(),
            app_title: "PAV Tool".to_string(),
            package_name: "com.example.supserapp".to_string(),
            palette: Palette {
                primary: Color::rgb(0x38, 0x6a, 0x20),
                secondary: Color::rgb(0x55, 0x62, 0x4c),
                on_secondary: Color::rgb(0xff, 0xff, 0xff),
                secondary_container: Color::rgb(0xd9, 0xe7, 0xcb),
                tertiary_container: Color::rgb(0xbc, 0xeb, 0xec),
            },
        }
    }

    /// Both built-in variants
    pub fn builtin() -> Vec<Self> {
        vec![Self::pav_tool(), Self::supser_app()]
    }

    /// Pick a variant by identifier
    pub fn find<'a>(brandings: &'a [Branding], variant: &str) -> Result<&'a Branding> {
        brandings
            .iter()
            .find(|b| b.variant.eq_ignore_ascii_case(variant))
            .ok_or_else(|| SupserError::UnknownVariant(variant.to_string()))
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self::pav_tool()
    }
}
