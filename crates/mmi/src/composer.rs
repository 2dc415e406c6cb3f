//! Feature-Code Composer
//!
//! Maps (operation, service code, forwarding number) to the MMI string
//! handed to the dialer. The number is never validated here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// A dialable MMI string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposedCode(String);

impl ComposedCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComposedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComposedCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compose the feature code for `operation`
///
/// | Operation    | Template             |
/// |--------------|----------------------|
/// | Registration | `**{P}*{N}{S}`       |
/// | Activation   | `*{P}*{N}*11{S}`     |
/// | Interrogate  | `*#{P}#`             |
/// | Deactivate   | `#{P}#`              |
/// | EraseAll     | `##{P}*#`            |
pub fn compose(operation: Operation, prefix: &str, suffix: &str, number: &str) -> ComposedCode {
    let code = match operation {
        Operation::Registration => format!("**{}*{}{}", prefix, number, suffix),
        Operation::Activation => format!("*{}*{}*11{}", prefix, number, suffix),
        Operation::Interrogate => format!("*#{}#", prefix),
        Operation::Deactivate => format!("#{}#", prefix),
        Operation::EraseAll => format!("##{}*#", prefix),
    };
    ComposedCode(code)
}

/// Whether every character of `number` can be keyed on a phone pad
///
/// Advisory only: composition passes anything through.
pub fn is_dialable(number: &str) -> bool {
    number
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '*' | '#'))
}
