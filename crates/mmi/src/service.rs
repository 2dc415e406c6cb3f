//! Supplementary Service Options
//!
//! The four call-forwarding services and their 3GPP service codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::composer::{compose, ComposedCode};
use crate::operation::Operation;
use crate::{MmiError, SUFFIX};

/// A service button group as shown on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplementaryServiceOption {
    /// Display title
    pub title: &'static str,
    /// Two-digit service code
    pub prefix: &'static str,
    /// Code terminator, always `#`
    pub suffix: &'static str,
}

impl SupplementaryServiceOption {
    /// Compose the feature code for this service
    pub fn compose(&self, operation: Operation, number: &str) -> ComposedCode {
        compose(operation, self.prefix, self.suffix, number)
    }
}

pub const UNCONDITIONAL: SupplementaryServiceOption = SupplementaryServiceOption {
    title: "Call Forwarding Unconditional",
    prefix: "21",
    suffix: SUFFIX,
};

pub const WHEN_BUSY: SupplementaryServiceOption = SupplementaryServiceOption {
    title: "Call Forwarding When Busy",
    prefix: "67",
    suffix: SUFFIX,
};

pub const WHEN_NOT_REACHABLE: SupplementaryServiceOption = SupplementaryServiceOption {
    title: "Call Forwarding When Not Reachable",
    prefix: "61",
    suffix: SUFFIX,
};

pub const WHEN_NOT_ANSWERED: SupplementaryServiceOption = SupplementaryServiceOption {
    title: "Call Forwarding When Not Answered",
    prefix: "62",
    suffix: SUFFIX,
};

/// Call forwarding service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupplementaryService {
    Unconditional,
    WhenBusy,
    WhenNotReachable,
    WhenNotAnswered,
}

impl SupplementaryService {
    /// All services in screen order
    pub const ALL: [SupplementaryService; 4] = [
        SupplementaryService::Unconditional,
        SupplementaryService::WhenBusy,
        SupplementaryService::WhenNotReachable,
        SupplementaryService::WhenNotAnswered,
    ];

    pub fn option(&self) -> &'static SupplementaryServiceOption {
        match self {
            SupplementaryService::Unconditional => &UNCONDITIONAL,
            SupplementaryService::WhenBusy => &WHEN_BUSY,
            SupplementaryService::WhenNotReachable => &WHEN_NOT_REACHABLE,
            SupplementaryService::WhenNotAnswered => &WHEN_NOT_ANSWERED,
        }
    }

    /// Short command-line name
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplementaryService::Unconditional => "unconditional",
            SupplementaryService::WhenBusy => "busy",
            SupplementaryService::WhenNotReachable => "not-reachable",
            SupplementaryService::WhenNotAnswered => "not-answered",
        }
    }

    pub fn code(&self) -> &'static str {
        self.option().prefix
    }
}

impl fmt::Display for SupplementaryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option().title)
    }
}

impl FromStr for SupplementaryService {
    type Err = MmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "unconditional" | "cfu" | "21" => Ok(SupplementaryService::Unconditional),
            "busy" | "when-busy" | "cfb" | "67" => Ok(SupplementaryService::WhenBusy),
            "not-reachable" | "when-not-reachable" | "cfnrc" | "61" => {
                Ok(SupplementaryService::WhenNotReachable)
            }
            "not-answered" | "when-not-answered" | "cfnry" | "62" => {
                Ok(SupplementaryService::WhenNotAnswered)
            }
            _ => Err(MmiError::UnknownService(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_codes() {
        let codes: Vec<&str> = SupplementaryService::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!["21", "67", "61", "62"]);
    }

    #[test]
    fn test_suffix_is_always_hash() {
        for service in SupplementaryService::ALL {
            assert_eq!(service.option().suffix, "#");
            assert_eq!(service.option().prefix.len(), 2);
        }
    }

    #[test]
    fn test_parse_service() {
        assert_eq!("busy".parse(), Ok(SupplementaryService::WhenBusy));
        assert_eq!("Not_Reachable".parse(), Ok(SupplementaryService::WhenNotReachable));
        assert_eq!("62".parse(), Ok(SupplementaryService::WhenNotAnswered));
        assert!("33".parse::<SupplementaryService>().is_err());
    }

    #[test]
    fn test_titles() {
        assert_eq!(
            SupplementaryService::WhenNotAnswered.to_string(),
            "Call Forwarding When Not Answered"
        );
    }
}
