//! Supplementary Service Operations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MmiError;

/// Procedure applied to a supplementary service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Register a forwarding number (`**`)
    Registration,
    /// Activate with a forwarding number (`*`)
    Activation,
    /// Query the current status (`*#`)
    Interrogate,
    /// Deactivate (`#`)
    Deactivate,
    /// Erase the registration (`##`)
    EraseAll,
}

impl Operation {
    /// All operations in button order
    pub const ALL: [Operation; 5] = [
        Operation::Registration,
        Operation::Activation,
        Operation::Interrogate,
        Operation::Deactivate,
        Operation::EraseAll,
    ];

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Registration => "Registration",
            Operation::Activation => "Activation",
            Operation::Interrogate => "Interrogate",
            Operation::Deactivate => "Deactivate",
            Operation::EraseAll => "Erase all",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Registration => "registration",
            Operation::Activation => "activation",
            Operation::Interrogate => "interrogate",
            Operation::Deactivate => "deactivate",
            Operation::EraseAll => "erase-all",
        }
    }

    /// Whether the forwarding number ends up in the code
    pub fn uses_number(&self) -> bool {
        matches!(self, Operation::Registration | Operation::Activation)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = MmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "registration" | "register" | "reg" => Ok(Operation::Registration),
            "activation" | "activate" | "act" => Ok(Operation::Activation),
            "interrogate" | "interrogation" | "status" => Ok(Operation::Interrogate),
            "deactivate" | "deactivation" => Ok(Operation::Deactivate),
            "erase-all" | "erase" | "erasure" => Ok(Operation::EraseAll),
            _ => Err(MmiError::UnknownOperation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operation() {
        assert_eq!("Erase all".parse(), Ok(Operation::EraseAll));
        assert_eq!("erase_all".parse(), Ok(Operation::EraseAll));
        assert_eq!("register".parse(), Ok(Operation::Registration));
        assert!(matches!(
            "forward".parse::<Operation>(),
            Err(MmiError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_uses_number() {
        let with_number: Vec<Operation> = Operation::ALL
            .into_iter()
            .filter(|op| op.uses_number())
            .collect();
        assert_eq!(with_number, vec![Operation::Registration, Operation::Activation]);
    }
}
