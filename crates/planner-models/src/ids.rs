//! Type-safe ID wrappers for the planner.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtypes with common functionality.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new random ID.
            pub fn new() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4()))
            }

            /// Creates an ID from an existing string (records owned by other systems, tests).
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Returns the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(EmployeeId, "emp");
define_id!(UserId, "user");
define_id!(ProjectId, "proj");
define_id!(PhaseId, "fase");
define_id!(BlockId, "blk");
define_id!(LeaveId, "leave");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_prefixes() {
        assert!(EmployeeId::new().as_str().starts_with("emp-"));
        assert!(PhaseId::new().as_str().starts_with("fase-"));
        assert!(BlockId::new().as_str().starts_with("blk-"));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(BlockId::new(), BlockId::new());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = EmployeeId::from("anna");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"anna\"");

        let parsed: EmployeeId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_display() {
        let id = ProjectId::from_string("proj-42");
        assert_eq!(id.to_string(), "proj-42");
    }
}
