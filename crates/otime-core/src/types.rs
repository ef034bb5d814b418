//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated string newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new value after validation.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(value))
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated control code.
    ///
    /// Control codes are the identifiers runners punch at checkpoints
    /// (e.g., "101"). They are treated as opaque strings; numeric codes are
    /// conventional but not required.
    ControlCode, "control code"
);

define_string_id!(
    /// A validated course name.
    ///
    /// Course names identify a course definition (e.g., "A", "sprint-long").
    CourseName, "course name"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_code_rejects_empty() {
        assert!(ControlCode::new("").is_err());
        assert!(ControlCode::new("101").is_ok());
    }

    #[test]
    fn course_name_rejects_empty() {
        assert!(CourseName::new("").is_err());
        assert!(CourseName::new("A").is_ok());
    }

    #[test]
    fn control_code_serde_roundtrip() {
        let code = ControlCode::new("105").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"105\"");
        let parsed: ControlCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn control_code_serde_rejects_empty() {
        let result: Result<ControlCode, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn control_code_as_ref() {
        let code = ControlCode::new("100").unwrap();
        let s: &str = code.as_ref();
        assert_eq!(s, "100");
    }

    #[test]
    fn course_name_display() {
        let name = CourseName::new("sprint-a").unwrap();
        assert_eq!(name.to_string(), "sprint-a");
    }
}
