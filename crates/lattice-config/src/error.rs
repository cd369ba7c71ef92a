//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use lattice_core::LatticeError;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration not found: {}", path.display())]
    NotFound {
        /// The path that was searched.
        path: PathBuf,
    },

    /// File extension that maps to no supported format.
    #[error("Unsupported configuration format: '{extension}' (expected toml or json)")]
    UnsupportedFormat {
        /// The offending extension.
        extension: String,
    },

    /// Validation error.
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings rejected by the pricing library.
    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConfigError::Deserialization(err.to_string())
        } else {
            ConfigError::Serialization(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns every validation error found, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bounds {
        low: f64,
        high: f64,
    }

    impl Validate for Bounds {
        fn validate(&self) -> Vec<ValidationError> {
            let mut errors = Vec::new();
            if self.low <= 0.0 {
                errors.push(ValidationError::new("low", "must be positive"));
            }
            if self.high <= self.low {
                errors.push(ValidationError::with_rule(
                    "high",
                    "must exceed low",
                    "ordered_bounds",
                ));
            }
            errors
        }
    }

    #[test]
    fn test_validation_error_display() {
        let plain = ValidationError::new("steps", "must be positive");
        assert_eq!(plain.to_string(), "steps: must be positive");

        let ruled = ValidationError::with_rule("steps", "too large", "max_steps");
        assert_eq!(ruled.to_string(), "steps: too large (rule: max_steps)");
    }

    #[test]
    fn test_single_error() {
        let bounds = Bounds {
            low: 1.0,
            high: 0.5,
        };

        match bounds.validate_or_error() {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "high"),
            other => panic!("expected a single validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_errors() {
        let bounds = Bounds {
            low: -1.0,
            high: -2.0,
        };

        assert!(!bounds.is_valid());
        match bounds.validate_or_error() {
            Err(ConfigError::MultipleValidationErrors(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected multiple validation errors, got {other:?}"),
        }
    }

    #[test]
    fn test_valid() {
        let bounds = Bounds {
            low: 0.1,
            high: 4.0,
        };
        assert!(bounds.validate_or_error().is_ok());
    }
}
