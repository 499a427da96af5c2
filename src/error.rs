//! Error types for the intake wizard.

use crate::brief::Field;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors raised by the wizard controller in response to user actions.
///
/// None of these are fatal: the wizard stays interactive after every one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Please complete the required fields: {}", labels(.missing))]
    MissingFields { missing: Vec<Field> },

    #[error("Please agree to the scope terms before submitting")]
    ScopeNotAccepted,

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("This brief has already been submitted")]
    AlreadyConfirmed,

    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: Field, value: String },

    #[error("Submission failed: {0}")]
    Rejected(String),
}

/// Hard backend failures. Soft failures never surface as errors; they turn
/// into mock-mode successes inside the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Backend responded {status}: {body}")]
    Status { status: u16, body: String },
}

fn labels(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
