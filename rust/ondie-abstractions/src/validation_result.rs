// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Validation result types.
//!
//! Validation never raises: every outcome is a structured result. A rejected
//! result carries the failure kind, a human-readable message and a stable
//! error code so callers can tell a revoked certificate from a bad signature
//! without scraping logs.

use std::collections::HashMap;
use std::fmt;

/// Caller-facing classification of a rejected validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OnDieFailureKind {
    /// The raw signature is shorter than task-info + R + S.
    TooShort,
    /// A certificate in the chain is listed on its CRL.
    Revoked,
    /// A CRL required by a distribution point could not be resolved.
    CrlUnavailable,
    /// The signature does not match the payload under the leaf key.
    SignatureMismatch,
    /// Malformed inputs or cryptographic plumbing failures.
    InternalError,
}

impl OnDieFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnDieFailureKind::TooShort => "TooShort",
            OnDieFailureKind::Revoked => "Revoked",
            OnDieFailureKind::CrlUnavailable => "CrlUnavailable",
            OnDieFailureKind::SignatureMismatch => "SignatureMismatch",
            OnDieFailureKind::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for OnDieFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Classification of the failure.
    pub kind: OnDieFailureKind,
    /// Human-readable explanation of the failure.
    pub message: String,
    /// Optional machine-readable error code.
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Overall validity.
    pub is_valid: bool,
    /// Name of the validator producing this result.
    pub validator_name: String,
    /// A list of failures explaining why validation failed.
    pub failures: Vec<ValidationFailure>,
    /// Extra metadata for callers (e.g., diagnostic information).
    pub metadata: HashMap<String, String>,
}

impl ValidationResult {
    /// Construct a success result.
    pub fn success(validator_name: impl Into<String>, metadata: HashMap<String, String>) -> Self {
        Self {
            is_valid: true,
            validator_name: validator_name.into(),
            failures: Vec::new(),
            metadata,
        }
    }

    /// Construct a failure result with one or more failures.
    pub fn failure(validator_name: impl Into<String>, failures: Vec<ValidationFailure>) -> Self {
        Self {
            is_valid: false,
            validator_name: validator_name.into(),
            failures,
            metadata: HashMap::new(),
        }
    }

    /// Construct a failure result from a single kind + message + optional error code.
    pub fn failure_message(
        validator_name: impl Into<String>,
        kind: OnDieFailureKind,
        message: impl Into<String>,
        error_code: Option<String>,
    ) -> Self {
        Self::failure(
            validator_name,
            vec![ValidationFailure {
                kind,
                message: message.into(),
                error_code,
            }],
        )
    }

    /// Kind of the first recorded failure, if any.
    pub fn failure_kind(&self) -> Option<OnDieFailureKind> {
        self.failures.first().map(|f| f.kind)
    }

    /// Error code of the first recorded failure, if any.
    pub fn error_code(&self) -> Option<&str> {
        self.failures.first().and_then(|f| f.error_code.as_deref())
    }
}
