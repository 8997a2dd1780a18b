// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use ondie_abstractions::OnDieFailureKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature is {actual} bytes; at least {required} are required")]
    TooShort { actual: usize, required: usize },

    #[error("{field} is {actual} bytes; expected {expected}")]
    FieldWidth {
        field: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("malformed DER signature: {0}")]
    MalformedDer(&'static str),

    #[error("leaf certificate could not be parsed: {0}")]
    MalformedCertificate(String),

    #[error("unsupported public key: {0}")]
    UnsupportedPublicKey(String),

    #[error("signature scalars are out of range for P-384")]
    InvalidScalars,

    #[error("signature verification failed")]
    Mismatch,
}

impl SignatureError {
    pub fn kind(&self) -> OnDieFailureKind {
        match self {
            SignatureError::TooShort { .. } => OnDieFailureKind::TooShort,
            SignatureError::InvalidScalars | SignatureError::Mismatch => OnDieFailureKind::SignatureMismatch,
            SignatureError::FieldWidth { .. }
            | SignatureError::MalformedDer(_)
            | SignatureError::MalformedCertificate(_)
            | SignatureError::UnsupportedPublicKey(_) => OnDieFailureKind::InternalError,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SignatureError::TooShort { .. } => "SIGNATURE_TOO_SHORT",
            SignatureError::FieldWidth { .. } | SignatureError::MalformedDer(_) => "INVALID_SIGNATURE_ENCODING",
            SignatureError::MalformedCertificate(_) => "INVALID_CERTIFICATE",
            SignatureError::UnsupportedPublicKey(_) => "INVALID_PUBLIC_KEY",
            SignatureError::InvalidScalars | SignatureError::Mismatch => "BAD_SIGNATURE",
        }
    }
}
