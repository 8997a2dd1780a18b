// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use ondie_abstractions::OnDieFailureKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RevocationError {
    #[error("certificate {index} could not be parsed: {reason}")]
    MalformedCertificate { index: usize, reason: String },

    #[error("certificate {index} has a malformed CRL distribution points extension: {reason}")]
    MalformedDistributionPoints { index: usize, reason: String },

    #[error("certificate {index} has a CRL distribution point without a usable name: {reason}")]
    UnresolvableDistributionPoint { index: usize, reason: &'static str },

    #[error("CRL ({distribution_point}) not found in cache for cert: {issuer}")]
    CrlUnavailable {
        index: usize,
        distribution_point: String,
        issuer: String,
    },

    #[error("CRL ({distribution_point}) could not be parsed: {reason}")]
    MalformedCrl { distribution_point: String, reason: String },

    #[error("certificate {index} (serial {serial}) is revoked by CRL ({distribution_point})")]
    Revoked {
        index: usize,
        serial: String,
        distribution_point: String,
    },
}

impl RevocationError {
    pub fn kind(&self) -> OnDieFailureKind {
        match self {
            RevocationError::Revoked { .. } => OnDieFailureKind::Revoked,
            RevocationError::CrlUnavailable { .. } | RevocationError::UnresolvableDistributionPoint { .. } => {
                OnDieFailureKind::CrlUnavailable
            }
            RevocationError::MalformedCertificate { .. }
            | RevocationError::MalformedDistributionPoints { .. }
            | RevocationError::MalformedCrl { .. } => OnDieFailureKind::InternalError,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RevocationError::MalformedCertificate { .. } => "INVALID_CERTIFICATE",
            RevocationError::MalformedDistributionPoints { .. } => "INVALID_CRL_DISTRIBUTION_POINTS",
            RevocationError::UnresolvableDistributionPoint { .. } | RevocationError::CrlUnavailable { .. } => {
                "CRL_UNAVAILABLE"
            }
            RevocationError::MalformedCrl { .. } => "INVALID_CRL",
            RevocationError::Revoked { .. } => "CERT_REVOKED",
        }
    }
}
