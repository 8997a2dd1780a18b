// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use ondie_abstractions::OnDieFailureKind;
use ondie_validation::SignatureError;
use ondie_x509::RevocationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnDieError {
    #[error(transparent)]
    Revocation(#[from] RevocationError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("certificate chain is empty; no leaf key to verify with")]
    EmptyChain,
}

impl OnDieError {
    pub fn kind(&self) -> OnDieFailureKind {
        match self {
            OnDieError::Revocation(e) => e.kind(),
            OnDieError::Signature(e) => e.kind(),
            OnDieError::EmptyChain => OnDieFailureKind::InternalError,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OnDieError::Revocation(e) => e.error_code(),
            OnDieError::Signature(e) => e.error_code(),
            OnDieError::EmptyChain => "EMPTY_CHAIN",
        }
    }
}
