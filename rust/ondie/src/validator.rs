// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;
use std::sync::Arc;

use ondie_abstractions::{CrlCache, ValidationResult};
use ondie_validation::{verify_p384_sha384_with_certificate, RawSignature};
use ondie_x509::{check_chain_revocation, RevocationReport};
use tracing::debug;

use crate::{OnDieError, OnDieValidatorSettings};

/// Validator name reported in every [`ValidationResult`].
pub const ONDIE_VALIDATOR_NAME: &str = "OnDieSignature";

/// Validates OnDie signatures against a leaf-first certificate chain.
///
/// Holds no mutable state: one instance can serve concurrent validations as
/// long as the cache supports concurrent reads (which [`CrlCache`] requires).
#[derive(Clone)]
pub struct OnDieSignatureValidator {
    cache: Arc<dyn CrlCache>,
    settings: OnDieValidatorSettings,
}

impl OnDieSignatureValidator {
    pub fn new(cache: Arc<dyn CrlCache>, settings: OnDieValidatorSettings) -> Self {
        Self { cache, settings }
    }

    pub fn settings(&self) -> &OnDieValidatorSettings {
        &self.settings
    }

    /// `true` only if the chain passes revocation (when enabled) and the
    /// signature verifies. Every failure, whatever its cause, is `false`.
    pub fn validate(&self, chain_der: &[Vec<u8>], signed_data: &[u8], signature: &[u8]) -> bool {
        self.validate_detailed(chain_der, signed_data, signature).is_valid
    }

    /// Like [`OnDieSignatureValidator::validate`], keeping the reason for a
    /// rejection and diagnostic metadata for an acceptance.
    pub fn validate_detailed(&self, chain_der: &[Vec<u8>], signed_data: &[u8], signature: &[u8]) -> ValidationResult {
        match self.try_validate(chain_der, signed_data, signature) {
            Ok(revocation) => ValidationResult::success(ONDIE_VALIDATOR_NAME, success_metadata(revocation)),
            Err(e) => {
                debug!(kind = %e.kind(), code = e.error_code(), "OnDie signature rejected: {e}");
                ValidationResult::failure_message(
                    ONDIE_VALIDATOR_NAME,
                    e.kind(),
                    e.to_string(),
                    Some(e.error_code().to_string()),
                )
            }
        }
    }

    /// The pipeline itself. Returns the revocation report, or `None` when
    /// revocation checking is disabled.
    pub fn try_validate(
        &self,
        chain_der: &[Vec<u8>],
        signed_data: &[u8],
        signature: &[u8],
    ) -> Result<Option<RevocationReport>, OnDieError> {
        // Revocation gate first: a revoked or unprovable chain is rejected
        // without looking at the signature.
        let revocation = if self.settings.check_revocations {
            Some(check_chain_revocation(chain_der, self.cache.as_ref())?)
        } else {
            debug!("revocation checking disabled");
            None
        };

        let raw = RawSignature::parse(signature)?;
        let leaf = chain_der.first().ok_or(OnDieError::EmptyChain)?;

        let adjusted = raw.signed_data(signed_data);
        let der = raw.to_der();
        verify_p384_sha384_with_certificate(leaf, &adjusted, &der)?;

        Ok(revocation)
    }
}

fn success_metadata(revocation: Option<RevocationReport>) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    match revocation {
        Some(report) => {
            metadata.insert("ondie.revocation".to_string(), "checked".to_string());
            metadata.insert(
                "ondie.certificates_checked".to_string(),
                report.certificates_checked.to_string(),
            );
            metadata.insert("ondie.crls_consulted".to_string(), report.crls_consulted.to_string());
        }
        None => {
            metadata.insert("ondie.revocation".to_string(), "skipped".to_string());
        }
    }
    metadata
}
