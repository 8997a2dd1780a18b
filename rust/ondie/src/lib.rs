// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! OnDie signature validation facade.
//!
//! This crate is the primary entry point. A validation is a linear pipeline
//! with two gates:
//! 1) revocation of every certificate in the chain (unless disabled), then
//! 2) ECDSA P-384 / SHA-384 verification of the raw OnDie signature under the
//!    leaf certificate's key.
//!
//! Either gate can reject. Nothing is retried and nothing panics; every
//! failure is reported as a rejected [`ValidationResult`].

mod error;
mod settings;
mod validator;

pub use error::OnDieError;
pub use settings::{OnDieValidatorSettings, SettingsError, CHECK_REVOCATIONS_ENV};
pub use validator::{OnDieSignatureValidator, ONDIE_VALIDATOR_NAME};

pub use ondie_abstractions::{CrlCache, InMemoryCrlCache, OnDieFailureKind, ValidationFailure, ValidationResult};
pub use ondie_validation::{DerSignature, RawSignature, SignatureError, MIN_SIGNATURE_LEN, SCALAR_LEN, TASK_INFO_LEN};
pub use ondie_x509::{RevocationError, RevocationReport};
