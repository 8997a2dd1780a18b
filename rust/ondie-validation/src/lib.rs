// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Signature path for OnDie attestation signatures.
//!
//! An OnDie signature blob is `task-info (36) | r (48) | s (48) | ...`. The
//! signed bytes are `task-info || payload`, and the signature is ECDSA P-384
//! over SHA-384. This crate splits the blob, rebuilds the signed bytes,
//! converts the raw scalars to DER and verifies against the leaf key.

pub mod der;
pub mod error;
pub mod raw_signature;
pub mod signed_data;
pub mod verifier;

pub use der::{encode_der_signature, DerSignature, INTEGER_TAG, SEQUENCE_TAG};
pub use error::SignatureError;
pub use raw_signature::{RawSignature, MIN_SIGNATURE_LEN, SCALAR_LEN, TASK_INFO_LEN};
pub use signed_data::adjust_signed_data;
pub use verifier::{verify_ondie_signature, verify_p384_sha384, verify_p384_sha384_with_certificate};
