// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared interfaces and datatypes for the OnDie validation crates.
//!
//! This crate exists to prevent circular dependencies across:
//! - the high-level validator (`ondie`)
//! - the signature path (`ondie-validation`) and the revocation path (`ondie-x509`)
//!
//! It is intentionally kept small and stable.

pub mod crl_cache;
pub mod validation_result;

pub use crl_cache::{CrlCache, InMemoryCrlCache};
pub use validation_result::{OnDieFailureKind, ValidationFailure, ValidationResult};
