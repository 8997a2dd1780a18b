// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Revocation checking for OnDie certificate chains.

pub mod distribution_points;
pub mod error;
pub mod revocation;

pub use distribution_points::{crl_distribution_point_names, DistributionPointError, DistributionPointName};
pub use error::RevocationError;
pub use revocation::{check_chain_revocation, RevocationReport};
