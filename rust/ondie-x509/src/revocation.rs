// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Fail-closed revocation checking over a certificate chain.
//!
//! Policy:
//! - A certificate without a CRL Distribution Points extension has no
//!   revocation requirement and passes.
//! - A certificate with the extension needs every named CRL to be present in
//!   the cache. A missing CRL fails the whole chain: being unable to prove
//!   non-revocation is treated the same as being revoked.
//! - A certificate whose serial number is listed on any of its CRLs fails the
//!   whole chain. Entries count only when the CRL was issued by the
//!   certificate's issuer (issuer + serial, no indirect CRLs).
//!
//! A missing extension passes; a missing CRL fails.

use ondie_abstractions::CrlCache;
use tracing::{debug, error, warn};
use x509_parser::prelude::{X509Certificate, X509Name};

use crate::distribution_points::{crl_distribution_point_names, DistributionPointError, DistributionPointName};
use crate::RevocationError;

/// Summary of a successful revocation check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevocationReport {
    /// Certificates examined (the full chain on success).
    pub certificates_checked: usize,
    /// CRLs looked up and searched.
    pub crls_consulted: usize,
}

/// Check every certificate of `chain_der` (leaf first) against the CRLs
/// named in its distribution points.
///
/// Stops at the first failure. The cache is only read.
pub fn check_chain_revocation(
    chain_der: &[Vec<u8>],
    cache: &dyn CrlCache,
) -> Result<RevocationReport, RevocationError> {
    let mut report = RevocationReport::default();

    for (index, cert_der) in chain_der.iter().enumerate() {
        let (_, cert) = x509_parser::parse_x509_certificate(cert_der).map_err(|e| {
            RevocationError::MalformedCertificate {
                index,
                reason: e.to_string(),
            }
        })?;

        report.crls_consulted += check_certificate(index, &cert, cache)?;
        report.certificates_checked += 1;
    }

    Ok(report)
}

/// Returns the number of CRLs consulted for this certificate.
fn check_certificate(index: usize, cert: &X509Certificate<'_>, cache: &dyn CrlCache) -> Result<usize, RevocationError> {
    let names = match crl_distribution_point_names(cert) {
        Ok(Some(names)) => names,
        Ok(None) => {
            debug!(index, subject = %cert.subject(), "no CRL distribution points; nothing to check");
            return Ok(0);
        }
        Err(DistributionPointError::Malformed(reason)) => {
            return Err(RevocationError::MalformedDistributionPoints { index, reason })
        }
        Err(DistributionPointError::Unresolvable(reason)) => {
            error!(index, issuer = %cert.issuer(), reason, "CRL distribution point cannot be resolved");
            return Err(RevocationError::UnresolvableDistributionPoint { index, reason });
        }
    };

    for name in &names {
        let Some(crl_der) = cache.lookup(name.as_str()) else {
            error!("CRL ({}) not found in cache for cert: {}", name, cert.issuer());
            return Err(RevocationError::CrlUnavailable {
                index,
                distribution_point: name.to_string(),
                issuer: cert.issuer().to_string(),
            });
        };

        if is_listed(&crl_der, name, cert)? {
            let serial = cert.raw_serial_as_string();
            warn!(index, serial = %serial, distribution_point = %name, "certificate is revoked");
            return Err(RevocationError::Revoked {
                index,
                serial,
                distribution_point: name.to_string(),
            });
        }
    }

    debug!(index, crls = names.len(), "certificate not listed on any CRL");
    Ok(names.len())
}

fn is_listed(
    crl_der: &[u8],
    distribution_point: &DistributionPointName,
    cert: &X509Certificate<'_>,
) -> Result<bool, RevocationError> {
    let (_, crl) = x509_parser::parse_x509_crl(crl_der).map_err(|e| RevocationError::MalformedCrl {
        distribution_point: distribution_point.to_string(),
        reason: e.to_string(),
    })?;

    // Entries only speak for certificates issued by the CRL's issuer.
    if !same_name(crl.issuer(), cert.issuer()) {
        debug!(
            distribution_point = %distribution_point,
            crl_issuer = %crl.issuer(),
            cert_issuer = %cert.issuer(),
            "CRL issued by another CA; no entry applies"
        );
        return Ok(false);
    }

    let serial = &cert.tbs_certificate.serial;
    let listed = crl.iter_revoked_certificates().any(|entry| entry.serial() == serial);
    Ok(listed)
}

/// Byte-equal encodings, or equal RFC 4514 renderings when the two
/// encoders chose different string types.
fn same_name(a: &X509Name<'_>, b: &X509Name<'_>) -> bool {
    a.as_raw() == b.as_raw() || a.to_string() == b.to_string()
}
