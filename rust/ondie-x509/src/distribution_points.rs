// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! CRL Distribution Points (RFC 5280 section 4.2.1.13).
//!
//! Each general name inside a distribution point becomes a cache key. The
//! key for a URI name is the URI text, which is how CRL caches are normally
//! populated.

use std::fmt;

use x509_parser::extensions::{DistributionPointName as X509DistributionPointName, GeneralName, ParsedExtension};
use x509_parser::oid_registry::OID_X509_EXT_CRL_DISTRIBUTION_POINTS;
use x509_parser::prelude::X509Certificate;

/// A general name taken from a distribution point, in cache-key form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistributionPointName(String);

impl DistributionPointName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistributionPointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&GeneralName<'_>> for DistributionPointName {
    fn from(name: &GeneralName<'_>) -> Self {
        let key = match name {
            GeneralName::URI(uri) => uri.to_string(),
            GeneralName::DirectoryName(dn) => dn.to_string(),
            GeneralName::DNSName(s) | GeneralName::RFC822Name(s) => s.to_string(),
            other => format!("{other:?}"),
        };
        Self(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionPointError {
    /// The extension is present but could not be decoded.
    #[error("{0}")]
    Malformed(String),
    /// A distribution point exists but names nothing that can be looked up.
    #[error("{0}")]
    Unresolvable(&'static str),
}

/// Names listed by the certificate's CRL Distribution Points extension.
///
/// Returns `Ok(None)` when the extension is absent: such a certificate has no
/// revocation requirement. A present extension always yields at least one
/// name or an error, so a certificate that asks for revocation checking can
/// never pass without a CRL.
pub fn crl_distribution_point_names(
    cert: &X509Certificate<'_>,
) -> Result<Option<Vec<DistributionPointName>>, DistributionPointError> {
    let Some(ext) = cert
        .extensions()
        .iter()
        .find(|ext| ext.oid == OID_X509_EXT_CRL_DISTRIBUTION_POINTS)
    else {
        return Ok(None);
    };

    let points = match ext.parsed_extension() {
        ParsedExtension::CRLDistributionPoints(points) => points,
        ParsedExtension::ParseError { error } => return Err(DistributionPointError::Malformed(error.to_string())),
        other => {
            return Err(DistributionPointError::Malformed(format!(
                "unexpected extension content: {other:?}"
            )))
        }
    };

    if points.points.is_empty() {
        return Err(DistributionPointError::Unresolvable("extension lists no distribution points"));
    }

    let mut names = Vec::new();
    for point in points.points.iter() {
        match &point.distribution_point {
            Some(X509DistributionPointName::FullName(general_names)) => {
                if general_names.is_empty() {
                    return Err(DistributionPointError::Unresolvable("empty fullName"));
                }
                names.extend(general_names.iter().map(DistributionPointName::from));
            }
            Some(X509DistributionPointName::NameRelativeToCRLIssuer(_)) => {
                return Err(DistributionPointError::Unresolvable("name relative to CRL issuer"));
            }
            None => return Err(DistributionPointError::Unresolvable("no distribution point name")),
        }
    }

    Ok(Some(names))
}
