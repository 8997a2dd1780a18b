// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ECDSA P-384 / SHA-384 verification of OnDie signatures.
//!
//! Public key inputs follow the same convention as the rest of the
//! workspace: either a DER X.509 certificate (its SubjectPublicKeyInfo is
//! used) or a DER SubjectPublicKeyInfo.

use p384::elliptic_curve::sec1::ToEncodedPoint as _;
use p384::pkcs8::DecodePublicKey as _;
use sha2::{Digest as _, Sha384};
use signature::DigestVerifier as _;

use crate::der::DerSignature;
use crate::raw_signature::RawSignature;
use crate::{SignatureError, SCALAR_LEN};

/// Verify a raw OnDie signature blob over `payload`.
///
/// Splits the blob, rebuilds `task-info || payload`, converts R/S to DER and
/// verifies under `public_key_der`.
pub fn verify_ondie_signature(
    public_key_der: &[u8],
    payload: &[u8],
    signature: &[u8],
) -> Result<(), SignatureError> {
    let raw = RawSignature::parse(signature)?;
    let signed_data = raw.signed_data(payload);
    let der = raw.to_der();
    verify_p384_sha384(public_key_der, &signed_data, &der)
}

/// Verify a DER ECDSA signature over `signed_data` with SHA-384 on P-384.
///
/// `public_key_der` may be a certificate or a bare SubjectPublicKeyInfo:
/// bytes that do not parse as a certificate are taken as an SPKI. Use
/// [`verify_p384_sha384_with_certificate`] when the key must come from a
/// certificate.
pub fn verify_p384_sha384(
    public_key_der: &[u8],
    signed_data: &[u8],
    signature: &DerSignature,
) -> Result<(), SignatureError> {
    let spki = extract_spki_der_from_der_key_or_cert(public_key_der)?;
    verify_with_spki(&spki, signed_data, signature)
}

/// Like [`verify_p384_sha384`], but `certificate_der` must be a DER X.509
/// certificate; a bare public key is [`SignatureError::MalformedCertificate`].
pub fn verify_p384_sha384_with_certificate(
    certificate_der: &[u8],
    signed_data: &[u8],
    signature: &DerSignature,
) -> Result<(), SignatureError> {
    let (_, cert) = x509_parser::parse_x509_certificate(certificate_der)
        .map_err(|e| SignatureError::MalformedCertificate(e.to_string()))?;
    verify_with_spki(cert.tbs_certificate.subject_pki.raw, signed_data, signature)
}

fn verify_with_spki(spki: &[u8], signed_data: &[u8], signature: &DerSignature) -> Result<(), SignatureError> {
    let vk = p384_verifying_key(spki)?;

    // Go through fixed-width scalars: a scalar whose first byte is zero is
    // written as a non-minimal INTEGER, which strict DER parsers refuse.
    let (r, s) = signature.scalars()?;
    let mut rs = [0u8; 2 * SCALAR_LEN];
    rs[..SCALAR_LEN].copy_from_slice(&r);
    rs[SCALAR_LEN..].copy_from_slice(&s);
    let sig = p384::ecdsa::Signature::from_slice(&rs).map_err(|_| SignatureError::InvalidScalars)?;

    let digest = Sha384::new_with_prefix(signed_data);
    vk.verify_digest(digest, &sig).map_err(|_| SignatureError::Mismatch)
}

fn p384_verifying_key(spki: &[u8]) -> Result<p384::ecdsa::VerifyingKey, SignatureError> {
    let pk = p384::PublicKey::from_public_key_der(spki)
        .map_err(|e| SignatureError::UnsupportedPublicKey(format!("bad P-384 public key: {e}")))?;

    // Convert to SEC1 encoded point bytes expected by the ECDSA verifying key.
    let ep = pk.to_encoded_point(false);
    p384::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes())
        .map_err(|e| SignatureError::UnsupportedPublicKey(format!("bad P-384 public key: {e}")))
}

/// Normalize a DER certificate or DER SPKI into SPKI DER.
fn extract_spki_der_from_der_key_or_cert(der: &[u8]) -> Result<Vec<u8>, SignatureError> {
    if der.is_empty() {
        return Err(SignatureError::MalformedCertificate("empty certificate bytes".to_string()));
    }
    if let Ok((_, cert)) = x509_parser::parse_x509_certificate(der) {
        // `raw` is the DER encoding of the SPKI structure inside the certificate.
        return Ok(cert.tbs_certificate.subject_pki.raw.to_vec());
    }
    // Assume the input is already SPKI DER.
    Ok(der.to_vec())
}
