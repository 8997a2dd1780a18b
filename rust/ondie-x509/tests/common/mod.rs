// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Certificate and CRL builders for revocation tests.

#![allow(dead_code)]

use rcgen::{
    BasicConstraints, CertificateParams, CertificateRevocationListParams, CrlDistributionPoint, CustomExtension, DnType, IsCa,
    KeyIdMethod, KeyPair, KeyUsagePurpose, RevocationReason, RevokedCertParams, SerialNumber,
};

pub(crate) const ROOT_CRL: &str = "http://crl.ondie.test/root.crl";
pub(crate) const ICA_CRL: &str = "http://crl.ondie.test/ica.crl";

/// A CA able to sign certificates and CRLs.
pub(crate) struct TestCa {
    pub(crate) cert: rcgen::Certificate,
    pub(crate) key: KeyPair,
}

impl TestCa {
    pub(crate) fn der(&self) -> Vec<u8> {
        self.cert.der().to_vec()
    }
}

fn ca_params(name: &str, serial: u64, crl_uris: &[&str]) -> CertificateParams {
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.distinguished_name.push(DnType::CommonName, name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
    params.serial_number = Some(SerialNumber::from(serial));
    params.crl_distribution_points = distribution_points(crl_uris);
    params
}

fn distribution_points(crl_uris: &[&str]) -> Vec<CrlDistributionPoint> {
    if crl_uris.is_empty() {
        return Vec::new();
    }
    vec![CrlDistributionPoint {
        uris: crl_uris.iter().map(|u| u.to_string()).collect(),
    }]
}

pub(crate) fn make_root(name: &str) -> TestCa {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let cert = ca_params(name, 1, &[]).self_signed(&key).unwrap();
    TestCa { cert, key }
}

pub(crate) fn make_intermediate(issuer: &TestCa, name: &str, serial: u64, crl_uris: &[&str]) -> TestCa {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let cert = ca_params(name, serial, crl_uris)
        .signed_by(&key, &issuer.cert, &issuer.key)
        .unwrap();
    TestCa { cert, key }
}

/// A leaf with the given serial and distribution points (one point holding
/// all URIs). An empty `crl_uris` leaves the extension out entirely.
pub(crate) fn make_leaf(issuer: &TestCa, serial: u64, crl_uris: &[&str]) -> Vec<u8> {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let mut params = CertificateParams::new(vec!["device.ondie.test".to_string()]).unwrap();
    params.distinguished_name.push(DnType::CommonName, "OnDie device");
    params.serial_number = Some(SerialNumber::from(serial));
    params.crl_distribution_points = distribution_points(crl_uris);
    params.signed_by(&key, &issuer.cert, &issuer.key).unwrap().der().to_vec()
}

/// A leaf with one distribution point per URI.
pub(crate) fn make_leaf_with_separate_points(issuer: &TestCa, serial: u64, crl_uris: &[&str]) -> Vec<u8> {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let mut params = CertificateParams::new(vec!["device.ondie.test".to_string()]).unwrap();
    params.serial_number = Some(SerialNumber::from(serial));
    params.crl_distribution_points = crl_uris
        .iter()
        .map(|u| CrlDistributionPoint { uris: vec![u.to_string()] })
        .collect();
    params.signed_by(&key, &issuer.cert, &issuer.key).unwrap().der().to_vec()
}

/// A leaf whose CRL Distribution Points extension value is `extension_der`
/// verbatim, for encodings the builder cannot produce.
pub(crate) fn make_leaf_with_raw_distribution_points(issuer: &TestCa, serial: u64, extension_der: Vec<u8>) -> Vec<u8> {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let mut params = CertificateParams::new(vec!["device.ondie.test".to_string()]).unwrap();
    params.serial_number = Some(SerialNumber::from(serial));
    params.custom_extensions = vec![CustomExtension::from_oid_content(&[2, 5, 29, 31], extension_der)];
    params.signed_by(&key, &issuer.cert, &issuer.key).unwrap().der().to_vec()
}

/// A CRL signed by `issuer` listing `revoked_serials`.
pub(crate) fn make_crl(issuer: &TestCa, revoked_serials: &[u64]) -> Vec<u8> {
    let params = CertificateRevocationListParams {
        this_update: rcgen::date_time_ymd(2024, 1, 1),
        next_update: rcgen::date_time_ymd(2034, 1, 1),
        crl_number: SerialNumber::from(1u64),
        issuing_distribution_point: None,
        revoked_certs: revoked_serials
            .iter()
            .map(|serial| RevokedCertParams {
                serial_number: SerialNumber::from(*serial),
                revocation_time: rcgen::date_time_ymd(2024, 6, 1),
                reason_code: Some(RevocationReason::KeyCompromise),
                invalidity_date: None,
            })
            .collect(),
        key_identifier_method: KeyIdMethod::Sha256,
    };
    params.signed_by(&issuer.cert, &issuer.key).unwrap().der().to_vec()
}
