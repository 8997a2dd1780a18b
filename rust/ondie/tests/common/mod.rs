// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Chain, CRL and signature builders for end-to-end validator tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ondie::CrlCache;
use p384::ecdsa::signature::Signer as _;
use p384::pkcs8::DecodePrivateKey as _;
use rcgen::{
    BasicConstraints, CertificateParams, CertificateRevocationListParams, CrlDistributionPoint, DnType, IsCa,
    KeyIdMethod, KeyPair, KeyUsagePurpose, RevocationReason, RevokedCertParams, SerialNumber,
};

pub(crate) const ROOT_CRL: &str = "http://crl.ondie.test/root.crl";
pub(crate) const LEAF_SERIAL: u64 = 0x4d2;

pub(crate) const TASK_INFO: [u8; 36] = [
    0x02, 0x00, 0x00, 0x00, 0x24, 0x00, 0x00, 0x00, 0x5a, 0x5a, 0x5a, 0x5a, //
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x3b, //
    0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4a, 0x4b,
];

pub(crate) struct TestCa {
    pub(crate) cert: rcgen::Certificate,
    pub(crate) key: KeyPair,
}

/// A device chain (leaf, root) plus the leaf's signing key.
pub(crate) struct DeviceChain {
    pub(crate) root: TestCa,
    pub(crate) chain: Vec<Vec<u8>>,
    pub(crate) signing_key: p384::ecdsa::SigningKey,
}

pub(crate) fn make_root() -> TestCa {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.distinguished_name.push(DnType::CommonName, "OnDie Test Root");
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
    params.serial_number = Some(SerialNumber::from(1u64));
    let cert = params.self_signed(&key).unwrap();
    TestCa { cert, key }
}

/// Leaf signed by a fresh root. `crl_uris` empty leaves out the CRL
/// Distribution Points extension.
pub(crate) fn make_device_chain(crl_uris: &[&str]) -> DeviceChain {
    let root = make_root();
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let mut params = CertificateParams::new(vec!["device.ondie.test".to_string()]).unwrap();
    params.distinguished_name.push(DnType::CommonName, "OnDie device");
    params.serial_number = Some(SerialNumber::from(LEAF_SERIAL));
    if !crl_uris.is_empty() {
        params.crl_distribution_points = vec![CrlDistributionPoint {
            uris: crl_uris.iter().map(|u| u.to_string()).collect(),
        }];
    }
    let leaf = params.signed_by(&key, &root.cert, &root.key).unwrap().der().to_vec();
    let signing_key = p384::ecdsa::SigningKey::from_pkcs8_der(&key.serialize_der()).unwrap();

    let chain = vec![leaf, root.cert.der().to_vec()];
    DeviceChain {
        root,
        chain,
        signing_key,
    }
}

/// A CRL signed by `issuer` listing `revoked_serials`.
pub(crate) fn make_crl(issuer: &TestCa, revoked_serials: &[u64]) -> Vec<u8> {
    let params = CertificateRevocationListParams {
        this_update: rcgen::date_time_ymd(2024, 1, 1),
        next_update: rcgen::date_time_ymd(2034, 1, 1),
        crl_number: SerialNumber::from(7u64),
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

/// `task_info || r || s` over `task_info || payload`.
pub(crate) fn sign_ondie(sk: &p384::ecdsa::SigningKey, task_info: &[u8; 36], payload: &[u8]) -> Vec<u8> {
    let mut signed = task_info.to_vec();
    signed.extend_from_slice(payload);
    let sig: p384::ecdsa::Signature = sk.sign(&signed);

    let mut blob = task_info.to_vec();
    blob.extend_from_slice(sig.to_bytes().as_slice());
    blob
}

/// Cache wrapper counting lookups.
pub(crate) struct CountingCache<C> {
    pub(crate) inner: C,
    pub(crate) lookups: AtomicUsize,
}

impl<C> CountingCache<C> {
    pub(crate) fn new(inner: C) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl<C: CrlCache> CrlCache for CountingCache<C> {
    fn lookup(&self, name: &str) -> Option<Arc<[u8]>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(name)
    }
}
