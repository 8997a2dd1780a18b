// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! CRL cache collaborator.
//!
//! Revocation checking never fetches anything. It asks a cache, keyed by the
//! distribution point name found in the certificate, for the encoded CRL.
//! How the cache gets populated is the embedder's business.

use std::collections::HashMap;
use std::sync::Arc;

/// Read-only access to encoded CRLs keyed by distribution point name.
///
/// Contract:
/// - Return `Some(bytes)` with the DER-encoded CRL when the name is cached.
/// - Return `None` when nothing is cached for the name. The revocation checker
///   treats this as a failure for any certificate that requires the CRL.
///
/// Implementations must be safe for concurrent reads; the validator may be
/// shared across threads.
pub trait CrlCache: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Arc<[u8]>>;
}

impl<T: CrlCache + ?Sized> CrlCache for Arc<T> {
    fn lookup(&self, name: &str) -> Option<Arc<[u8]>> {
        (**self).lookup(name)
    }
}

impl<T: CrlCache + ?Sized> CrlCache for &T {
    fn lookup(&self, name: &str) -> Option<Arc<[u8]>> {
        (**self).lookup(name)
    }
}

/// A `HashMap`-backed cache, populated up front.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCrlCache {
    entries: HashMap<String, Arc<[u8]>>,
}

impl InMemoryCrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the encoded CRL for `name`.
    pub fn insert(&mut self, name: impl Into<String>, crl_der: impl Into<Arc<[u8]>>) {
        self.entries.insert(name.into(), crl_der.into());
    }

    /// Builder form of [`InMemoryCrlCache::insert`].
    pub fn with_entry(mut self, name: impl Into<String>, crl_der: impl Into<Arc<[u8]>>) -> Self {
        self.insert(name, crl_der);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CrlCache for InMemoryCrlCache {
    fn lookup(&self, name: &str) -> Option<Arc<[u8]>> {
        self.entries.get(name).cloned()
    }
}
