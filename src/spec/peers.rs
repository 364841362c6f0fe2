//! Initial-cluster list construction.
//!
//! Two phases: a `PeerListBuilder` owned by the resolver collects one entry
//! per node in input order, then `finish` freezes it into a `PeerList` that
//! every resolved spec shares. Nothing can observe a partially built list.

use serde::{Serialize, Serializer};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct PeerListBuilder {
    entries: Vec<String>,
}

impl PeerListBuilder {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    /// Append `name=advertise_peer_url`.
    pub fn push(&mut self, name: &str, advertise_peer_url: &str) {
        self.entries.push(format!("{}={}", name, advertise_peer_url));
    }

    pub fn finish(self) -> PeerList {
        PeerList(self.entries.into())
    }
}

/// Frozen, cheaply cloneable initial-cluster list. Clones share storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerList(Arc<[String]>);

impl PeerList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined form, as etcd expects in `--initial-cluster`.
    pub fn join(&self) -> String {
        self.0.join(",")
    }

    pub fn shares_storage_with(&self, other: &PeerList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Serialize for PeerList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}
