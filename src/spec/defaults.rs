//! Baseline values used when neither a node nor the template sets a field.

use crate::spec::RawSpec;

/// Fallback for every optional field that has a meaningful default.
///
/// `domain` and `token` have no baseline: an empty value is valid for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub image: &'static str,
    pub client_port: &'static str,
    pub peer_port: &'static str,
    pub listen_public_addr: &'static str,
    pub listen_client_addr: &'static str,
    pub listen_peer_addr: &'static str,
    pub cluster_state: &'static str,
    pub debug: &'static str,
}

pub const BASELINE: Defaults = Defaults {
    image: "quay.io/coreos/etcd:latest",
    client_port: "2379",
    peer_port: "2380",
    listen_public_addr: "0.0.0.0",
    listen_client_addr: "0.0.0.0",
    listen_peer_addr: "0.0.0.0",
    cluster_state: "new",
    debug: "false",
};

impl Defaults {
    /// View the table as a partial spec so it can act as an inheritance source.
    pub fn to_spec(&self) -> RawSpec {
        RawSpec {
            image: self.image.to_string(),
            client_port: self.client_port.to_string(),
            peer_port: self.peer_port.to_string(),
            listen_public_addr: self.listen_public_addr.to_string(),
            listen_client_addr: self.listen_client_addr.to_string(),
            listen_peer_addr: self.listen_peer_addr.to_string(),
            cluster_state: self.cluster_state.to_string(),
            debug: self.debug.to_string(),
            ..RawSpec::default()
        }
    }
}
