//! Network identity synthesis: FQDN and the four listen/advertise URLs.

use crate::spec::{Derived, RawSpec};

/// Scheme for every generated URL; members always talk TLS.
pub const URL_SCHEME: &str = "https";

/// `name` joined with `domain`.
///
/// A domain starting with '.' is appended as-is, anything else gets a '.'
/// separator, and an empty domain leaves the bare name.
pub fn fqdn(name: &str, domain: &str) -> String {
    if domain.is_empty() {
        name.to_string()
    } else if domain.starts_with('.') {
        format!("{}{}", name, domain)
    } else {
        format!("{}.{}", name, domain)
    }
}

pub fn url(host: &str, port: &str) -> String {
    format!("{}://{}:{}", URL_SCHEME, host, port)
}

/// Compute derived fields. `spec` must already be fully inherited: listen
/// addresses and ports are read as they are.
pub fn derive(spec: &RawSpec) -> Derived {
    let fqdn = fqdn(&spec.name, &spec.domain);
    Derived {
        listen_client_url: url(&spec.listen_client_addr, &spec.client_port),
        advertise_client_url: url(&fqdn, &spec.client_port),
        listen_peer_url: url(&spec.listen_peer_addr, &spec.peer_port),
        advertise_peer_url: url(&fqdn, &spec.peer_port),
        fqdn,
    }
}
