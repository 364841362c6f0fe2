//! Node spec shapes.
//!
//! We keep two representations:
//! - RawSpec: one entry of the YAML input, every field possibly empty
//! - ResolvedSpec: a RawSpec after inheritance, plus derived network identity
//!   and the shared initial-cluster list
//!
//! An empty string means "unset" throughout, so `name: ""` and a missing
//! `name` behave the same.

use crate::spec::PeerList;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawSpec {
    #[serde(deserialize_with = "scalar")]
    pub name: String,
    #[serde(deserialize_with = "scalar")]
    pub domain: String,
    #[serde(deserialize_with = "scalar")]
    pub image: String,
    #[serde(deserialize_with = "scalar")]
    pub client_port: String,
    #[serde(deserialize_with = "scalar")]
    pub peer_port: String,
    #[serde(deserialize_with = "scalar")]
    pub listen_public_addr: String,
    #[serde(deserialize_with = "scalar")]
    pub listen_client_addr: String,
    #[serde(deserialize_with = "scalar")]
    pub listen_peer_addr: String,
    #[serde(deserialize_with = "scalar")]
    pub cluster_state: String,
    #[serde(deserialize_with = "scalar")]
    pub token: String,
    #[serde(deserialize_with = "scalar")]
    pub debug: String,
}

impl RawSpec {
    /// Fill every empty optional field from `src`. Never touches `name`, never
    /// overwrites a non-empty field, so applying it twice is a no-op.
    pub fn inherit(&mut self, src: &RawSpec) {
        fill(&mut self.domain, &src.domain);
        fill(&mut self.image, &src.image);
        fill(&mut self.client_port, &src.client_port);
        fill(&mut self.peer_port, &src.peer_port);
        fill(&mut self.listen_public_addr, &src.listen_public_addr);
        fill(&mut self.listen_client_addr, &src.listen_client_addr);
        fill(&mut self.listen_peer_addr, &src.listen_peer_addr);
        fill(&mut self.cluster_state, &src.cluster_state);
        fill(&mut self.token, &src.token);
        fill(&mut self.debug, &src.debug);
    }
}

fn fill(slot: &mut String, src: &str) {
    if slot.is_empty() {
        slot.push_str(src);
    }
}

/// Network identity computed from resolved raw fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derived {
    pub fqdn: String,
    pub listen_client_url: String,
    pub advertise_client_url: String,
    pub listen_peer_url: String,
    pub advertise_peer_url: String,
}

/// Fully resolved node, ready for rendering. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSpec {
    #[serde(flatten)]
    pub raw: RawSpec,
    #[serde(flatten)]
    pub derived: Derived,
    pub initial_cluster: PeerList,
}

impl ResolvedSpec {
    pub fn name(&self) -> &str {
        &self.raw.name
    }
}

/// Accept any YAML scalar and keep its source text; `null` means unset.
///
/// Ports, flags and tokens are commonly written unquoted (`client_port: 2379`,
/// `debug: true`, `token: 1.10`). The text is kept exactly as written, so
/// `0x95B` stays `0x95B` and `1.10` stays `1.10`.
fn scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(ScalarText)
}

struct ScalarText;

impl<'de> Visitor<'de> for ScalarText {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar value")
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_str(self)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    // Only reached when the source text is unavailable; decimal integers are
    // the one numeric form whose text can be reproduced.
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Err(E::custom(format!(
            "number {} cannot be kept as written; quote this value",
            v
        )))
    }
}
