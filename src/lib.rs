//! Per-node docker-compose manifests for an etcd cluster.
//!
//! Pipeline: load config → resolve every node (defaults, FQDN/URLs, shared
//! initial-cluster list) → render and write one manifest per node.

pub mod config;
pub mod emit;
pub mod error;
pub mod render;
pub mod spec;

pub use error::{GenError, Result};

use crate::config::ClusterConfig;
use crate::emit::OutputSink;
use crate::render::ManifestTemplate;
use crate::spec::Defaults;
use std::path::PathBuf;

/// Resolve the whole batch, then emit. Resolution finishes for every node
/// before the first manifest is rendered, so an invalid node means no output.
pub fn generate<S: OutputSink>(
    config: ClusterConfig,
    defaults: &Defaults,
    template: &ManifestTemplate,
    sink: &mut S,
) -> Result<Vec<PathBuf>> {
    let specs = spec::resolve(config, defaults)?;
    if specs.is_empty() {
        tracing::warn!("config has no node specs; nothing to emit");
    }
    emit::emit_all(&specs, template, sink)
}
