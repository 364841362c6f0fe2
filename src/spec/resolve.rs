//! Spec resolution: inherit → derive → validate → peer-list append, per node.

use crate::config::ClusterConfig;
use crate::error::{GenError, Result};
use crate::spec::{Defaults, Derived, PeerListBuilder, RawSpec, ResolvedSpec, derive};

use std::collections::HashMap;

/// Resolve every node spec of `config` against `defaults`.
///
/// Nodes are processed in input order. The initial-cluster list is only
/// attached once every node has been validated, so on error nothing
/// partially built escapes.
pub fn resolve(config: ClusterConfig, defaults: &Defaults) -> Result<Vec<ResolvedSpec>> {
    let ClusterConfig {
        mut template,
        specs,
    } = config;

    if !template.name.is_empty() {
        return Err(GenError::TemplateHasName);
    }
    template.inherit(&defaults.to_spec());

    let mut peers = PeerListBuilder::with_capacity(specs.len());
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(specs.len());
    let mut staged: Vec<(RawSpec, Derived)> = Vec::with_capacity(specs.len());

    for (index, mut spec) in specs.into_iter().enumerate() {
        spec.inherit(&template);
        let derived = derive(&spec);
        validate(&spec, index, &mut seen)?;

        tracing::debug!(
            index,
            name = %spec.name,
            peer_url = %derived.advertise_peer_url,
            "resolved node spec"
        );
        peers.push(&spec.name, &derived.advertise_peer_url);
        staged.push((spec, derived));
    }

    let initial_cluster = peers.finish();
    Ok(staged
        .into_iter()
        .map(|(raw, derived)| ResolvedSpec {
            raw,
            derived,
            initial_cluster: initial_cluster.clone(),
        })
        .collect())
}

/// Required-field and uniqueness checks for the `index`-th spec.
fn validate(spec: &RawSpec, index: usize, seen: &mut HashMap<String, usize>) -> Result<()> {
    if spec.name.is_empty() {
        return Err(GenError::MissingName { index });
    }
    if spec.name.contains(['/', '\\']) || spec.name == "." || spec.name == ".." {
        return Err(GenError::InvalidName {
            name: spec.name.clone(),
            index,
        });
    }
    if let Some(&first) = seen.get(&spec.name) {
        return Err(GenError::DuplicateName {
            name: spec.name.clone(),
            first,
            second: index,
        });
    }
    seen.insert(spec.name.clone(), index);
    Ok(())
}
