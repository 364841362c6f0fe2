//! Cluster config loading.
//!
//! YAML shape:
//! template:            # optional, shared defaults; must not set `name`
//!   domain: example.com
//!   token: my-cluster
//! spec:                # ordered; one output manifest per entry
//!   - name: etcd0
//!   - name: etcd1
//!     client_port: 12379

use crate::error::{GenError, Result};
use crate::spec::RawSpec;

use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClusterConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: RawSpec,

    #[serde(default, rename = "spec", deserialize_with = "null_as_default")]
    pub specs: Vec<RawSpec>,
}

/// `template:` with nothing after it parses as null; treat it as absent.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a config document. Blank input and a null document (`~`) are an
/// empty config.
pub fn parse_config(text: &str, source_name: &str) -> Result<ClusterConfig> {
    if text.trim().is_empty() {
        tracing::warn!("{} is empty", source_name);
        return Ok(ClusterConfig::default());
    }
    let config: Option<ClusterConfig> =
        serde_yaml::from_str(text).map_err(|source| GenError::Parse {
            source_name: source_name.to_string(),
            source,
        })?;
    Ok(config.unwrap_or_else(|| {
        tracing::warn!("{} holds a null document", source_name);
        ClusterConfig::default()
    }))
}

pub fn read_config<R: Read>(mut reader: R, source_name: &str) -> Result<ClusterConfig> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| GenError::Input {
            source_name: source_name.to_string(),
            source,
        })?;
    parse_config(&text, source_name)
}

/// Load from `path`, or from stdin when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ClusterConfig> {
    match path {
        Some(path) => {
            let name = path.display().to_string();
            let file = std::fs::File::open(path).map_err(|source| GenError::Input {
                source_name: name.clone(),
                source,
            })?;
            read_config(file, &name)
        }
        None => read_config(std::io::stdin().lock(), "stdin"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_template_and_ordered_specs() {
        let cfg = parse_config(
            "template:\n  image: X\n  client_port: \"1\"\nspec:\n  - name: a\n  - name: b\n    client_port: 2\n",
            "test",
        )
        .unwrap();

        assert_eq!(cfg.template.image, "X");
        assert_eq!(cfg.template.client_port, "1");
        let names: Vec<&str> = cfg.specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(cfg.specs[1].client_port, "2");
    }

    #[test]
    fn missing_or_null_sections_default() {
        let cfg = parse_config("template:\nspec:\n", "test").unwrap();
        assert_eq!(cfg, ClusterConfig::default());

        let cfg = parse_config("spec:\n  - name: a\n", "test").unwrap();
        assert_eq!(cfg.template, RawSpec::default());
        assert_eq!(cfg.specs.len(), 1);
    }

    #[test]
    fn blank_input_is_empty_config() {
        assert_eq!(parse_config("  \n", "test").unwrap(), ClusterConfig::default());
    }

    #[test]
    fn null_document_is_empty_config() {
        assert_eq!(parse_config("~\n", "test").unwrap(), ClusterConfig::default());
        assert_eq!(parse_config("null", "test").unwrap(), ClusterConfig::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = parse_config("spec:\n  - name: a\n    color: blue\n", "test").unwrap();
        assert_eq!(cfg.specs[0].name, "a");
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = parse_config("spec: [name: a\n", "stdin").unwrap_err();
        assert!(matches!(err, GenError::Parse { ref source_name, .. } if source_name == "stdin"));
    }

    #[test]
    fn unreadable_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.yaml"))).unwrap_err();
        assert!(matches!(err, GenError::Input { .. }));
    }
}
