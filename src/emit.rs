//! Manifest emission: render each resolved node and persist it.
//!
//! Layout: `<root>/<node name>/docker-compose.yaml`. Existing files are
//! truncated. A failure stops the run; manifests already written stay on disk.

use crate::error::{GenError, Result};
use crate::render::ManifestTemplate;
use crate::spec::ResolvedSpec;

use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "docker-compose.yaml";

/// Where rendered manifests go.
pub trait OutputSink {
    /// Persist `manifest` for `node` and return where it was written.
    fn persist(&mut self, node: &str, manifest: &[u8]) -> Result<PathBuf>;
}

/// Writes one directory per node under a fixed root.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirSink {
    fn persist(&mut self, node: &str, manifest: &[u8]) -> Result<PathBuf> {
        let dir = self.root.join(node);
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder
            .create(&dir)
            .map_err(|e| GenError::io("create_dir", &dir, e))?;

        let path = dir.join(MANIFEST_FILE);
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&path)
            .map_err(|e| GenError::io("open", &path, e))?;
        file.write_all(manifest)
            .map_err(|e| GenError::io("write", &path, e))?;

        Ok(path)
    }
}

/// Render and persist one manifest per node, in order. Stops at the first error.
pub fn emit_all<S: OutputSink>(
    specs: &[ResolvedSpec],
    template: &ManifestTemplate,
    sink: &mut S,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(specs.len());
    for spec in specs {
        let manifest = template.render(spec)?;
        let path = sink.persist(spec.name(), manifest.as_bytes())?;
        tracing::info!(node = spec.name(), path = %path.display(), "wrote manifest");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::spec::{BASELINE, resolve};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemorySink {
        files: BTreeMap<String, String>,
        fail_on: Option<String>,
    }

    impl OutputSink for MemorySink {
        fn persist(&mut self, node: &str, manifest: &[u8]) -> Result<PathBuf> {
            if self.fail_on.as_deref() == Some(node) {
                return Err(GenError::io(
                    "write",
                    node,
                    std::io::Error::other("disk full"),
                ));
            }
            self.files
                .insert(node.to_string(), String::from_utf8_lossy(manifest).into_owned());
            Ok(PathBuf::from(node))
        }
    }

    fn resolved(yaml: &str) -> Vec<ResolvedSpec> {
        resolve(parse_config(yaml, "test").unwrap(), &BASELINE).unwrap()
    }

    #[test]
    fn writes_one_manifest_per_node() {
        let specs = resolved("spec:\n  - name: a\n  - name: b\n    client_port: 2\n");
        let tmpl = ManifestTemplate::parse("t", "{{ name }} {{ client_port }} {{ join initial_cluster }}").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirSink::new(dir.path().join("compose"));

        let written = emit_all(&specs, &tmpl, &mut sink).unwrap();

        assert_eq!(
            written,
            vec![
                sink.root().join("a").join(MANIFEST_FILE),
                sink.root().join("b").join(MANIFEST_FILE),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(&written[1]).unwrap(),
            "b 2 a=https://a:2380,b=https://b:2380"
        );
    }

    #[test]
    fn existing_manifest_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirSink::new(dir.path());

        sink.persist("a", b"a much longer previous manifest").unwrap();
        let path = sink.persist("a", b"short").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "short");
    }

    #[cfg(unix)]
    #[test]
    fn output_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirSink::new(dir.path());
        let path = sink.persist("a", b"x").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn unwritable_root_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let mut sink = DirSink::new(&blocker);

        let err = sink.persist("a", b"x").unwrap_err();

        match err {
            GenError::Io { op, path, .. } => {
                assert_eq!(op, "create_dir");
                assert_eq!(path, blocker.join("a"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn first_failure_stops_remaining_nodes() {
        let specs = resolved("spec:\n  - name: a\n  - name: b\n  - name: c\n");
        let tmpl = ManifestTemplate::parse("t", "{{ name }}").unwrap();
        let mut sink = MemorySink {
            fail_on: Some("b".to_string()),
            ..MemorySink::default()
        };

        let err = emit_all(&specs, &tmpl, &mut sink).unwrap_err();

        assert!(matches!(err, GenError::Io { .. }));
        assert_eq!(sink.files.keys().collect::<Vec<_>>(), ["a"]);
    }
}
