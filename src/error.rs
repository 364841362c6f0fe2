//! Error taxonomy for a generation run.
//!
//! Every variant is fatal: the driver reports it and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// Input stream could not be read.
    #[error("read {source_name}: {source}")]
    Input {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// Input was not a valid cluster config document.
    #[error("parse {source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("'name' cannot be specified in 'template'")]
    TemplateHasName,

    #[error("'name' must be specified for spec #{index}")]
    MissingName { index: usize },

    /// Name cannot be used as a single output directory component.
    #[error("invalid node name '{name}' for spec #{index}: must not contain path separators or be '.' or '..'")]
    InvalidName { name: String, index: usize },

    #[error("duplicate node name '{name}' at spec #{first} and spec #{second}")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    /// Template could not be compiled or rendered for a node.
    #[error("template {template}: {message}")]
    Template { template: String, message: String },

    /// Output sink (or template file) failure, carrying the offending path.
    #[error("{op}({}): {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
