//! Placeholder templates for per-node manifests.
//!
//! Syntax:
//! - `{{ field }}` is replaced by a resolved spec field (snake_case name)
//! - `{{ join initial_cluster }}` joins the peer list with ','
//!
//! Any other `{{` in the template is a syntax error, caught at parse time so a
//! bad template fails before the first manifest is written.

use crate::error::{GenError, Result};
use crate::spec::ResolvedSpec;

use regex::Regex;
use serde_json::Value;
use std::path::Path;

/// The only list field; rendered through `PeerList::join`.
const INITIAL_CLUSTER: &str = "initial_cluster";

const PLACEHOLDER_RE: &str = r"\{\{\s*(?:(join)\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}";

#[derive(Debug, Clone)]
pub struct ManifestTemplate {
    name: String,
    source: String,
    placeholder: Regex,
}

impl ManifestTemplate {
    pub fn load(path: &Path) -> Result<Self> {
        let source =
            std::fs::read_to_string(path).map_err(|e| GenError::io("read", path, e))?;
        Self::parse(&path.display().to_string(), source)
    }

    pub fn parse(name: &str, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let placeholder = Regex::new(PLACEHOLDER_RE).map_err(|e| template_error(name, e))?;

        let stripped = placeholder.replace_all(&source, "");
        if let Some(pos) = stripped.find("{{") {
            let line = stripped[..pos].matches('\n').count() + 1;
            return Err(template_error(
                name,
                format!("malformed placeholder near line {}", line),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            source,
            placeholder,
        })
    }

    /// Substitute every placeholder with `spec`'s values.
    pub fn render(&self, spec: &ResolvedSpec) -> Result<String> {
        let fields = match serde_json::to_value(spec).map_err(|e| template_error(&self.name, e))? {
            Value::Object(map) => map,
            other => {
                return Err(template_error(
                    &self.name,
                    format!("resolved spec serialized to {}", other),
                ));
            }
        };

        let mut out = String::with_capacity(self.source.len());
        let mut last = 0;
        for caps in self.placeholder.captures_iter(&self.source) {
            let (Some(whole), Some(field)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            let join = caps.get(1).is_some();
            let field = field.as_str();

            out.push_str(&self.source[last..whole.start()]);
            last = whole.end();

            if join {
                if field != INITIAL_CLUSTER {
                    return Err(template_error(
                        &self.name,
                        format!("'join' needs a list field, '{}' is not one", field),
                    ));
                }
                out.push_str(&spec.initial_cluster.join());
                continue;
            }

            match fields.get(field) {
                Some(Value::String(s)) => out.push_str(s),
                Some(Value::Array(_)) => {
                    return Err(template_error(
                        &self.name,
                        format!("list field '{}' must be used as {{{{ join {} }}}}", field, field),
                    ));
                }
                Some(other) => {
                    return Err(template_error(
                        &self.name,
                        format!("field '{}' has unsupported value {}", field, other),
                    ));
                }
                None => {
                    return Err(template_error(
                        &self.name,
                        format!("unknown field '{}' for node '{}'", field, spec.name()),
                    ));
                }
            }
        }
        out.push_str(&self.source[last..]);

        Ok(out)
    }
}

fn template_error(name: &str, message: impl ToString) -> GenError {
    GenError::Template {
        template: name.to_string(),
        message: message.to_string(),
    }
}
