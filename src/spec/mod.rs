//! Spec layer: YAML schemas, defaulting, derivation, and the resolver.
//!
//! This module is intentionally separate from config loading and rendering.
//! It owns:
//! - the baseline defaults table
//! - raw and resolved node spec shapes
//! - FQDN/URL derivation
//! - initial-cluster list construction

pub mod defaults;
pub mod identity;
pub mod node;
pub mod peers;
pub mod resolve;

pub use defaults::{BASELINE, Defaults};
pub use identity::derive;
pub use node::{Derived, RawSpec, ResolvedSpec};
pub use peers::{PeerList, PeerListBuilder};
pub use resolve::resolve;
