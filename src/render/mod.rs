//! Manifest rendering.

pub mod template;

pub use template::ManifestTemplate;
