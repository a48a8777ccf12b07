//! Configuration
//!
//! Page context and stored form documents, loaded from JSON, YAML or TOML.

pub mod context;
pub mod document;

pub use context::{load_file, ConfigFormat, PageContext};
pub use document::{default_path, FieldDecl, FormDocument};
