use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{EntityKind, FormError, PolicyVariant};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Result<Self, FormError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some(ext) => Err(FormError::UnsupportedFormat(ext.to_string())),
            None => Err(FormError::MissingExtension(path.display().to_string())),
        }
    }

    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
        }
    }

    /// Parse `content` in this format
    pub fn parse<T>(&self, content: &str, origin: &str) -> Result<T, FormError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let parsed = match self {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| FormError::Parse {
            path: origin.to_string(),
            reason,
        })
    }
}

/// Read and parse a configuration file, picking the format from its extension
pub fn load_file<T>(path: &Path) -> Result<T, FormError>
where
    T: for<'de> Deserialize<'de>,
{
    let format = ConfigFormat::from_extension(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| FormError::Read {
        path: path.display().to_string(),
        source,
    })?;
    format.parse(&content, &path.display().to_string())
}

fn default_asset_prefix() -> String {
    "/static/admin/".to_string()
}

/// Facts the hosting page knows about the form it renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageContext {
    /// Which entity the form edits
    pub entity_kind: EntityKind,
    /// True on the "add" page, where no action can be chosen yet
    #[serde(default)]
    pub is_creation_page: bool,
    /// Prefix for admin media, used for indicator icons
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,
    /// Revision of the field rules
    #[serde(default)]
    pub variant: PolicyVariant,
}

impl PageContext {
    /// Context for the page editing an existing entity
    pub fn existing(entity_kind: EntityKind) -> Self {
        Self {
            entity_kind,
            is_creation_page: false,
            asset_prefix: default_asset_prefix(),
            variant: PolicyVariant::default(),
        }
    }

    /// Context for the creation page
    pub fn creation(entity_kind: EntityKind) -> Self {
        Self {
            is_creation_page: true,
            ..Self::existing(entity_kind)
        }
    }

    pub fn with_variant(mut self, variant: PolicyVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Load a context from a JSON, YAML or TOML file
    pub fn load(path: &Path) -> Result<Self, FormError> {
        load_file(path)
    }

    /// Full path of an admin media asset
    pub fn asset(&self, relative: &str) -> String {
        format!("{}{}", self.asset_prefix, relative)
    }
}
