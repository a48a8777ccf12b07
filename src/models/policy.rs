use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::{FormError, Highlight, LifecycleAction};

/// Which revision of the per-entity rule table applies.
///
/// The older scripts knew nothing about confirmation fields; the newer one
/// enables them next to their primary passphrase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVariant {
    Basic,
    Confirming,
}

impl PolicyVariant {
    pub fn has_confirmation_fields(self) -> bool {
        matches!(self, PolicyVariant::Confirming)
    }
}

impl Default for PolicyVariant {
    fn default() -> Self {
        PolicyVariant::Confirming
    }
}

impl FromStr for PolicyVariant {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(PolicyVariant::Basic),
            "confirming" => Ok(PolicyVariant::Confirming),
            other => Err(FormError::UnknownVariant(other.to_string())),
        }
    }
}

/// Enablement and highlight computed for one field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldState {
    pub enabled: bool,
    pub highlight: Highlight,
    /// Highlight for the row wrapping checkbox-style flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Highlight>,
}

impl FieldState {
    /// Disabled and grayed out
    pub const CLOSED: FieldState = FieldState {
        enabled: false,
        highlight: Highlight::Inactive,
        container: None,
    };

    /// Enabled and marked as editable
    pub const OPEN: FieldState = FieldState {
        enabled: true,
        highlight: Highlight::Pending,
        container: None,
    };

    pub const fn with_container(self, container: Highlight) -> Self {
        FieldState {
            enabled: self.enabled,
            highlight: self.highlight,
            container: Some(container),
        }
    }
}

impl Default for FieldState {
    fn default() -> Self {
        FieldState::CLOSED
    }
}

/// Complete field policy for one action, recomputed from scratch on each change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldPolicy {
    /// Action the policy was computed for, after normalization
    pub action: LifecycleAction,
    /// Whether a Create selection was folded into Update
    pub normalized_from_create: bool,
    /// State per user-facing field, action controls included
    pub fields: BTreeMap<String, FieldState>,
    /// Whether the parent passphrase label carries the required marker
    pub parent_passphrase_required: bool,
    /// Fields whose value is wiped before they are re-enabled
    pub cleared: Vec<String>,
}

impl FieldPolicy {
    /// State for a field; unknown fields are closed
    pub fn state(&self, name: &str) -> FieldState {
        self.fields.get(name).copied().unwrap_or(FieldState::CLOSED)
    }

    /// Names of all enabled data fields (action controls excluded)
    pub fn enabled_data_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(name, state)| state.enabled && !name.starts_with("action_"))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn clears(&self, name: &str) -> bool {
        self.cleared.iter().any(|c| c == name)
    }
}
