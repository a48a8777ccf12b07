use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::FormError;

/// Lifecycle action selected on a certificate form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    /// Initial creation; only meaningful on the creation page
    Create,
    /// Change descriptive data and export options
    Update,
    /// Revoke the certificate (needs the parent passphrase)
    Revoke,
    /// Re-issue the certificate with new settings
    Renew,
}

impl LifecycleAction {
    /// All actions in selector order
    pub const ALL: [LifecycleAction; 4] = [
        LifecycleAction::Create,
        LifecycleAction::Update,
        LifecycleAction::Revoke,
        LifecycleAction::Renew,
    ];

    /// Actions the operator may pick once the entity exists
    pub const POST_CREATION: [LifecycleAction; 3] = [
        LifecycleAction::Update,
        LifecycleAction::Revoke,
        LifecycleAction::Renew,
    ];

    /// Position of the action in the selector
    pub fn index(self) -> usize {
        match self {
            LifecycleAction::Create => 0,
            LifecycleAction::Update => 1,
            LifecycleAction::Revoke => 2,
            LifecycleAction::Renew => 3,
        }
    }

    /// Stable field name of the radio control for this action
    pub fn control_name(self) -> String {
        format!("action_{}", self.index())
    }

    /// Create is not a legal state for an existing entity; fold it into Update.
    pub fn post_creation(self) -> Self {
        match self {
            LifecycleAction::Create => LifecycleAction::Update,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleAction::Create => "create",
            LifecycleAction::Update => "update",
            LifecycleAction::Revoke => "revoke",
            LifecycleAction::Renew => "renew",
        }
    }
}

impl Default for LifecycleAction {
    fn default() -> Self {
        LifecycleAction::Update
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LifecycleAction {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(LifecycleAction::Create),
            "update" => Ok(LifecycleAction::Update),
            "revoke" => Ok(LifecycleAction::Revoke),
            "renew" => Ok(LifecycleAction::Renew),
            other => Err(FormError::UnknownAction(other.to_string())),
        }
    }
}

/// Kind of entity a form manages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Root or intermediate certificate authority
    Authority,
    /// Certificate issued by an authority
    Credential,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Authority => "authority",
            EntityKind::Credential => "credential",
        }
    }

    /// Credential forms carry the PKCS#12 export fields
    pub fn has_pkcs12_export(self) -> bool {
        matches!(self, EntityKind::Credential)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "authority" | "ca" | "certificateauthority" => Ok(EntityKind::Authority),
            "credential" | "cert" | "certificate" => Ok(EntityKind::Credential),
            other => Err(FormError::UnknownEntityKind(other.to_string())),
        }
    }
}
