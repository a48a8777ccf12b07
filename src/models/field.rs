use serde::{Deserialize, Serialize};

use super::LifecycleAction;

/// Well-known field names shared by both certificate forms
pub mod names {
    pub const DESCRIPTION: &str = "description";
    pub const COMMON_NAME: &str = "common_name";
    pub const NAME: &str = "name";
    pub const COUNTRY: &str = "country";
    pub const STATE: &str = "state";
    pub const LOCALITY: &str = "locality";
    pub const ORGANIZATION: &str = "organization";
    pub const ORG_UNIT: &str = "OU";
    pub const EMAIL: &str = "email";
    pub const SUBJALTNAME: &str = "subjaltname";
    pub const KEY_LENGTH: &str = "key_length";
    pub const CERT_EXTENSION: &str = "cert_extension";
    pub const PURPOSE: &str = "purpose";
    pub const VALID_DAYS: &str = "valid_days";
    pub const PASSPHRASE: &str = "passphrase";
    pub const PASSPHRASE_VERIFY: &str = "passphrase_verify";
    pub const SERIAL: &str = "serial";
    pub const EXPIRY_DATE: &str = "expiry_date";
    pub const DER_ENCODED: &str = "der_encoded";
    pub const PKCS12_ENCODED: &str = "pkcs12_encoded";
    pub const PKCS12_PASSPHRASE: &str = "pkcs12_passphrase";
    pub const PKCS12_PASSPHRASE_VERIFY: &str = "pkcs12_passphrase_verify";
    pub const SUBCAS_ALLOWED: &str = "subcas_allowed";
    pub const CA_CHAIN: &str = "ca_chain";
    pub const PARENT: &str = "parent";
    pub const TYPE: &str = "type";
    pub const PARENT_PASSPHRASE: &str = "parent_passphrase";
    pub const POLICY: &str = "policy";
}

/// Prefix marking fields that are not user-facing (e.g. `_save`)
pub const INTERNAL_PREFIX: char = '_';

/// Role a field plays on the form, fixed when the field is registered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// One of the lifecycle action radio controls
    Action(LifecycleAction),
    /// Regular data entry field
    Data,
    /// Host bookkeeping field, never touched by policies
    Internal,
}

impl FieldRole {
    /// Classify a non-action field by its name
    pub fn for_name(name: &str) -> Self {
        if name.starts_with(INTERNAL_PREFIX) {
            FieldRole::Internal
        } else {
            FieldRole::Data
        }
    }

    pub fn is_internal(self) -> bool {
        matches!(self, FieldRole::Internal)
    }

    pub fn action(self) -> Option<LifecycleAction> {
        match self {
            FieldRole::Action(action) => Some(action),
            _ => None,
        }
    }
}

/// Opaque reference to a field owned by the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldHandle(pub usize);

/// A registered field as the host enumerates it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    pub handle: FieldHandle,
    pub name: String,
    pub role: FieldRole,
}

/// Background highlight applied to a field or its container row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Plain white
    Neutral,
    /// Gray, used for disabled fields
    Inactive,
    /// Yellow, marks fields the current action lets the operator edit
    Pending,
    /// Green
    Success,
    /// Red
    Error,
}

impl Highlight {
    /// CSS background color for this highlight
    pub fn css_color(self) -> &'static str {
        match self {
            Highlight::Neutral => "#FFFFFF",
            Highlight::Inactive => "#F2F2F2",
            Highlight::Pending => "#fffcaa",
            Highlight::Success => "#d8fbd8",
            Highlight::Error => "#f15959",
        }
    }
}

impl Default for Highlight {
    fn default() -> Self {
        Highlight::Neutral
    }
}

impl std::fmt::Display for Highlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Highlight::Neutral => "neutral",
            Highlight::Inactive => "inactive",
            Highlight::Pending => "pending",
            Highlight::Success => "success",
            Highlight::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// Option of the authority `type` selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KindOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub selected: bool,
}

impl KindOption {
    pub const ROOT_VALUE: &'static str = "RootCA";
    pub const SUBORDINATE_VALUE: &'static str = "SubCA";

    /// Self-signed root option
    pub fn root() -> Self {
        Self {
            value: Self::ROOT_VALUE.to_string(),
            label: "self-signed (RootCA)".to_string(),
            selected: true,
        }
    }

    /// Subordinate authority option
    pub fn subordinate() -> Self {
        Self {
            value: Self::SUBORDINATE_VALUE.to_string(),
            label: Self::SUBORDINATE_VALUE.to_string(),
            selected: true,
        }
    }
}

/// Reference to the parent authority picked in the `parent` selector.
///
/// An empty selector value means no parent (self-signed root).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentLink(pub String);

impl ParentLink {
    /// Interpret a raw selector value
    pub fn from_selection(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Some(ParentLink(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Visual tone of an inline message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageTone {
    Positive,
    Negative,
}

/// Auxiliary message node placed after a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InlineMessage {
    /// Identity of the node; inserting the same key replaces the old node
    pub key: String,
    /// Field the node is placed after
    pub anchor: FieldHandle,
    pub text: String,
    pub icon: Option<String>,
    pub tone: MessageTone,
}
