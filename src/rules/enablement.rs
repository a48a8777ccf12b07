use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use super::table::{closed_state, table_for};
use crate::models::{
    EntityKind, FieldDescriptor, FieldPolicy, FieldRole, FieldState, LifecycleAction, PolicyVariant,
    INTERNAL_PREFIX,
};

/// Computes which fields an action lets the operator edit.
///
/// Stateless: the same action and field set always yield the same policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEnablementEngine {
    kind: EntityKind,
    variant: PolicyVariant,
}

impl FieldEnablementEngine {
    /// Create an engine for one entity kind and table revision
    pub fn new(kind: EntityKind, variant: PolicyVariant) -> Self {
        Self { kind, variant }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn variant(&self) -> PolicyVariant {
        self.variant
    }

    /// Compute the complete policy for `action` over the declared fields.
    ///
    /// Internal fields are left out. Every other field gets exactly one
    /// entry; fields without a rule are disabled and grayed out.
    pub fn policy(&self, action: LifecycleAction, fields: &[FieldDescriptor]) -> FieldPolicy {
        let normalized_from_create = action == LifecycleAction::Create;
        if normalized_from_create {
            info!("create is not selectable on an existing {}, using update", self.kind);
        }
        let action = action.post_creation();
        let table = table_for(action);

        let mut states: BTreeMap<String, FieldState> = BTreeMap::new();
        let mut data_fields: BTreeSet<&str> = BTreeSet::new();

        for field in fields {
            match field.role {
                FieldRole::Internal => continue,
                FieldRole::Action(control) => {
                    let state = if control == LifecycleAction::Create {
                        FieldState::CLOSED
                    } else {
                        FieldState::OPEN
                    };
                    states.insert(field.name.clone(), state);
                }
                FieldRole::Data if field.name.starts_with(INTERNAL_PREFIX) => continue,
                FieldRole::Data => {
                    data_fields.insert(field.name.as_str());
                    states.insert(field.name.clone(), closed_state(&field.name));
                }
            }
        }

        let mut cleared: Vec<String> = Vec::new();
        for layer in table.layers(self.kind, self.variant) {
            for rule in layer.rules {
                if data_fields.contains(rule.field) {
                    states.insert(rule.field.to_string(), rule.state);
                }
            }
            for name in layer.cleared {
                if data_fields.contains(name) && !cleared.iter().any(|c| c == name) {
                    cleared.push(name.to_string());
                }
            }
        }

        let policy = FieldPolicy {
            action,
            normalized_from_create,
            fields: states,
            parent_passphrase_required: table.parent_passphrase_required,
            cleared,
        };

        debug!(
            kind = %self.kind,
            action = %action,
            enabled = ?policy.enabled_data_fields(),
            "computed field policy"
        );

        policy
    }
}
