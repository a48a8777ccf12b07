//! Declarative rule table for the lifecycle actions.
//!
//! Every action has a base rule set shared by both entity kinds, plus
//! per-kind additions, each of which may carry extra rules that only exist in
//! the confirming revision of the forms. Later layers override earlier ones.
//! Fields with no rule at all stay closed.

use crate::models::{names, EntityKind, FieldState, Highlight, LifecycleAction, PolicyVariant};

/// Target state for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field: &'static str,
    pub state: FieldState,
}

/// Enabled, yellow
const fn open(field: &'static str) -> Rule {
    Rule { field, state: FieldState::OPEN }
}

/// Enabled checkbox flag with its row highlighted too
const fn open_row(field: &'static str) -> Rule {
    Rule { field, state: FieldState::OPEN.with_container(Highlight::Pending) }
}

/// Disabled checkbox flag with its row reset to white
const fn closed_row(field: &'static str) -> Rule {
    Rule { field, state: FieldState::CLOSED.with_container(Highlight::Neutral) }
}

/// Checkbox flags rendered inside a highlighted row
pub const ROW_FIELDS: &[&str] = &[names::DER_ENCODED, names::PKCS12_ENCODED, names::SUBCAS_ALLOWED];

/// State of a field no rule mentions; flag rows are reset to white
pub fn closed_state(field: &str) -> FieldState {
    if ROW_FIELDS.iter().any(|row| *row == field) {
        FieldState::CLOSED.with_container(Highlight::Neutral)
    } else {
        FieldState::CLOSED
    }
}

/// Rules plus the fields whose value is wiped
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub rules: &'static [Rule],
    pub cleared: &'static [&'static str],
}

impl RuleSet {
    const EMPTY: RuleSet = RuleSet { rules: &[], cleared: &[] };
}

/// Additions for one entity kind
#[derive(Debug, Clone, Copy)]
pub struct KindRules {
    pub always: RuleSet,
    /// Only applied for [`PolicyVariant::Confirming`]
    pub confirming: RuleSet,
}

/// Complete rules for one action
#[derive(Debug, Clone, Copy)]
pub struct ActionTable {
    pub base: RuleSet,
    pub authority: KindRules,
    pub credential: KindRules,
    pub parent_passphrase_required: bool,
}

impl ActionTable {
    /// Rule sets to apply in order for a kind and variant
    pub fn layers(&self, kind: EntityKind, variant: PolicyVariant) -> Vec<&RuleSet> {
        let specific = match kind {
            EntityKind::Authority => &self.authority,
            EntityKind::Credential => &self.credential,
        };
        let mut layers = vec![&self.base, &specific.always];
        if variant.has_confirmation_fields() {
            layers.push(&specific.confirming);
        }
        layers
    }
}

static UPDATE: ActionTable = ActionTable {
    base: RuleSet {
        rules: &[open(names::DESCRIPTION), open_row(names::DER_ENCODED)],
        cleared: &[],
    },
    authority: KindRules { always: RuleSet::EMPTY, confirming: RuleSet::EMPTY },
    credential: KindRules {
        always: RuleSet {
            rules: &[open_row(names::PKCS12_ENCODED), open(names::PKCS12_PASSPHRASE)],
            cleared: &[],
        },
        confirming: RuleSet {
            rules: &[open(names::PKCS12_PASSPHRASE_VERIFY)],
            cleared: &[],
        },
    },
    parent_passphrase_required: false,
};

static REVOKE: ActionTable = ActionTable {
    base: RuleSet {
        rules: &[open(names::PARENT_PASSPHRASE), closed_row(names::DER_ENCODED)],
        cleared: &[],
    },
    authority: KindRules {
        always: RuleSet { rules: &[closed_row(names::SUBCAS_ALLOWED)], cleared: &[] },
        confirming: RuleSet::EMPTY,
    },
    credential: KindRules {
        always: RuleSet { rules: &[closed_row(names::PKCS12_ENCODED)], cleared: &[] },
        confirming: RuleSet::EMPTY,
    },
    parent_passphrase_required: true,
};

static RENEW: ActionTable = ActionTable {
    base: RuleSet {
        rules: &[
            open(names::DESCRIPTION),
            open(names::COUNTRY),
            open(names::STATE),
            open(names::LOCALITY),
            open(names::ORGANIZATION),
            open(names::ORG_UNIT),
            open(names::EMAIL),
            open(names::VALID_DAYS),
            open(names::PASSPHRASE),
            open(names::PARENT_PASSPHRASE),
            open(names::POLICY),
            open_row(names::DER_ENCODED),
        ],
        cleared: &[names::PASSPHRASE],
    },
    authority: KindRules {
        always: RuleSet {
            rules: &[open(names::KEY_LENGTH), open_row(names::SUBCAS_ALLOWED)],
            cleared: &[],
        },
        confirming: RuleSet { rules: &[], cleared: &[names::PASSPHRASE_VERIFY] },
    },
    credential: KindRules {
        always: RuleSet {
            rules: &[
                open(names::CERT_EXTENSION),
                open(names::PURPOSE),
                open(names::SUBJALTNAME),
                open_row(names::PKCS12_ENCODED),
                open(names::PKCS12_PASSPHRASE),
            ],
            cleared: &[],
        },
        confirming: RuleSet {
            rules: &[open(names::PKCS12_PASSPHRASE_VERIFY)],
            cleared: &[names::PASSPHRASE_VERIFY],
        },
    },
    parent_passphrase_required: true,
};

/// Rules for a post-creation action; Create has none of its own and uses Update's
pub fn table_for(action: LifecycleAction) -> &'static ActionTable {
    match action.post_creation() {
        LifecycleAction::Revoke => &REVOKE,
        LifecycleAction::Renew => &RENEW,
        _ => &UPDATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_fields(table: &ActionTable, kind: EntityKind, variant: PolicyVariant) -> Vec<&'static str> {
        table
            .layers(kind, variant)
            .into_iter()
            .flat_map(|set| set.rules.iter().map(|r| r.field))
            .collect()
    }

    #[test]
    fn test_confirming_layer_only_for_confirming_variant() {
        let basic = rule_fields(table_for(LifecycleAction::Update), EntityKind::Credential, PolicyVariant::Basic);
        let rich = rule_fields(table_for(LifecycleAction::Update), EntityKind::Credential, PolicyVariant::Confirming);
        assert!(!basic.contains(&names::PKCS12_PASSPHRASE_VERIFY));
        assert!(rich.contains(&names::PKCS12_PASSPHRASE_VERIFY));
    }

    #[test]
    fn test_renew_clears_passphrase() {
        let table = table_for(LifecycleAction::Renew);
        assert!(table.base.cleared.contains(&names::PASSPHRASE));
        assert!(table.parent_passphrase_required);
    }

    #[test]
    fn test_create_uses_update_rules() {
        let create = table_for(LifecycleAction::Create);
        assert!(!create.parent_passphrase_required);
        assert_eq!(create.base.rules, UPDATE.base.rules);
    }

    #[test]
    fn test_revoke_rows_reset_to_neutral() {
        let table = table_for(LifecycleAction::Revoke);
        let subcas = table.authority.always.rules[0];
        assert_eq!(subcas.field, names::SUBCAS_ALLOWED);
        assert!(!subcas.state.enabled);
        assert_eq!(subcas.state.container, Some(Highlight::Neutral));
    }

    #[test]
    fn test_closed_state_resets_flag_rows() {
        for field in ROW_FIELDS {
            assert_eq!(closed_state(field).container, Some(Highlight::Neutral));
        }
        assert_eq!(closed_state(names::COMMON_NAME), FieldState::CLOSED);
    }

    #[test]
    fn test_renew_never_opens_key_confirmation() {
        let table = table_for(LifecycleAction::Renew);
        for kind in [EntityKind::Authority, EntityKind::Credential] {
            let opened = rule_fields(table, kind, PolicyVariant::Confirming);
            assert!(!opened.contains(&names::PASSPHRASE_VERIFY));
        }
        assert!(table.authority.confirming.cleared.contains(&names::PASSPHRASE_VERIFY));
        assert!(table.credential.confirming.cleared.contains(&names::PASSPHRASE_VERIFY));
    }
}
