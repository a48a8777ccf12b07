use serde::{Deserialize, Serialize};

use crate::models::{EntityKind, Highlight, KindOption, ParentLink};

/// What the parent selection implies for the rest of the form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentResolution {
    /// No parent selected: the certificate is self-signed
    pub is_root: bool,
    /// Options the `type` selector should offer, in order
    pub kind_options: Vec<KindOption>,
    /// Whether the parent passphrase label carries the required marker
    pub parent_passphrase_required: bool,
    pub parent_passphrase_highlight: Highlight,
}

/// Resolve the parent selection against the current `type` options.
///
/// Re-running with the output options as input yields the same options.
pub fn resolve(
    kind: EntityKind,
    parent: Option<&ParentLink>,
    current: &[KindOption],
) -> ParentResolution {
    let is_root = parent.is_none();

    let (drop_value, ensure) = if is_root {
        (KindOption::SUBORDINATE_VALUE, Some(KindOption::root()))
    } else {
        let ensure = match kind {
            EntityKind::Authority => Some(KindOption::subordinate()),
            EntityKind::Credential => None,
        };
        (KindOption::ROOT_VALUE, ensure)
    };

    let mut options: Vec<KindOption> = Vec::with_capacity(current.len() + 1);
    for option in current.iter().filter(|o| o.value != drop_value) {
        if !options.iter().any(|o| o.value == option.value) {
            options.push(option.clone());
        }
    }

    if let Some(wanted) = ensure {
        if !options.iter().any(|o| o.value == wanted.value) {
            for option in options.iter_mut() {
                option.selected = false;
            }
            options.insert(0, wanted);
        }
    }

    normalize_selection(&mut options);

    ParentResolution {
        is_root,
        kind_options: options,
        parent_passphrase_required: !is_root,
        parent_passphrase_highlight: if is_root {
            Highlight::Neutral
        } else {
            Highlight::Pending
        },
    }
}

/// A single-choice selector always has exactly one selected option
fn normalize_selection(options: &mut [KindOption]) {
    let mut seen = false;
    for option in options.iter_mut() {
        if option.selected {
            if seen {
                option.selected = false;
            }
            seen = true;
        }
    }
    if !seen {
        if let Some(first) = options.first_mut() {
            first.selected = true;
        }
    }
}
