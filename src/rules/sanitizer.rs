use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::models::Highlight;

/// Leading wildcard of a common name such as `*.example.com`
static LEADING_WILDCARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*").expect("static pattern"));

/// Everything that may not appear in a derived identifier
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("static pattern"));

/// Token substituted for a leading wildcard
pub const WILDCARD_TOKEN: &str = "asterisk";

/// Shown when the common name has content but nothing usable survives sanitizing
pub const NO_VALID_NAME_WARNING: &str =
    "CommonName must contain at least one valid character (a-Z0-9)";

/// Key of the warning node placed after the derived name field
pub const NO_VALID_NAME_KEY: &str = "no_valid_name";

/// Map free text to an identifier token.
///
/// A leading `*` becomes `asterisk`, spaces become `_`, and anything outside
/// `[A-Za-z0-9_.-]` is dropped.
pub fn sanitize(raw: &str) -> String {
    let unwildcarded = LEADING_WILDCARD.replace(raw, WILDCARD_TOKEN);
    let underscored = unwildcarded.replace(' ', "_");
    DISALLOWED.replace_all(&underscored, "").into_owned()
}

/// Result of deriving the `name` field from the `common_name` field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommonNameOutcome {
    /// New value of the derived field
    pub value: String,
    pub highlight: Highlight,
    /// Whether the "no valid name" warning must be shown
    pub warning: bool,
}

/// Recompute the derived identifier for the current common name
pub fn derive_common_name(raw: &str) -> CommonNameOutcome {
    let value = sanitize(raw);

    if value.is_empty() && !raw.is_empty() {
        CommonNameOutcome {
            value,
            highlight: Highlight::Pending,
            warning: true,
        }
    } else if !value.is_empty() {
        CommonNameOutcome {
            value,
            highlight: Highlight::Success,
            warning: false,
        }
    } else {
        CommonNameOutcome {
            value,
            highlight: Highlight::Neutral,
            warning: false,
        }
    }
}
