use serde::{Deserialize, Serialize};

use crate::models::{names, Highlight, MessageTone};

/// Outcome of comparing a passphrase with its confirmation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PassphraseVerdict {
    /// Both halves are empty
    Empty,
    Match,
    Mismatch,
}

impl std::fmt::Display for PassphraseVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassphraseVerdict::Empty => write!(f, "empty"),
            PassphraseVerdict::Match => write!(f, "match"),
            PassphraseVerdict::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// Compare two passphrase inputs exactly (case-sensitive)
pub fn compare(primary: &str, confirmation: &str) -> PassphraseVerdict {
    if primary.is_empty() && confirmation.is_empty() {
        PassphraseVerdict::Empty
    } else if primary == confirmation {
        PassphraseVerdict::Match
    } else {
        PassphraseVerdict::Mismatch
    }
}

/// A primary passphrase field and its confirmation field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassphrasePair {
    pub primary: &'static str,
    pub confirmation: &'static str,
}

impl PassphrasePair {
    /// Key passphrase of the certificate itself
    pub const KEY: PassphrasePair = PassphrasePair {
        primary: names::PASSPHRASE,
        confirmation: names::PASSPHRASE_VERIFY,
    };

    /// Passphrase protecting the PKCS#12 export
    pub const PKCS12: PassphrasePair = PassphrasePair {
        primary: names::PKCS12_PASSPHRASE,
        confirmation: names::PKCS12_PASSPHRASE_VERIFY,
    };

    /// Key of the indicator node attached to the confirmation field
    pub fn indicator_key(&self) -> String {
        format!("pf_match_{}", self.confirmation)
    }
}

/// Visual effects of a verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictDisplay {
    pub primary: Highlight,
    pub confirmation: Highlight,
    /// Indicator text, icon file and tone; `None` removes the indicator
    pub indicator: Option<(&'static str, &'static str, MessageTone)>,
}

impl PassphraseVerdict {
    pub fn display(self) -> VerdictDisplay {
        match self {
            PassphraseVerdict::Empty => VerdictDisplay {
                primary: Highlight::Neutral,
                confirmation: Highlight::Neutral,
                indicator: None,
            },
            PassphraseVerdict::Match => VerdictDisplay {
                primary: Highlight::Success,
                confirmation: Highlight::Success,
                indicator: Some(("Match", "img/admin/icon-yes.gif", MessageTone::Positive)),
            },
            PassphraseVerdict::Mismatch => VerdictDisplay {
                primary: Highlight::Neutral,
                confirmation: Highlight::Error,
                indicator: Some(("Mismatch", "img/admin/icon-no.gif", MessageTone::Negative)),
            },
        }
    }
}
