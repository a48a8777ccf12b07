//! Form rules
//!
//! Pure decision logic for the certificate forms: no host access, no state.

pub mod sanitizer;
pub mod passphrase;
pub mod parent;
pub mod table;
pub mod layout;
pub mod enablement;

pub use sanitizer::{derive_common_name, sanitize, CommonNameOutcome, NO_VALID_NAME_KEY, NO_VALID_NAME_WARNING};
pub use passphrase::{compare, PassphrasePair, PassphraseVerdict, VerdictDisplay};
pub use parent::{resolve, ParentResolution};
pub use layout::{canonical_fields, data_field_names};
pub use enablement::FieldEnablementEngine;
