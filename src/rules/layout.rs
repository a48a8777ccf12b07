use crate::models::{names, EntityKind, FieldDescriptor, FieldHandle, FieldRole, LifecycleAction, PolicyVariant};

const AUTHORITY_FIELDS: &[&str] = &[
    names::DESCRIPTION,
    names::COMMON_NAME,
    names::NAME,
    names::COUNTRY,
    names::STATE,
    names::LOCALITY,
    names::ORGANIZATION,
    names::ORG_UNIT,
    names::EMAIL,
    names::KEY_LENGTH,
    names::VALID_DAYS,
    names::PASSPHRASE,
    names::PASSPHRASE_VERIFY,
    names::SERIAL,
    names::EXPIRY_DATE,
    names::DER_ENCODED,
    names::SUBCAS_ALLOWED,
    names::CA_CHAIN,
    names::PARENT,
    names::TYPE,
    names::PARENT_PASSPHRASE,
    names::POLICY,
];

const CREDENTIAL_FIELDS: &[&str] = &[
    names::DESCRIPTION,
    names::COMMON_NAME,
    names::NAME,
    names::COUNTRY,
    names::STATE,
    names::LOCALITY,
    names::ORGANIZATION,
    names::ORG_UNIT,
    names::EMAIL,
    names::SUBJALTNAME,
    names::KEY_LENGTH,
    names::CERT_EXTENSION,
    names::VALID_DAYS,
    names::PASSPHRASE,
    names::PASSPHRASE_VERIFY,
    names::SERIAL,
    names::EXPIRY_DATE,
    names::DER_ENCODED,
    names::PKCS12_ENCODED,
    names::PKCS12_PASSPHRASE,
    names::PKCS12_PASSPHRASE_VERIFY,
    names::PARENT,
    names::PARENT_PASSPHRASE,
];

fn is_confirmation_field(name: &str) -> bool {
    name == names::PASSPHRASE_VERIFY || name == names::PKCS12_PASSPHRASE_VERIFY
}

/// Data field names rendered on the admin form, in fieldset order
pub fn data_field_names(kind: EntityKind, variant: PolicyVariant) -> Vec<&'static str> {
    let all = match kind {
        EntityKind::Authority => AUTHORITY_FIELDS,
        EntityKind::Credential => CREDENTIAL_FIELDS,
    };
    all.iter()
        .copied()
        .filter(|name| variant.has_confirmation_fields() || !is_confirmation_field(name))
        .collect()
}

/// Full field set of a rendered form: the four action controls, then data fields
pub fn canonical_fields(kind: EntityKind, variant: PolicyVariant) -> Vec<FieldDescriptor> {
    let actions = LifecycleAction::ALL
        .iter()
        .map(|action| (action.control_name(), FieldRole::Action(*action)));
    let data = data_field_names(kind, variant)
        .into_iter()
        .map(|name| (name.to_string(), FieldRole::Data));

    actions
        .chain(data)
        .enumerate()
        .map(|(index, (name, role))| FieldDescriptor {
            handle: FieldHandle(index),
            name,
            role,
        })
        .collect()
}
