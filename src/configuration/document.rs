use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::context::{load_file, PageContext};
use crate::controller::{FormHost, InMemoryForm};
use crate::models::{FieldRole, FormError, KindOption, LifecycleAction};
use crate::rules::canonical_fields;

/// Declaration of one field of a stored form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    #[serde(default)]
    pub value: String,
    /// Set on the radio controls selecting a lifecycle action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<LifecycleAction>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<KindOption>,
    #[serde(default)]
    pub label_required: bool,
}

impl FieldDecl {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            action: None,
            checked: false,
            options: Vec::new(),
            label_required: false,
        }
    }

    fn role(&self) -> FieldRole {
        match self.action {
            Some(action) => FieldRole::Action(action),
            None => FieldRole::for_name(&self.name),
        }
    }
}

/// A page context together with the fields the page renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormDocument {
    pub context: PageContext,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl FormDocument {
    /// Document with the standard field set for `context`
    pub fn canonical(context: PageContext) -> Self {
        let fields = canonical_fields(context.entity_kind, context.variant)
            .into_iter()
            .map(|descriptor| {
                let mut decl = FieldDecl::named(&descriptor.name);
                decl.action = descriptor.role.action();
                if descriptor.name == crate::models::names::TYPE {
                    decl.options = vec![KindOption::root()];
                }
                decl
            })
            .collect();
        Self { context, fields }
    }

    /// Load a document; a missing field list means the standard one
    pub fn load(path: &Path) -> Result<Self, FormError> {
        let document: Self = load_file(path)?;
        if document.fields.is_empty() {
            return Ok(Self::canonical(document.context));
        }
        Ok(document)
    }

    /// Build the in-memory form described by this document
    pub fn into_form(self) -> Result<(PageContext, InMemoryForm), FormError> {
        let mut form = InMemoryForm::new();
        for decl in &self.fields {
            let handle = form.register(&decl.name, decl.role())?;
            form.set_value(handle, &decl.value);
            if !decl.options.is_empty() {
                form.set_options(handle, decl.options.clone());
            }
            if decl.checked {
                form.set_checked(handle, true);
            }
            form.set_label_required(handle, decl.label_required);
        }
        Ok((self.context, form))
    }
}

/// Default location of the form document
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pkiform").join("form.toml"))
}
