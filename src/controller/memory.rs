use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::host::{FormEvent, FormHost};
use crate::models::{
    names, EntityKind, FieldDescriptor, FieldHandle, FieldRole, FormError, Highlight, InlineMessage,
    KindOption, LifecycleAction, PolicyVariant,
};
use crate::rules::canonical_fields;

/// State of one field held by [`InMemoryForm`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRecord {
    pub name: String,
    pub role: FieldRole,
    pub value: String,
    pub checked: bool,
    pub enabled: bool,
    pub highlight: Highlight,
    pub container: Highlight,
    pub label_required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<KindOption>,
}

impl FieldRecord {
    fn new(name: &str, role: FieldRole) -> Self {
        Self {
            name: name.to_string(),
            role,
            value: String::new(),
            checked: false,
            enabled: true,
            highlight: Highlight::Neutral,
            container: Highlight::Neutral,
            label_required: false,
            options: Vec::new(),
        }
    }
}

/// Self-contained form host keeping all field state in memory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InMemoryForm {
    fields: Vec<FieldRecord>,
    messages: Vec<InlineMessage>,
}

impl InMemoryForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Form with the standard field set of an admin page
    pub fn canonical(kind: EntityKind, variant: PolicyVariant) -> Self {
        let mut form = Self::new();
        for descriptor in canonical_fields(kind, variant) {
            let mut record = FieldRecord::new(&descriptor.name, descriptor.role);
            if descriptor.name == names::TYPE {
                record.options = vec![KindOption::root()];
            }
            form.fields.push(record);
        }
        form
    }

    /// Register a field; names must be unique
    pub fn register(&mut self, name: &str, role: FieldRole) -> Result<FieldHandle, FormError> {
        if self.fields.iter().any(|f| f.name == name) {
            return Err(FormError::DuplicateField(name.to_string()));
        }
        self.fields.push(FieldRecord::new(name, role));
        Ok(FieldHandle(self.fields.len() - 1))
    }

    /// Look up a field record by name
    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Mutable access to a field record by name
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldRecord> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn records(&self) -> &[FieldRecord] {
        &self.fields
    }

    pub fn messages(&self) -> &[InlineMessage] {
        &self.messages
    }

    pub fn message(&self, key: &str) -> Option<&InlineMessage> {
        self.messages.iter().find(|m| m.key == key)
    }

    fn handle_of(&self, name: &str) -> Result<FieldHandle, FormError> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(FieldHandle)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Click the radio control of `action`
    pub fn check_action(&mut self, action: LifecycleAction) -> Result<FieldHandle, FormError> {
        let handle = self.handle_of(&action.control_name())?;
        self.set_checked(handle, true);
        Ok(handle)
    }

    /// Type a value into a field by name
    pub fn enter(&mut self, name: &str, value: &str) -> Result<FieldHandle, FormError> {
        let handle = self.handle_of(name)?;
        self.set_value(handle, value);
        Ok(handle)
    }

    /// Perform a scripted user interaction and return the event it produces
    pub fn perform(&mut self, step: &ScriptedEvent) -> Result<FormEvent, FormError> {
        match step {
            ScriptedEvent::Action(action) => Ok(FormEvent::Change(self.check_action(*action)?)),
            ScriptedEvent::Parent(value) => Ok(FormEvent::Change(self.enter(names::PARENT, value)?)),
            ScriptedEvent::Input { field, value } => Ok(FormEvent::KeyUp(self.enter(field, value)?)),
            ScriptedEvent::Focus(field) => Ok(FormEvent::Focus(self.handle_of(field)?)),
            ScriptedEvent::Submit => Ok(FormEvent::Submit),
        }
    }

    fn record(&self, field: FieldHandle) -> Option<&FieldRecord> {
        self.fields.get(field.0)
    }

    fn record_mut(&mut self, field: FieldHandle) -> Option<&mut FieldRecord> {
        self.fields.get_mut(field.0)
    }
}

impl FormHost for InMemoryForm {
    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, record)| FieldDescriptor {
                handle: FieldHandle(index),
                name: record.name.clone(),
                role: record.role,
            })
            .collect()
    }

    fn value(&self, field: FieldHandle) -> String {
        self.record(field).map(|r| r.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, field: FieldHandle, value: &str) {
        if let Some(record) = self.record_mut(field) {
            record.value = value.to_string();
        }
    }

    fn is_checked(&self, field: FieldHandle) -> bool {
        self.record(field).map(|r| r.checked).unwrap_or(false)
    }

    fn set_checked(&mut self, field: FieldHandle, checked: bool) {
        let is_radio = matches!(self.record(field).map(|r| r.role), Some(FieldRole::Action(_)));
        if checked && is_radio {
            for record in self.fields.iter_mut().filter(|r| r.role.action().is_some()) {
                record.checked = false;
            }
        }
        if let Some(record) = self.record_mut(field) {
            record.checked = checked;
        }
    }

    fn set_enabled(&mut self, field: FieldHandle, enabled: bool) {
        if let Some(record) = self.record_mut(field) {
            record.enabled = enabled;
        }
    }

    fn set_highlight(&mut self, field: FieldHandle, highlight: Highlight) {
        if let Some(record) = self.record_mut(field) {
            record.highlight = highlight;
        }
    }

    fn set_container_highlight(&mut self, field: FieldHandle, highlight: Highlight) {
        if let Some(record) = self.record_mut(field) {
            record.container = highlight;
        }
    }

    fn is_label_required(&self, field: FieldHandle) -> bool {
        self.record(field).map(|r| r.label_required).unwrap_or(false)
    }

    fn set_label_required(&mut self, field: FieldHandle, required: bool) {
        if let Some(record) = self.record_mut(field) {
            record.label_required = required;
        }
    }

    fn options(&self, field: FieldHandle) -> Vec<KindOption> {
        self.record(field).map(|r| r.options.clone()).unwrap_or_default()
    }

    fn set_options(&mut self, field: FieldHandle, options: Vec<KindOption>) {
        if let Some(record) = self.record_mut(field) {
            if let Some(selected) = options.iter().find(|o| o.selected) {
                record.value = selected.value.clone();
            }
            record.options = options;
        }
    }

    fn show_message(&mut self, message: InlineMessage) {
        self.messages.retain(|m| m.key != message.key);
        self.messages.push(message);
    }

    fn remove_message(&mut self, key: &str) {
        self.messages.retain(|m| m.key != key);
    }
}

/// User interaction in a replayable script, e.g. `action:renew` or `input:common_name=foo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedEvent {
    Action(LifecycleAction),
    Parent(String),
    Input { field: String, value: String },
    Focus(String),
    Submit,
}

impl FromStr for ScriptedEvent {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "submit" {
            return Ok(ScriptedEvent::Submit);
        }
        let invalid = || FormError::InvalidEvent(s.to_string());
        let (kind, rest) = s.split_once(':').ok_or_else(invalid)?;
        match kind {
            "action" => Ok(ScriptedEvent::Action(rest.parse()?)),
            "parent" => Ok(ScriptedEvent::Parent(rest.to_string())),
            "input" => {
                let (field, value) = rest.split_once('=').ok_or_else(invalid)?;
                if field.is_empty() {
                    return Err(invalid());
                }
                Ok(ScriptedEvent::Input {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            "focus" if !rest.is_empty() => Ok(ScriptedEvent::Focus(rest.to_string())),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageTone;

    #[test]
    fn test_register_rejects_duplicates() {
        let mut form = InMemoryForm::new();
        assert_eq!(form.register("description", FieldRole::Data).unwrap(), FieldHandle(0));
        assert!(matches!(
            form.register("description", FieldRole::Data),
            Err(FormError::DuplicateField(_))
        ));
    }

    #[test]
    fn test_action_controls_behave_as_radio_group() {
        let mut form = InMemoryForm::canonical(EntityKind::Authority, PolicyVariant::Confirming);
        form.check_action(LifecycleAction::Revoke).unwrap();
        form.check_action(LifecycleAction::Renew).unwrap();
        let checked: Vec<&str> = form
            .records()
            .iter()
            .filter(|r| r.checked)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(checked, vec!["action_3"]);
    }

    #[test]
    fn test_messages_are_replaced_by_key() {
        let mut form = InMemoryForm::new();
        let anchor = form.register("pkcs12_passphrase_verify", FieldRole::Data).unwrap();
        for text in ["Mismatch", "Match"] {
            form.show_message(InlineMessage {
                key: "pf_match_pkcs12_passphrase_verify".to_string(),
                anchor,
                text: text.to_string(),
                icon: None,
                tone: MessageTone::Positive,
            });
        }
        assert_eq!(form.messages().len(), 1);
        assert_eq!(form.messages()[0].text, "Match");
        form.remove_message("pf_match_pkcs12_passphrase_verify");
        assert!(form.messages().is_empty());
    }

    #[test]
    fn test_scripted_event_parsing() {
        assert_eq!("submit".parse::<ScriptedEvent>().unwrap(), ScriptedEvent::Submit);
        assert_eq!(
            "action:revoke".parse::<ScriptedEvent>().unwrap(),
            ScriptedEvent::Action(LifecycleAction::Revoke)
        );
        assert_eq!(
            "input:common_name=*.example.com".parse::<ScriptedEvent>().unwrap(),
            ScriptedEvent::Input {
                field: "common_name".to_string(),
                value: "*.example.com".to_string()
            }
        );
        assert_eq!("parent:".parse::<ScriptedEvent>().unwrap(), ScriptedEvent::Parent(String::new()));
        assert!("input:novalue".parse::<ScriptedEvent>().is_err());
        assert!("focus:".parse::<ScriptedEvent>().is_err());
        assert!("explode".parse::<ScriptedEvent>().is_err());
        assert!("action:destroy".parse::<ScriptedEvent>().is_err());
    }

    #[test]
    fn test_perform_produces_events() {
        let mut form = InMemoryForm::canonical(EntityKind::Credential, PolicyVariant::Confirming);
        let event = form.perform(&"input:description=web".parse().unwrap()).unwrap();
        assert!(matches!(event, FormEvent::KeyUp(_)));
        assert_eq!(form.field("description").unwrap().value, "web");
        assert!(form.perform(&"focus:nope".parse().unwrap()).is_err());
    }
}
