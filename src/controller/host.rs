use serde::{Deserialize, Serialize};

use crate::models::{FieldDescriptor, FieldHandle, Highlight, InlineMessage, KindOption};

/// Kinds of UI events the controller listens to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Change,
    KeyUp,
    Focus,
    Submit,
}

/// A single user-generated event delivered by the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormEvent {
    Change(FieldHandle),
    KeyUp(FieldHandle),
    Focus(FieldHandle),
    Submit,
}

impl FormEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            FormEvent::Change(_) => EventKind::Change,
            FormEvent::KeyUp(_) => EventKind::KeyUp,
            FormEvent::Focus(_) => EventKind::Focus,
            FormEvent::Submit => EventKind::Submit,
        }
    }

    pub fn target(&self) -> Option<FieldHandle> {
        match self {
            FormEvent::Change(field) | FormEvent::KeyUp(field) | FormEvent::Focus(field) => Some(*field),
            FormEvent::Submit => None,
        }
    }
}

/// Events the host must forward for one target (`None` = the form itself)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    pub target: Option<FieldHandle>,
    pub events: Vec<EventKind>,
}

/// The UI environment hosting a certificate form.
///
/// The controller only ever talks to the form through this trait. Handles
/// passed in come from [`FormHost::fields`]; implementations may ignore
/// unknown handles.
pub trait FormHost {
    /// Enumerate every registered field
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Find a field by name
    fn lookup(&self, name: &str) -> Option<FieldHandle> {
        self.fields()
            .into_iter()
            .find(|field| field.name == name)
            .map(|field| field.handle)
    }

    fn value(&self, field: FieldHandle) -> String;

    fn set_value(&mut self, field: FieldHandle, value: &str);

    /// Whether a radio/checkbox control is checked
    fn is_checked(&self, field: FieldHandle) -> bool;

    /// Check or uncheck a control; checking a radio unchecks its group
    fn set_checked(&mut self, field: FieldHandle, checked: bool);

    fn set_enabled(&mut self, field: FieldHandle, enabled: bool);

    fn set_highlight(&mut self, field: FieldHandle, highlight: Highlight);

    /// Highlight the row wrapping a field
    fn set_container_highlight(&mut self, field: FieldHandle, highlight: Highlight);

    fn is_label_required(&self, field: FieldHandle) -> bool;

    /// Toggle the "required" marker on the field's label
    fn set_label_required(&mut self, field: FieldHandle, required: bool);

    /// Options of a select field
    fn options(&self, field: FieldHandle) -> Vec<KindOption>;

    fn set_options(&mut self, field: FieldHandle, options: Vec<KindOption>);

    /// Insert a message node, replacing any node with the same key
    fn show_message(&mut self, message: InlineMessage);

    /// Remove the message node with this key, if present
    fn remove_message(&mut self, key: &str);
}
