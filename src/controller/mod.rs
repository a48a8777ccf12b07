//! Form controller
//!
//! Wires the pure rules in [`crate::rules`] to a live form. The controller
//! reads the minimal state it needs from the [`FormHost`], asks the rules what
//! to do and applies the answer as field mutations. It keeps no memory between
//! events beyond the field handles resolved when it is attached.

pub mod host;
pub mod memory;

pub use host::{EventKind, FormEvent, FormHost, Subscription};
pub use memory::{FieldRecord, InMemoryForm, ScriptedEvent};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::configuration::PageContext;
use crate::models::{
    names, EntityKind, FieldDescriptor, FieldHandle, FieldPolicy, InlineMessage, LifecycleAction,
    MessageTone, ParentLink,
};
use crate::rules::{
    compare, derive_common_name, resolve, CommonNameOutcome, FieldEnablementEngine, ParentResolution,
    PassphrasePair, PassphraseVerdict, NO_VALID_NAME_KEY, NO_VALID_NAME_WARNING,
};

/// Written into the CA passphrase on submit when it is not being changed
pub const PASSPHRASE_PLACEHOLDER: &str = "XXXXXXXXXXXXXXXXXXXXXXXXXX";

/// What the controller did in response to an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "reaction", rename_all = "snake_case")]
pub enum Reaction {
    Policy(FieldPolicy),
    Parent(ParentResolution),
    CommonName(CommonNameOutcome),
    Passphrase { pair: String, verdict: PassphraseVerdict },
    Submitted(SubmitOutcome),
    Ignored,
}

/// Effects of preparing the form for submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Number of fields switched back on
    pub reenabled: usize,
    pub placeholder_injected: bool,
}

/// Both halves of a passphrase pair present on the page
#[derive(Debug, Clone, Copy)]
struct WiredPair {
    pair: PassphrasePair,
    primary: FieldHandle,
    confirmation: FieldHandle,
}

/// Field handles the controller works with, resolved once
#[derive(Debug, Clone, Default)]
struct WiredFields {
    actions: Vec<(LifecycleAction, FieldHandle)>,
    common_name: Option<FieldHandle>,
    derived_name: Option<FieldHandle>,
    parent: Option<FieldHandle>,
    kind_selector: Option<FieldHandle>,
    parent_passphrase: Option<FieldHandle>,
    passphrase: Option<FieldHandle>,
    passphrase_verify: Option<FieldHandle>,
    pairs: Vec<WiredPair>,
}

/// Drives one certificate form
#[derive(Debug, Clone)]
pub struct FormController {
    context: PageContext,
    engine: FieldEnablementEngine,
    fields: Vec<FieldDescriptor>,
    wired: WiredFields,
}

impl FormController {
    /// Resolve the fields of `host` and perform the initial page setup
    pub fn attach<H: FormHost>(context: PageContext, host: &mut H) -> Self {
        let fields = host.fields();
        let find = |name: &str| fields.iter().find(|f| f.name == name).map(|f| f.handle);

        let mut wired = WiredFields {
            actions: fields
                .iter()
                .filter_map(|f| f.role.action().map(|action| (action, f.handle)))
                .collect(),
            common_name: find(names::COMMON_NAME),
            derived_name: find(names::NAME),
            parent: find(names::PARENT),
            kind_selector: find(names::TYPE),
            parent_passphrase: find(names::PARENT_PASSPHRASE),
            passphrase: find(names::PASSPHRASE),
            passphrase_verify: find(names::PASSPHRASE_VERIFY),
            pairs: Vec::new(),
        };

        if context.variant.has_confirmation_fields() {
            let mut candidates = Vec::new();
            if find(names::PKCS12_ENCODED).is_some() {
                candidates.push(PassphrasePair::PKCS12);
            }
            if context.is_creation_page {
                candidates.push(PassphrasePair::KEY);
            }
            for pair in candidates {
                if let (Some(primary), Some(confirmation)) = (find(pair.primary), find(pair.confirmation)) {
                    wired.pairs.push(WiredPair { pair, primary, confirmation });
                }
            }
        }

        let engine = FieldEnablementEngine::new(context.entity_kind, context.variant);
        let controller = Self { context, engine, fields, wired };

        debug!(
            kind = %controller.context.entity_kind,
            creation = controller.context.is_creation_page,
            fields = controller.fields.len(),
            pairs = controller.wired.pairs.len(),
            "attached form controller"
        );

        if controller.context.is_creation_page {
            controller.setup_creation_page(host);
        } else {
            controller.on_action_change(host);
        }

        controller
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Events the host has to forward to [`FormController::handle`]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        let mut subscriptions = Vec::new();

        if self.context.is_creation_page {
            if let Some(parent) = self.wired.parent {
                subscriptions.push(Subscription { target: Some(parent), events: vec![EventKind::Change] });
            }
            if let Some(common_name) = self.wired.common_name {
                subscriptions.push(Subscription {
                    target: Some(common_name),
                    events: vec![EventKind::Change, EventKind::KeyUp],
                });
            }
        } else {
            for (_, handle) in &self.wired.actions {
                subscriptions.push(Subscription { target: Some(*handle), events: vec![EventKind::Change] });
            }
        }

        for wired in &self.wired.pairs {
            for target in [wired.primary, wired.confirmation] {
                subscriptions.push(Subscription {
                    target: Some(target),
                    events: vec![EventKind::Change, EventKind::KeyUp, EventKind::Focus],
                });
            }
        }

        subscriptions.push(Subscription { target: None, events: vec![EventKind::Submit] });
        subscriptions
    }

    /// Dispatch one host event
    pub fn handle<H: FormHost>(&self, host: &mut H, event: FormEvent) -> Reaction {
        trace!(?event, "handling form event");

        if event == FormEvent::Submit {
            return Reaction::Submitted(self.on_submit(host));
        }
        let Some(target) = event.target() else {
            return Reaction::Ignored;
        };
        let kind = event.kind();

        if let Some(wired) = self.wired.pairs.iter().find(|p| p.primary == target || p.confirmation == target) {
            let verdict = self.apply_passphrase_pair(host, wired);
            return Reaction::Passphrase { pair: wired.pair.confirmation.to_string(), verdict };
        }

        if self.context.is_creation_page {
            if Some(target) == self.wired.common_name && matches!(kind, EventKind::Change | EventKind::KeyUp) {
                return Reaction::CommonName(self.on_common_name_input(host));
            }
            if Some(target) == self.wired.parent && kind == EventKind::Change {
                return Reaction::Parent(self.on_parent_change(host));
            }
        } else if kind == EventKind::Change && self.wired.actions.iter().any(|(_, h)| *h == target) {
            return Reaction::Policy(self.on_action_change(host));
        }

        Reaction::Ignored
    }

    /// Action currently checked; Update when nothing is
    pub fn selected_action<H: FormHost>(&self, host: &H) -> LifecycleAction {
        self.wired
            .actions
            .iter()
            .find(|(_, handle)| host.is_checked(*handle))
            .map(|(action, _)| *action)
            .unwrap_or_default()
    }

    fn action_handle(&self, action: LifecycleAction) -> Option<FieldHandle> {
        self.wired.actions.iter().find(|(a, _)| *a == action).map(|(_, h)| *h)
    }

    /// Recompute and apply the field policy for the selected action
    pub fn on_action_change<H: FormHost>(&self, host: &mut H) -> FieldPolicy {
        let selected = self.selected_action(host);
        let policy = self.engine.policy(selected, &self.fields);

        // Keep exactly one legal action checked
        if let Some(update) = self.action_handle(LifecycleAction::Update) {
            if policy.action == LifecycleAction::Update && !host.is_checked(update) {
                host.set_checked(update, true);
            }
        }

        for descriptor in &self.fields {
            if policy.clears(&descriptor.name) {
                host.set_value(descriptor.handle, "");
            }
        }

        for descriptor in &self.fields {
            let Some(state) = policy.fields.get(&descriptor.name) else {
                continue;
            };
            trace!(field = %descriptor.name, enabled = state.enabled, highlight = %state.highlight, "applying field state");
            host.set_enabled(descriptor.handle, state.enabled);
            host.set_highlight(descriptor.handle, state.highlight);
            if let Some(container) = state.container {
                host.set_container_highlight(descriptor.handle, container);
            }
        }

        if let Some(parent_passphrase) = self.wired.parent_passphrase {
            host.set_label_required(parent_passphrase, policy.parent_passphrase_required);
        }

        debug!(action = %policy.action, "applied action policy");
        policy
    }

    /// Re-resolve the parent selection and update the type selector
    pub fn on_parent_change<H: FormHost>(&self, host: &mut H) -> ParentResolution {
        let selection = self.wired.parent.map(|h| host.value(h)).unwrap_or_default();
        let parent = ParentLink::from_selection(&selection);
        let current = self.wired.kind_selector.map(|h| host.options(h)).unwrap_or_default();

        let resolution = resolve(self.context.entity_kind, parent.as_ref(), &current);

        if let Some(selector) = self.wired.kind_selector {
            host.set_options(selector, resolution.kind_options.clone());
        }
        if let Some(parent_passphrase) = self.wired.parent_passphrase {
            host.set_highlight(parent_passphrase, resolution.parent_passphrase_highlight);
            host.set_label_required(parent_passphrase, resolution.parent_passphrase_required);
        }

        debug!(root = resolution.is_root, "resolved parent selection");
        resolution
    }

    /// Derive the `name` field from the current common name
    pub fn on_common_name_input<H: FormHost>(&self, host: &mut H) -> CommonNameOutcome {
        let raw = self.wired.common_name.map(|h| host.value(h)).unwrap_or_default();
        let outcome = derive_common_name(&raw);

        if let Some(derived) = self.wired.derived_name {
            host.set_value(derived, &outcome.value);
            host.set_highlight(derived, outcome.highlight);
            if outcome.warning {
                host.show_message(InlineMessage {
                    key: NO_VALID_NAME_KEY.to_string(),
                    anchor: derived,
                    text: NO_VALID_NAME_WARNING.to_string(),
                    icon: None,
                    tone: MessageTone::Negative,
                });
            } else {
                host.remove_message(NO_VALID_NAME_KEY);
            }
        }

        outcome
    }

    /// Compare a passphrase pair and update its indicator
    pub fn on_passphrase_input<H: FormHost>(&self, host: &mut H, pair: PassphrasePair) -> Option<PassphraseVerdict> {
        self.wired
            .pairs
            .iter()
            .find(|w| w.pair == pair)
            .map(|wired| self.apply_passphrase_pair(host, wired))
    }

    fn apply_passphrase_pair<H: FormHost>(&self, host: &mut H, wired: &WiredPair) -> PassphraseVerdict {
        let verdict = compare(&host.value(wired.primary), &host.value(wired.confirmation));
        let display = verdict.display();
        let key = wired.pair.indicator_key();

        host.set_highlight(wired.primary, display.primary);
        host.set_highlight(wired.confirmation, display.confirmation);
        match display.indicator {
            Some((text, icon, tone)) => host.show_message(InlineMessage {
                key,
                anchor: wired.confirmation,
                text: text.to_string(),
                icon: Some(self.context.asset(icon)),
                tone,
            }),
            None => host.remove_message(&key),
        }

        trace!(pair = wired.pair.confirmation, %verdict, "compared passphrases");
        verdict
    }

    /// Prepare the form for posting.
    ///
    /// Disabled controls are not posted, so every field is switched back on.
    /// On an existing authority the passphrase gets a placeholder unless the
    /// operator is renewing.
    pub fn on_submit<H: FormHost>(&self, host: &mut H) -> SubmitOutcome {
        let mut placeholder_injected = false;
        if !self.context.is_creation_page
            && self.context.entity_kind == EntityKind::Authority
            && self.selected_action(host) != LifecycleAction::Renew
        {
            if let Some(passphrase) = self.wired.passphrase {
                host.set_value(passphrase, PASSPHRASE_PLACEHOLDER);
                placeholder_injected = true;
            }
        }

        for descriptor in &self.fields {
            host.set_enabled(descriptor.handle, true);
        }

        debug!(placeholder_injected, "form prepared for submission");
        SubmitOutcome { reenabled: self.fields.len(), placeholder_injected }
    }

    fn setup_creation_page<H: FormHost>(&self, host: &mut H) {
        for (action, handle) in &self.wired.actions {
            if *action != LifecycleAction::Create {
                host.set_enabled(*handle, false);
            }
        }

        if let Some(passphrase) = self.wired.passphrase {
            if self.context.entity_kind == EntityKind::Authority {
                host.set_label_required(passphrase, true);
            }
            if let Some(verify) = self.wired.passphrase_verify {
                let required = host.is_label_required(passphrase);
                host.set_label_required(verify, required);
            }
        }

        self.on_parent_change(host);
        self.on_common_name_input(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldState, Highlight, KindOption, PolicyVariant};

    fn existing(kind: EntityKind) -> (InMemoryForm, FormController) {
        let mut form = InMemoryForm::canonical(kind, PolicyVariant::Confirming);
        let controller = FormController::attach(PageContext::existing(kind), &mut form);
        (form, controller)
    }

    fn creation(kind: EntityKind) -> (InMemoryForm, FormController) {
        let mut form = InMemoryForm::canonical(kind, PolicyVariant::Confirming);
        form.check_action(LifecycleAction::Create).unwrap();
        let controller = FormController::attach(PageContext::creation(kind), &mut form);
        (form, controller)
    }

    fn select(form: &mut InMemoryForm, controller: &FormController, action: LifecycleAction) -> Reaction {
        let handle = form.check_action(action).unwrap();
        controller.handle(form, FormEvent::Change(handle))
    }

    fn type_into(form: &mut InMemoryForm, controller: &FormController, field: &str, value: &str) -> Reaction {
        let handle = form.enter(field, value).unwrap();
        controller.handle(form, FormEvent::KeyUp(handle))
    }

    fn enabled_data(form: &InMemoryForm) -> Vec<&str> {
        let mut names: Vec<&str> = form
            .records()
            .iter()
            .filter(|r| r.enabled && r.role.action().is_none())
            .map(|r| r.name.as_str())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_initial_load_defaults_to_update() {
        let (form, _) = existing(EntityKind::Authority);
        assert!(form.field("action_1").unwrap().checked);
        assert!(!form.field("action_0").unwrap().enabled);
        assert_eq!(enabled_data(&form), vec!["der_encoded", "description"]);
        assert_eq!(form.field("description").unwrap().highlight, Highlight::Pending);
        assert_eq!(form.field("common_name").unwrap().highlight, Highlight::Inactive);
    }

    #[test]
    fn test_update_on_credential_form() {
        let (mut form, controller) = existing(EntityKind::Credential);
        select(&mut form, &controller, LifecycleAction::Revoke);
        select(&mut form, &controller, LifecycleAction::Update);
        assert_eq!(
            enabled_data(&form),
            vec!["der_encoded", "description", "pkcs12_encoded", "pkcs12_passphrase", "pkcs12_passphrase_verify"]
        );
        assert_eq!(form.field("pkcs12_encoded").unwrap().container, Highlight::Pending);
        assert!(!form.field("parent_passphrase").unwrap().label_required);
    }

    #[test]
    fn test_revoke_on_authority_form() {
        let (mut form, controller) = existing(EntityKind::Authority);
        select(&mut form, &controller, LifecycleAction::Renew);
        assert_eq!(form.field("subcas_allowed").unwrap().container, Highlight::Pending);

        let reaction = select(&mut form, &controller, LifecycleAction::Revoke);
        assert!(matches!(reaction, Reaction::Policy(ref p) if p.action == LifecycleAction::Revoke));
        assert_eq!(enabled_data(&form), vec!["parent_passphrase"]);
        let subcas = form.field("subcas_allowed").unwrap();
        assert!(!subcas.enabled);
        assert_eq!(subcas.container, Highlight::Neutral);
        assert_eq!(form.field("der_encoded").unwrap().container, Highlight::Neutral);
        assert!(form.field("parent_passphrase").unwrap().label_required);
        for control in ["action_1", "action_2", "action_3"] {
            assert!(form.field(control).unwrap().enabled);
        }
    }

    #[test]
    fn test_renew_clears_passphrase() {
        let (mut form, controller) = existing(EntityKind::Authority);
        form.enter("passphrase", "old secret").unwrap();
        form.enter("passphrase_verify", "old secret").unwrap();
        select(&mut form, &controller, LifecycleAction::Renew);
        let passphrase = form.field("passphrase").unwrap();
        assert_eq!(passphrase.value, "");
        assert!(passphrase.enabled);
        let verify = form.field("passphrase_verify").unwrap();
        assert_eq!(verify.value, "");
        assert!(!verify.enabled);
        assert_eq!(verify.highlight, Highlight::Inactive);
        assert!(form.field("key_length").unwrap().enabled);
        assert!(!form.field("common_name").unwrap().enabled);
    }

    #[test]
    fn test_renew_then_update_resets_flag_rows() {
        let (mut form, controller) = existing(EntityKind::Authority);
        select(&mut form, &controller, LifecycleAction::Renew);
        assert_eq!(form.field("subcas_allowed").unwrap().container, Highlight::Pending);

        select(&mut form, &controller, LifecycleAction::Update);
        let subcas = form.field("subcas_allowed").unwrap();
        assert!(!subcas.enabled);
        assert_eq!(subcas.container, Highlight::Neutral);
        assert_eq!(form.field("der_encoded").unwrap().container, Highlight::Pending);
    }

    #[test]
    fn test_revoke_then_update_on_credential_rows() {
        let (mut form, controller) = existing(EntityKind::Credential);
        select(&mut form, &controller, LifecycleAction::Revoke);
        select(&mut form, &controller, LifecycleAction::Update);
        assert_eq!(form.field("pkcs12_encoded").unwrap().container, Highlight::Pending);
        assert!(form.field("pkcs12_encoded").unwrap().enabled);
    }

    #[test]
    fn test_create_selection_is_normalized() {
        let mut form = InMemoryForm::canonical(EntityKind::Credential, PolicyVariant::Confirming);
        form.check_action(LifecycleAction::Create).unwrap();
        let controller = FormController::attach(PageContext::existing(EntityKind::Credential), &mut form);
        assert!(form.field("action_1").unwrap().checked);
        assert!(!form.field("action_0").unwrap().checked);
        assert_eq!(controller.selected_action(&form), LifecycleAction::Update);
    }

    #[test]
    fn test_internal_fields_are_left_alone() {
        let mut form = InMemoryForm::canonical(EntityKind::Authority, PolicyVariant::Basic);
        form.register("_save", crate::models::FieldRole::Internal).unwrap();
        let controller = FormController::attach(PageContext::existing(EntityKind::Authority), &mut form);
        select(&mut form, &controller, LifecycleAction::Revoke);
        let internal = form.field("_save").unwrap();
        assert!(internal.enabled);
        assert_eq!(internal.highlight, Highlight::Neutral);
    }

    #[test]
    fn test_submit_injects_placeholder_for_authority() {
        let (mut form, controller) = existing(EntityKind::Authority);
        let reaction = controller.handle(&mut form, FormEvent::Submit);
        assert!(matches!(reaction, Reaction::Submitted(SubmitOutcome { placeholder_injected: true, .. })));
        assert_eq!(form.field("passphrase").unwrap().value, PASSPHRASE_PLACEHOLDER);
        assert!(form.records().iter().all(|r| r.enabled));
    }

    #[test]
    fn test_submit_keeps_passphrase_on_renew() {
        let (mut form, controller) = existing(EntityKind::Authority);
        select(&mut form, &controller, LifecycleAction::Renew);
        form.enter("passphrase", "new secret").unwrap();
        let outcome = controller.on_submit(&mut form);
        assert!(!outcome.placeholder_injected);
        assert_eq!(form.field("passphrase").unwrap().value, "new secret");
    }

    #[test]
    fn test_submit_never_touches_credential_passphrase() {
        let (mut form, controller) = existing(EntityKind::Credential);
        let outcome = controller.on_submit(&mut form);
        assert!(!outcome.placeholder_injected);
        assert_eq!(form.field("passphrase").unwrap().value, "");
        assert_eq!(outcome.reenabled, form.records().len());
    }

    #[test]
    fn test_creation_page_setup() {
        let (form, controller) = creation(EntityKind::Authority);
        assert!(form.field("action_0").unwrap().enabled);
        for control in ["action_1", "action_2", "action_3"] {
            assert!(!form.field(control).unwrap().enabled);
        }
        assert!(form.field("passphrase").unwrap().label_required);
        assert!(form.field("passphrase_verify").unwrap().label_required);
        assert!(!form.field("parent_passphrase").unwrap().label_required);
        assert_eq!(form.field("type").unwrap().value, KindOption::ROOT_VALUE);
        assert_eq!(controller.selected_action(&form), LifecycleAction::Create);
    }

    #[test]
    fn test_action_change_ignored_on_creation_page() {
        let (mut form, controller) = creation(EntityKind::Credential);
        let handle = form.check_action(LifecycleAction::Create).unwrap();
        assert_eq!(controller.handle(&mut form, FormEvent::Change(handle)), Reaction::Ignored);
    }

    #[test]
    fn test_parent_change_switches_kind() {
        let (mut form, controller) = creation(EntityKind::Authority);
        let parent = form.enter("parent", "4").unwrap();
        let first = controller.handle(&mut form, FormEvent::Change(parent));
        let second = controller.handle(&mut form, FormEvent::Change(parent));
        assert_eq!(first, second);

        let record = form.field("type").unwrap();
        assert_eq!(record.options, vec![KindOption::subordinate()]);
        assert_eq!(record.value, KindOption::SUBORDINATE_VALUE);
        let parent_passphrase = form.field("parent_passphrase").unwrap();
        assert!(parent_passphrase.label_required);
        assert_eq!(parent_passphrase.highlight, Highlight::Pending);

        form.enter("parent", "").unwrap();
        controller.handle(&mut form, FormEvent::Change(parent));
        assert_eq!(form.field("type").unwrap().options, vec![KindOption::root()]);
        assert!(!form.field("parent_passphrase").unwrap().label_required);
    }

    #[test]
    fn test_common_name_two_spaces() {
        let (mut form, controller) = creation(EntityKind::Credential);
        let reaction = type_into(&mut form, &controller, "common_name", "  ");
        assert!(matches!(reaction, Reaction::CommonName(_)));
        let name = form.field("name").unwrap();
        assert_eq!(name.value, "__");
        assert_eq!(name.highlight, Highlight::Success);
        assert!(form.message(NO_VALID_NAME_KEY).is_none());
    }

    #[test]
    fn test_common_name_warning_lifecycle() {
        let (mut form, controller) = creation(EntityKind::Authority);
        type_into(&mut form, &controller, "common_name", "###");
        type_into(&mut form, &controller, "common_name", "!!!");
        assert_eq!(form.messages().iter().filter(|m| m.key == NO_VALID_NAME_KEY).count(), 1);
        assert_eq!(form.field("name").unwrap().highlight, Highlight::Pending);

        type_into(&mut form, &controller, "common_name", "*.example.com");
        assert_eq!(form.field("name").unwrap().value, "asterisk.example.com");
        assert!(form.message(NO_VALID_NAME_KEY).is_none());

        type_into(&mut form, &controller, "common_name", "###");
        type_into(&mut form, &controller, "common_name", "");
        assert!(form.message(NO_VALID_NAME_KEY).is_none());
        assert_eq!(form.field("name").unwrap().highlight, Highlight::Neutral);
    }

    #[test]
    fn test_pkcs12_passphrase_indicator() {
        let (mut form, controller) = existing(EntityKind::Credential);
        type_into(&mut form, &controller, "pkcs12_passphrase", "secret");
        let key = PassphrasePair::PKCS12.indicator_key();
        let indicator = form.message(&key).unwrap();
        assert_eq!(indicator.text, "Mismatch");
        assert_eq!(indicator.icon.as_deref(), Some("/static/admin/img/admin/icon-no.gif"));
        assert_eq!(form.field("pkcs12_passphrase_verify").unwrap().highlight, Highlight::Error);

        let reaction = type_into(&mut form, &controller, "pkcs12_passphrase_verify", "secret");
        assert_eq!(
            reaction,
            Reaction::Passphrase { pair: "pkcs12_passphrase_verify".to_string(), verdict: PassphraseVerdict::Match }
        );
        assert_eq!(form.messages().len(), 1);
        assert_eq!(form.message(&key).unwrap().text, "Match");
        assert_eq!(form.field("pkcs12_passphrase").unwrap().highlight, Highlight::Success);

        form.enter("pkcs12_passphrase", "").unwrap();
        form.enter("pkcs12_passphrase_verify", "").unwrap();
        let focus = form.enter("pkcs12_passphrase", "").unwrap();
        controller.handle(&mut form, FormEvent::Focus(focus));
        assert!(form.message(&key).is_none());
        assert_eq!(form.field("pkcs12_passphrase_verify").unwrap().highlight, Highlight::Neutral);
    }

    #[test]
    fn test_key_passphrase_pair_only_on_creation_page() {
        let (mut form, controller) = existing(EntityKind::Authority);
        assert_eq!(controller.on_passphrase_input(&mut form, PassphrasePair::KEY), None);

        let (mut form, controller) = creation(EntityKind::Authority);
        form.enter("passphrase", "a").unwrap();
        assert_eq!(
            controller.on_passphrase_input(&mut form, PassphrasePair::KEY),
            Some(PassphraseVerdict::Mismatch)
        );
    }

    #[test]
    fn test_basic_variant_wires_no_pairs() {
        let mut form = InMemoryForm::canonical(EntityKind::Credential, PolicyVariant::Basic);
        let context = PageContext::existing(EntityKind::Credential).with_variant(PolicyVariant::Basic);
        let controller = FormController::attach(context, &mut form);
        assert_eq!(controller.on_passphrase_input(&mut form, PassphrasePair::PKCS12), None);
    }

    #[test]
    fn test_subscriptions() {
        let (_, controller) = existing(EntityKind::Credential);
        let subscriptions = controller.subscriptions();
        let action_subscriptions = subscriptions
            .iter()
            .filter(|s| s.events == vec![EventKind::Change])
            .count();
        assert_eq!(action_subscriptions, 4);
        let pair_subscriptions = subscriptions.iter().filter(|s| s.events.contains(&EventKind::Focus)).count();
        assert_eq!(pair_subscriptions, 2);
        assert!(subscriptions.iter().any(|s| s.target.is_none() && s.events == vec![EventKind::Submit]));

        let (_, controller) = creation(EntityKind::Authority);
        let subscriptions = controller.subscriptions();
        assert!(subscriptions.iter().any(|s| s.events == vec![EventKind::Change, EventKind::KeyUp]));
    }

    #[test]
    fn test_policy_application_matches_engine() {
        let (mut form, controller) = existing(EntityKind::Credential);
        let Reaction::Policy(policy) = select(&mut form, &controller, LifecycleAction::Renew) else {
            panic!("expected a policy");
        };
        for record in form.records() {
            let state: FieldState = policy.state(&record.name);
            assert_eq!(record.enabled, state.enabled, "{}", record.name);
            assert_eq!(record.highlight, state.highlight, "{}", record.name);
        }
    }
}
