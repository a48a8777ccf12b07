use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::configuration::{default_path, FormDocument, PageContext};
use crate::controller::{FormController, Reaction, ScriptedEvent};
use crate::models::{EntityKind, LifecycleAction, ParentLink, PolicyVariant};
use crate::rules::{self, canonical_fields, FieldEnablementEngine};

/// PKI Form - Inspect and replay the behavior of the certificate admin forms
#[derive(Parser)]
#[command(name = "pkiform")]
#[command(about = "Field rules of the PKI admin forms")]
#[command(long_about = "PKI Form - Evaluate the field rules of the certificate authority and certificate admin forms\n\nSet RUST_LOG to control log output (defaults to warn)")]
pub struct Cli {
    /// Log every rule decision
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive the identifier produced from a common name
    Sanitize { text: String },
    /// Compare a passphrase with its confirmation
    Compare { primary: String, confirmation: String },
    /// Print the field policy for an action
    Policy {
        #[arg(long)]
        kind: EntityKind,
        #[arg(long)]
        action: LifecycleAction,
        #[arg(long, default_value = "confirming")]
        variant: PolicyVariant,
    },
    /// Print the type options implied by a parent selection
    ResolveParent {
        #[arg(long)]
        kind: EntityKind,
        /// Selected parent; omit for a self-signed root
        #[arg(long)]
        parent: Option<String>,
    },
    /// Replay user events against a form and print its final state
    Simulate {
        /// Form document (JSON, YAML or TOML); defaults to the user config location
        #[arg(long)]
        form: Option<PathBuf>,
        /// Entity kind when no form document is available
        #[arg(long, default_value = "authority")]
        kind: EntityKind,
        /// Simulate the creation page when no form document is available
        #[arg(long)]
        creation: bool,
        /// Event such as `action:renew`, `parent:3`, `input:common_name=web`, `focus:passphrase` or `submit`
        #[arg(long = "event")]
        events: Vec<ScriptedEvent>,
    },
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Sanitize { text } => sanitize_text(&text),
        Commands::Compare { primary, confirmation } => compare_passphrases(&primary, &confirmation),
        Commands::Policy { kind, action, variant } => show_policy(kind, action, variant),
        Commands::ResolveParent { kind, parent } => resolve_parent(kind, parent.as_deref()),
        Commands::Simulate { form, kind, creation, events } => simulate(form.as_deref(), kind, creation, &events),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second initialization only happens in tests; ignore it
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn sanitize_text(text: &str) -> Result<()> {
    let outcome = rules::derive_common_name(text);
    println!("{}", outcome.value);
    if outcome.warning {
        eprintln!("⚠️  {}", rules::NO_VALID_NAME_WARNING);
    }
    Ok(())
}

fn compare_passphrases(primary: &str, confirmation: &str) -> Result<()> {
    println!("{}", rules::compare(primary, confirmation));
    Ok(())
}

fn show_policy(kind: EntityKind, action: LifecycleAction, variant: PolicyVariant) -> Result<()> {
    let engine = FieldEnablementEngine::new(kind, variant);
    let policy = engine.policy(action, &canonical_fields(kind, variant));
    println!("{}", serde_json::to_string_pretty(&policy)?);
    Ok(())
}

fn resolve_parent(kind: EntityKind, parent: Option<&str>) -> Result<()> {
    let parent = parent.and_then(ParentLink::from_selection);
    let current = vec![crate::models::KindOption::root()];
    let resolution = rules::resolve(kind, parent.as_ref(), &current);
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn load_document(form: Option<&Path>, kind: EntityKind, creation: bool) -> Result<FormDocument> {
    if let Some(path) = form {
        return FormDocument::load(path).with_context(|| format!("Failed to load form {}", path.display()));
    }
    if let Some(path) = default_path().filter(|p| p.exists()) {
        tracing::debug!(path = %path.display(), "using default form document");
        return FormDocument::load(&path).with_context(|| format!("Failed to load form {}", path.display()));
    }
    let context = if creation {
        PageContext::creation(kind)
    } else {
        PageContext::existing(kind)
    };
    Ok(FormDocument::canonical(context))
}

fn simulate(form: Option<&Path>, kind: EntityKind, creation: bool, events: &[ScriptedEvent]) -> Result<()> {
    let document = load_document(form, kind, creation)?;
    let (context, mut form) = document.into_form().context("Invalid form document")?;
    let controller = FormController::attach(context, &mut form);

    let mut reactions: Vec<Reaction> = Vec::with_capacity(events.len());
    for step in events {
        let event = form
            .perform(step)
            .with_context(|| format!("Cannot replay event {:?}", step))?;
        reactions.push(controller.handle(&mut form, event));
    }

    let report = serde_json::json!({
        "context": controller.context(),
        "reactions": reactions,
        "form": form,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
