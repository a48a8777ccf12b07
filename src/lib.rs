//! Client-side behavior of the PKI admin forms.
//!
//! The [`rules`] module holds the pure decisions (identifier sanitizing,
//! passphrase comparison, parent resolution and field enablement per
//! lifecycle action). The [`controller`] applies them to a form through the
//! [`controller::FormHost`] trait.

pub mod cli;
pub mod configuration;
pub mod controller;
pub mod models;
pub mod rules;
