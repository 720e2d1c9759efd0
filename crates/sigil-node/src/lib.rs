//! Sigil SSO node.
//!
//! Wires the authentication engine to an HTTP API and owns process-level
//! concerns: configuration, logging, and app provisioning.

pub mod api;
pub mod config;
pub mod observability;
