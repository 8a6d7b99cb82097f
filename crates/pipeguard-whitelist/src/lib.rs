//! pipeguard whitelist library entry.
//!
//! This crate wires the policy tables, config loading, the built-in pipeline
//! whitelist, and the JSON-lines decision service into one stack. It is
//! consumed by the binary (`main.rs`), by sandboxes embedding the policies
//! directly, and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod guard;
pub mod obs;
pub mod policy;

pub use policy::{PackageWhitelist, ProxyWhitelist, StaticWhitelist, Whitelist};
