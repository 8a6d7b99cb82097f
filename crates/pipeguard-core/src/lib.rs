//! pipeguard core: access descriptors, the whitelist signature grammar, the
//! host type model, and the shared error surface.
//!
//! This crate carries no runtime or I/O dependencies so the same contracts can
//! be used by an embedded sandbox, the decision service, and test tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed whitelist text and inconsistent type models surface as
//! `GuardError` so a host never starts with a half-built policy.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod access;
pub mod error;
pub mod signature;

/// Shared result type.
pub use error::{ErrorCode, GuardError, Result};

pub use access::{AccessKind, Member, TypeModel, CONSTRUCTOR_NAME};
pub use signature::{MemberPattern, ParamPattern, Signature};
