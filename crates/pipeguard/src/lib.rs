//! Top-level facade crate for pipeguard.
//!
//! Re-exports core types and the whitelist library so users can depend on a single crate.

pub mod core {
    pub use pipeguard_core::*;
}

pub mod whitelist {
    pub use pipeguard_whitelist::*;
}
