//! Policy layer (package sets, signature allow-lists, composition).
//!
//! Every policy is an immutable decision table behind the [`Whitelist`]
//! trait. Tables are compiled once at startup and then shared read-only
//! (`Arc<dyn Whitelist>`) across every script-execution thread.

pub mod allowlist;
pub mod builtin;
pub mod package;
pub mod proxy;

use pipeguard_core::{AccessKind, Member};

pub use allowlist::StaticWhitelist;
pub use package::PackageWhitelist;
pub use proxy::{ProxyWhitelist, ProxyWhitelistBuilder};

/// Decision surface consulted by the sandbox before each reflective access.
///
/// Implementations must be pure: the same member always yields the same
/// answer, and a denial is a plain `false`, never an error.
pub trait Whitelist: Send + Sync {
    /// Label used in logs and for duplicate detection in a proxy.
    fn name(&self) -> &str;

    fn permits(&self, kind: AccessKind, member: &Member) -> bool;

    fn permits_method(&self, member: &Member) -> bool {
        self.permits(AccessKind::Method, member)
    }

    fn permits_constructor(&self, member: &Member) -> bool {
        self.permits(AccessKind::Constructor, member)
    }

    fn permits_static_method(&self, member: &Member) -> bool {
        self.permits(AccessKind::StaticMethod, member)
    }

    fn permits_field_get(&self, member: &Member) -> bool {
        self.permits(AccessKind::FieldGet, member)
    }

    fn permits_field_set(&self, member: &Member) -> bool {
        self.permits(AccessKind::FieldSet, member)
    }

    fn permits_static_field_get(&self, member: &Member) -> bool {
        self.permits(AccessKind::StaticFieldGet, member)
    }

    fn permits_static_field_set(&self, member: &Member) -> bool {
        self.permits(AccessKind::StaticFieldSet, member)
    }
}
