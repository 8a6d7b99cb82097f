//! Signature allow-list compilation and matching.
//!
//! Entries follow the grammar in `pipeguard_core::signature` and are parsed
//! eagerly: a single malformed entry fails the whole list.

use pipeguard_core::error::Result;
use pipeguard_core::signature::{parse_document, parse_entries};
use pipeguard_core::{AccessKind, Member, MemberPattern, Signature};

use super::Whitelist;

/// Compiled signature allow-list.
#[derive(Debug, Clone)]
pub struct StaticWhitelist {
    name: String,
    entries: Vec<Signature>,
}

impl StaticWhitelist {
    /// Compile literal entries such as `"new org.acme.Utils"`.
    pub fn from_entries<I, S>(name: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_signatures(name, parse_entries(entries)?))
    }

    /// Compile a document with one entry per line.
    pub fn from_document(name: impl Into<String>, text: &str) -> Result<Self> {
        Ok(Self::from_signatures(name, parse_document(text)?))
    }

    pub fn from_signatures(name: impl Into<String>, entries: Vec<Signature>) -> Self {
        let wl = Self {
            name: name.into(),
            entries,
        };
        for sig in wl.blanket_grants() {
            tracing::info!(whitelist = %wl.name, entry = %sig, "blanket grant on type");
        }
        tracing::debug!(whitelist = %wl.name, entries = wl.entries.len(), "allow-list compiled");
        wl
    }

    /// Existential match on kind, owner type, member name and parameters.
    pub fn permit(&self, kind: AccessKind, owner: &str, name: &str, params: &[String]) -> bool {
        self.entries
            .iter()
            .any(|s| s.matches(kind, owner, name, params))
    }

    pub fn entries(&self) -> &[Signature] {
        &self.entries
    }

    /// Entries that grant every member of a kind on their owner type.
    pub fn blanket_grants(&self) -> impl Iterator<Item = &Signature> {
        self.entries
            .iter()
            .filter(|s| s.kind != AccessKind::Constructor && s.member == MemberPattern::Any)
    }
}

impl Whitelist for StaticWhitelist {
    fn name(&self) -> &str {
        &self.name
    }

    fn permits(&self, kind: AccessKind, member: &Member) -> bool {
        self.entries.iter().any(|s| s.matches_member(kind, member))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wildcard_overload_keeps_name() {
        let wl = StaticWhitelist::from_entries("t", ["method pkg.Type name *"]).unwrap();
        assert!(wl.permit(AccessKind::Method, "pkg.Type", "name", &[]));
        assert!(wl.permit(AccessKind::Method, "pkg.Type", "name", &strs(&["int", "int"])));
        assert!(!wl.permit(AccessKind::Method, "pkg.Type", "other", &[]));
    }

    #[test]
    fn override_chain_is_consulted() {
        let wl = StaticWhitelist::from_entries("t", ["method a.T run"]).unwrap();
        let overriding = Member::new("a.S", "run").with_overridden_in(["a.T"]);
        assert!(wl.permits_method(&overriding));
        assert!(!wl.permits_method(&Member::new("a.S", "run")));
    }

    #[test]
    fn blanket_grants_are_listed() {
        let wl = StaticWhitelist::from_entries(
            "t",
            ["new a.T", "method a.T *", "method a.T run", "field a.T *"],
        )
        .unwrap();
        let grants: Vec<String> = wl.blanket_grants().map(|s| s.to_string()).collect();
        assert_eq!(grants, vec!["method a.T *", "fieldGet a.T *", "fieldSet a.T *"]);
    }
}
