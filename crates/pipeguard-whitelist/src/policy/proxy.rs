//! Composite policy: permitted iff any constituent permits.

use std::sync::Arc;

use pipeguard_core::{AccessKind, Member};

use super::Whitelist;

/// Append-only builder. Constituents are never replaced, even on a name clash.
pub struct ProxyWhitelistBuilder {
    name: String,
    members: Vec<Arc<dyn Whitelist>>,
}

impl ProxyWhitelistBuilder {
    pub fn push(mut self, whitelist: Arc<dyn Whitelist>) -> Self {
        if self.members.iter().any(|m| m.name() == whitelist.name()) {
            tracing::warn!(
                proxy = %self.name,
                whitelist = %whitelist.name(),
                "duplicate whitelist name, keeping both"
            );
        }
        self.members.push(whitelist);
        self
    }

    pub fn build(self) -> ProxyWhitelist {
        tracing::debug!(proxy = %self.name, constituents = self.members.len(), "proxy whitelist built");
        ProxyWhitelist {
            name: self.name,
            members: self.members,
        }
    }
}

/// Frozen union of independently defined whitelists.
pub struct ProxyWhitelist {
    name: String,
    members: Vec<Arc<dyn Whitelist>>,
}

impl ProxyWhitelist {
    pub fn builder(name: impl Into<String>) -> ProxyWhitelistBuilder {
        ProxyWhitelistBuilder {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn constituents(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Whitelist for ProxyWhitelist {
    fn name(&self) -> &str {
        &self.name
    }

    fn permits(&self, kind: AccessKind, member: &Member) -> bool {
        self.members.iter().any(|m| m.permits(kind, member))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::policy::{PackageWhitelist, StaticWhitelist};

    #[test]
    fn empty_proxy_denies() {
        let p = ProxyWhitelist::builder("empty").build();
        assert!(!p.permits_method(&Member::new("a.T", "run")));
    }

    #[test]
    fn duplicate_names_do_not_mask() {
        let first = StaticWhitelist::from_entries("misc", ["method a.T run"]).unwrap();
        let second = StaticWhitelist::from_entries("misc", ["method b.U stop"]).unwrap();
        let p = ProxyWhitelist::builder("all")
            .push(Arc::new(first))
            .push(Arc::new(second))
            .build();
        assert_eq!(p.len(), 2);
        assert!(p.permits_method(&Member::new("a.T", "run")));
        assert!(p.permits_method(&Member::new("b.U", "stop")));
    }

    #[test]
    fn proxies_nest() {
        let inner = ProxyWhitelist::builder("inner")
            .push(Arc::new(PackageWhitelist::new("pkgs", ["org.acme"])))
            .build();
        let outer = ProxyWhitelist::builder("outer").push(Arc::new(inner)).build();
        assert!(outer.permits_static_field_get(&Member::new("org.acme.Config", "DEFAULT")));
        assert_eq!(outer.constituents().collect::<Vec<_>>(), vec!["inner"]);
    }
}
