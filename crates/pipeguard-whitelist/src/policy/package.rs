//! Package-set policy: trust every member declared in an allowed package.

use std::collections::HashSet;

use pipeguard_core::{AccessKind, Member};

use super::Whitelist;

/// Exact-match package allow-list.
///
/// `org.acme` does not cover `org.acme.evil`, and the reverse holds too.
/// Only the declaring type's package is consulted.
#[derive(Debug, Clone)]
pub struct PackageWhitelist {
    name: String,
    packages: HashSet<String>,
}

impl PackageWhitelist {
    pub fn new<I, S>(name: impl Into<String>, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn permit(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Whitelist for PackageWhitelist {
    fn name(&self) -> &str {
        &self.name
    }

    fn permits(&self, _kind: AccessKind, member: &Member) -> bool {
        self.permit(member.package())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let p = PackageWhitelist::new("pkgs", ["org.acme"]);
        assert!(p.permit("org.acme"));
        assert!(!p.permit("org.acme.evil"));
        assert!(!p.permit("org"));
        assert!(!p.permit("org.acmeevil"));
    }

    #[test]
    fn every_kind_keys_on_declaring_package() {
        let p = PackageWhitelist::new("pkgs", ["org.acme.steps"]);
        let inside = Member::new("org.acme.steps.Tag", "apply");
        let outside = Member::new("org.acme.Tag", "apply").with_overridden_in(["org.acme.steps.Base"]);
        for kind in AccessKind::ALL {
            assert!(p.permits(kind, &inside), "{kind}");
            assert!(!p.permits(kind, &outside), "{kind}");
        }
    }
}
