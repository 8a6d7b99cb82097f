//! Whitelist signature entries.
//!
//! Entries are human-authored strings such as
//! `method org.acme.Utils setBranch java.lang.String`. They are parsed once
//! (see [`parse`]) into [`Signature`] values and matched structurally; nothing
//! is re-parsed per access check.

pub mod parse;

use std::fmt;

use crate::access::{AccessKind, Member};

pub use parse::{parse_document, parse_entries, parse_entry};

/// Member name part of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberPattern {
    /// `*`: every member of the given kind on the owner type.
    Any,
    Named(String),
}

/// Parameter list part of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamPattern {
    /// Omitted or `*`.
    Any,
    Exact(Vec<String>),
}

/// One parsed allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub kind: AccessKind,
    pub owner: String,
    pub member: MemberPattern,
    pub params: ParamPattern,
}

impl Signature {
    /// Structural match against one (owner, name, params) triple.
    pub fn matches(&self, kind: AccessKind, owner: &str, name: &str, params: &[String]) -> bool {
        if self.kind != kind || self.owner != owner {
            return false;
        }
        let name_ok = match &self.member {
            MemberPattern::Any => true,
            MemberPattern::Named(n) => n == name,
        };
        if !name_ok {
            return false;
        }
        match &self.params {
            ParamPattern::Any => true,
            ParamPattern::Exact(p) => p.as_slice() == params,
        }
    }

    /// Match a resolved member, trying the declaring type and then each type
    /// in its override chain. The runtime type is never consulted.
    pub fn matches_member(&self, kind: AccessKind, member: &Member) -> bool {
        member
            .declaring_chain()
            .any(|owner| self.matches(kind, owner, &member.name, &member.params))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.owner)?;
        if self.kind != AccessKind::Constructor {
            match &self.member {
                MemberPattern::Any => f.write_str(" *")?,
                MemberPattern::Named(n) => write!(f, " {n}")?,
            }
        }
        if let ParamPattern::Exact(params) = &self.params {
            for p in params {
                write!(f, " {p}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(kind: AccessKind, owner: &str, member: MemberPattern, params: ParamPattern) -> Signature {
        Signature {
            kind,
            owner: owner.to_string(),
            member,
            params,
        }
    }

    #[test]
    fn exact_params_match_by_position_and_count() {
        let s = sig(
            AccessKind::Method,
            "a.T",
            MemberPattern::Named("m".into()),
            ParamPattern::Exact(vec!["int".into(), "java.lang.String".into()]),
        );
        let ok = vec!["int".to_string(), "java.lang.String".to_string()];
        let swapped = vec!["java.lang.String".to_string(), "int".to_string()];
        assert!(s.matches(AccessKind::Method, "a.T", "m", &ok));
        assert!(!s.matches(AccessKind::Method, "a.T", "m", &swapped));
        assert!(!s.matches(AccessKind::Method, "a.T", "m", &ok[..1]));
    }

    #[test]
    fn kind_must_agree() {
        let s = sig(
            AccessKind::Method,
            "a.T",
            MemberPattern::Any,
            ParamPattern::Any,
        );
        assert!(!s.matches(AccessKind::StaticMethod, "a.T", "m", &[]));
    }

    #[test]
    fn display_is_canonical() {
        let s = sig(
            AccessKind::Constructor,
            "a.T",
            MemberPattern::Any,
            ParamPattern::Exact(vec!["int".into()]),
        );
        assert_eq!(s.to_string(), "new a.T int");
        let s = sig(
            AccessKind::Method,
            "a.T",
            MemberPattern::Named("m".into()),
            ParamPattern::Any,
        );
        assert_eq!(s.to_string(), "method a.T m");
    }
}
