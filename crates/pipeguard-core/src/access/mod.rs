//! Access descriptors handed from the sandbox to the whitelist.
//!
//! A reflective access is described by an [`AccessKind`] plus a [`Member`]
//! value resolved against the member's *declaring* type. Policies only ever
//! see these descriptors; how the sandbox produces them (live reflection, or
//! the static [`TypeModel`]) is its own business.

pub mod hierarchy;
pub mod member;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use hierarchy::{DeclaredMember, TypeDef, TypeModel, TypeModelBuilder};
pub use member::{package_of, Member, CONSTRUCTOR_NAME};

/// The seven reflective access forms a sandbox can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessKind {
    Method,
    #[serde(alias = "new")]
    Constructor,
    StaticMethod,
    FieldGet,
    FieldSet,
    StaticFieldGet,
    StaticFieldSet,
}

impl AccessKind {
    pub const ALL: [AccessKind; 7] = [
        AccessKind::Method,
        AccessKind::Constructor,
        AccessKind::StaticMethod,
        AccessKind::FieldGet,
        AccessKind::FieldSet,
        AccessKind::StaticFieldGet,
        AccessKind::StaticFieldSet,
    ];

    /// Name used in the signature grammar and in metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessKind::Method => "method",
            AccessKind::Constructor => "new",
            AccessKind::StaticMethod => "staticMethod",
            AccessKind::FieldGet => "fieldGet",
            AccessKind::FieldSet => "fieldSet",
            AccessKind::StaticFieldGet => "staticFieldGet",
            AccessKind::StaticFieldSet => "staticFieldSet",
        }
    }

    /// Kinds that carry a parameter list.
    pub fn is_invocation(self) -> bool {
        matches!(
            self,
            AccessKind::Method | AccessKind::Constructor | AccessKind::StaticMethod
        )
    }

    /// Which declared member shape this access targets.
    pub fn member_kind(self) -> MemberKind {
        match self {
            AccessKind::Method => MemberKind::Method,
            AccessKind::Constructor => MemberKind::Constructor,
            AccessKind::StaticMethod => MemberKind::StaticMethod,
            AccessKind::FieldGet | AccessKind::FieldSet => MemberKind::Field,
            AccessKind::StaticFieldGet | AccessKind::StaticFieldSet => MemberKind::StaticField,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a member as declared on a host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    StaticMethod,
    Constructor,
    Field,
    StaticField,
}
