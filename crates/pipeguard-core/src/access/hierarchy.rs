//! Static host type model used to resolve members to their declaring type.
//!
//! A sandbox that cannot (or should not) trust runtime reflection can describe
//! the host types it exposes up front. The model is validated once on
//! [`TypeModelBuilder::build`] and is read-only afterwards.
//!
//! Resolution rules:
//! - Constructors never inherit; they resolve only on the runtime type.
//! - Instance members search the superclass chain first, then interfaces
//!   breadth first. Static methods skip interfaces.
//! - Only instance methods carry an override chain. Fields and static members
//!   hide rather than override, so they resolve to exactly one type.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::error::{GuardError, Result};

use super::{AccessKind, Member, MemberKind};

/// A member as declared on one host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredMember {
    pub kind: MemberKind,
    pub name: String,
    pub params: Vec<String>,
}

impl DeclaredMember {
    fn matches(&self, kind: MemberKind, name: &str, params: &[String]) -> bool {
        if self.kind != kind {
            return false;
        }
        match kind {
            MemberKind::Constructor => self.params == params,
            MemberKind::Method | MemberKind::StaticMethod => {
                self.name == name && self.params == params
            }
            MemberKind::Field | MemberKind::StaticField => self.name == name,
        }
    }
}

/// Description of one host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub members: Vec<DeclaredMember>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn constructor(self, params: &[&str]) -> Self {
        self.declare(MemberKind::Constructor, super::CONSTRUCTOR_NAME, params)
    }

    pub fn method(self, name: &str, params: &[&str]) -> Self {
        self.declare(MemberKind::Method, name, params)
    }

    pub fn static_method(self, name: &str, params: &[&str]) -> Self {
        self.declare(MemberKind::StaticMethod, name, params)
    }

    pub fn field(self, name: &str) -> Self {
        self.declare(MemberKind::Field, name, &[])
    }

    pub fn static_field(self, name: &str) -> Self {
        self.declare(MemberKind::StaticField, name, &[])
    }

    fn declare(mut self, kind: MemberKind, name: &str, params: &[&str]) -> Self {
        self.members.push(DeclaredMember {
            kind,
            name: name.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
        });
        self
    }

    fn declares(&self, kind: MemberKind, name: &str, params: &[String]) -> bool {
        self.members.iter().any(|m| m.matches(kind, name, params))
    }

    fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.superclass
            .iter()
            .chain(self.interfaces.iter())
            .map(String::as_str)
    }
}

/// Collects type definitions; validation happens in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct TypeModelBuilder {
    defs: Vec<TypeDef>,
}

impl TypeModelBuilder {
    pub fn add(mut self, def: TypeDef) -> Self {
        self.defs.push(def);
        self
    }

    /// Freeze the model. Fails on duplicate types, unknown supertypes, or
    /// inheritance cycles.
    pub fn build(self) -> Result<TypeModel> {
        let mut types = BTreeMap::new();
        for def in self.defs {
            if types.contains_key(&def.name) {
                return Err(GuardError::TypeModel(format!(
                    "duplicate type: {}",
                    def.name
                )));
            }
            types.insert(def.name.clone(), def);
        }

        for def in types.values() {
            for sup in def.supertypes() {
                if !types.contains_key(sup) {
                    return Err(GuardError::TypeModel(format!(
                        "type {} refers to unknown supertype {sup}",
                        def.name
                    )));
                }
            }
        }

        let model = TypeModel { types };
        model.check_acyclic()?;
        tracing::debug!(types = model.types.len(), "type model built");
        Ok(model)
    }
}

/// Immutable registry of host types.
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    types: BTreeMap<String, TypeDef>,
}

impl TypeModel {
    pub fn builder() -> TypeModelBuilder {
        TypeModelBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve an access made through an instance (or class) of
    /// `runtime_type` to the member's declaring type.
    pub fn resolve(
        &self,
        runtime_type: &str,
        kind: AccessKind,
        name: &str,
        params: &[String],
    ) -> Option<Member> {
        let mk = kind.member_kind();
        let runtime = self.types.get(runtime_type)?;

        if mk == MemberKind::Constructor {
            return runtime
                .declares(mk, name, params)
                .then(|| Member::constructor(runtime_type).with_params(params.iter().cloned()));
        }

        let lineage = self.lineage(runtime_type, mk != MemberKind::StaticMethod);
        let mut declaring = lineage
            .iter()
            .filter(|t| self.types.get(**t).is_some_and(|d| d.declares(mk, name, params)));

        let first = declaring.next()?;
        let member = Member::new(*first, name).with_params(params.iter().cloned());
        if mk == MemberKind::Method {
            Some(member.with_overridden_in(declaring.copied()))
        } else {
            Some(member)
        }
    }

    /// Runtime type, its superclass chain, then interfaces breadth first.
    fn lineage<'a>(&'a self, start: &'a str, with_interfaces: bool) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();

        let mut cur = Some(start);
        while let Some(name) = cur {
            if !seen.insert(name) {
                break;
            }
            out.push(name);
            cur = self
                .types
                .get(name)
                .and_then(|d| d.superclass.as_deref());
        }

        if with_interfaces {
            let mut queue: VecDeque<&str> = out
                .iter()
                .filter_map(|n| self.types.get(*n))
                .flat_map(|d| d.interfaces.iter().map(String::as_str))
                .collect();
            while let Some(name) = queue.pop_front() {
                if !seen.insert(name) {
                    continue;
                }
                out.push(name);
                if let Some(d) = self.types.get(name) {
                    queue.extend(d.interfaces.iter().map(String::as_str));
                }
            }
        }
        out
    }

    fn check_acyclic(&self) -> Result<()> {
        // 0 = unvisited, 1 = on stack, 2 = done
        let mut state: BTreeMap<&str, u8> = BTreeMap::new();
        for root in self.types.keys() {
            if state.get(root.as_str()).copied().unwrap_or(0) != 0 {
                continue;
            }
            let mut stack: Vec<(&str, Vec<&str>)> = Vec::new();
            state.insert(root.as_str(), 1);
            stack.push((root.as_str(), self.supers_of(root)));

            while let Some((node, pending)) = stack.last_mut() {
                let node = *node;
                match pending.pop() {
                    Some(next) => match state.get(next).copied().unwrap_or(0) {
                        0 => {
                            state.insert(next, 1);
                            let supers = self.supers_of(next);
                            stack.push((next, supers));
                        }
                        1 => {
                            return Err(GuardError::TypeModel(format!(
                                "inheritance cycle through {next}"
                            )));
                        }
                        _ => {}
                    },
                    None => {
                        state.insert(node, 2);
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    fn supers_of(&self, name: &str) -> Vec<&str> {
        self.types
            .get(name)
            .map(|d| d.supertypes().collect())
            .unwrap_or_default()
    }
}
