use std::collections::HashSet;

use serde::Deserialize;
use pipeguard_core::error::{GuardError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    pub version: u32,

    /// Include the built-in pipeline step whitelist.
    #[serde(default)]
    pub builtin: bool,

    #[serde(default)]
    pub packages: Vec<String>,

    #[serde(default)]
    pub allowlists: Vec<AllowlistConfig>,

    /// Host types used to resolve runtime types to declaring types.
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

impl GuardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GuardError::UnsupportedVersion);
        }

        for p in &self.packages {
            if p.is_empty() || p.chars().any(char::is_whitespace) {
                return Err(GuardError::BadConfig(format!(
                    "packages: invalid package name {p:?}"
                )));
            }
        }

        let mut names = HashSet::new();
        for a in &self.allowlists {
            a.validate()?;
            if !names.insert(a.name.as_str()) {
                return Err(GuardError::BadConfig(format!(
                    "allowlists: duplicate name {}",
                    a.name
                )));
            }
        }

        let grants_nothing = !self.builtin
            && self.packages.is_empty()
            && self.allowlists.iter().all(AllowlistConfig::is_empty);
        if grants_nothing {
            return Err(GuardError::BadConfig(
                "config grants nothing: enable builtin, or list packages or allowlist entries".into(),
            ));
        }

        for t in &self.types {
            t.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllowlistConfig {
    pub name: String,

    /// Literal signature entries.
    #[serde(default)]
    pub entries: Vec<String>,

    /// Whitelist documents, one entry per line, relative to the config file.
    #[serde(default)]
    pub files: Vec<String>,
}

impl AllowlistConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GuardError::BadConfig("allowlists: name must not be empty".into()));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.files.is_empty()
    }
}

/// One host type. Methods are written `name [param...]`, constructors as
/// their parameter list (empty string for the no-arg constructor).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    pub name: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub constructors: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub static_methods: Vec<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub static_fields: Vec<String>,
}

impl TypeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GuardError::BadConfig("types: name must not be empty".into()));
        }
        for f in self.fields.iter().chain(&self.static_fields) {
            if !is_member_name(f) {
                return Err(GuardError::BadConfig(format!(
                    "types: {} declares invalid field name {f:?}",
                    self.name
                )));
            }
        }
        for m in self.methods.iter().chain(&self.static_methods) {
            let name = m.split_ascii_whitespace().next().unwrap_or("");
            if !is_member_name(name) {
                return Err(GuardError::BadConfig(format!(
                    "types: {} declares invalid method {m:?}",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

fn is_member_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
