//! Shared application state for the decision service.
//!
//! Compiles the config into frozen decision tables once at startup. Any
//! malformed entry, unreadable whitelist file, or inconsistent type model
//! fails construction, so the service never runs with a partial policy.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use pipeguard_core::access::TypeDef;
use pipeguard_core::error::{GuardError, Result};
use pipeguard_core::signature::{parse_document, parse_entries};
use pipeguard_core::TypeModel;

use crate::config::{AllowlistConfig, GuardConfig, TypeConfig};
use crate::obs::metrics::GuardMetrics;
use crate::policy::{self, PackageWhitelist, ProxyWhitelist, StaticWhitelist};

#[derive(Clone)]
pub struct AppState {
    whitelist: Arc<ProxyWhitelist>,
    types: Arc<TypeModel>,
    metrics: Arc<GuardMetrics>,
}

impl AppState {
    /// Build application state. Relative whitelist files resolve against `base_dir`.
    pub fn new(cfg: &GuardConfig, base_dir: &Path) -> Result<Self> {
        let mut builder = ProxyWhitelist::builder("root");

        // 1) Built-in step library whitelist
        if cfg.builtin {
            builder = builder.push(Arc::new(policy::builtin::pipeline_whitelist()?));
        }

        // 2) Trusted packages
        if !cfg.packages.is_empty() {
            builder = builder.push(Arc::new(PackageWhitelist::new(
                "packages",
                cfg.packages.iter().cloned(),
            )));
        }

        // 3) Signature allow-lists, one constituent each
        for a in &cfg.allowlists {
            let wl = compile_allowlist(a, base_dir).map_err(|e| {
                GuardError::BadConfig(format!("allowlist {} compile failed: {e}", a.name))
            })?;
            builder = builder.push(Arc::new(wl));
        }

        let whitelist = builder.build();
        let types = compile_types(&cfg.types)?;

        tracing::info!(
            constituents = whitelist.len(),
            types = types.len(),
            "whitelist compiled"
        );

        Ok(Self {
            whitelist: Arc::new(whitelist),
            types: Arc::new(types),
            metrics: Arc::new(GuardMetrics::default()),
        })
    }

    pub fn whitelist(&self) -> Arc<ProxyWhitelist> {
        Arc::clone(&self.whitelist)
    }

    pub fn types(&self) -> &TypeModel {
        &self.types
    }

    pub fn metrics(&self) -> &GuardMetrics {
        &self.metrics
    }
}

fn compile_allowlist(a: &AllowlistConfig, base_dir: &Path) -> Result<StaticWhitelist> {
    let mut sigs = parse_entries(&a.entries)?;
    for file in &a.files {
        let path = base_dir.join(file);
        let text = fs::read_to_string(&path).map_err(|e| {
            GuardError::Internal(format!("read {} failed: {e}", path.display()))
        })?;
        let parsed = parse_document(&text).map_err(|e| {
            GuardError::BadConfig(format!("{}: {e}", path.display()))
        })?;
        sigs.extend(parsed);
    }
    Ok(StaticWhitelist::from_signatures(a.name.clone(), sigs))
}

fn compile_types(types: &[TypeConfig]) -> Result<TypeModel> {
    let mut builder = TypeModel::builder();
    for t in types {
        let mut def = TypeDef::new(t.name.clone());
        if let Some(sup) = &t.extends {
            def = def.extends(sup.clone());
        }
        for i in &t.implements {
            def = def.implements(i.clone());
        }
        for c in &t.constructors {
            let params: Vec<&str> = c.split_ascii_whitespace().collect();
            def = def.constructor(&params);
        }
        for m in &t.methods {
            let (name, params) = split_method(&t.name, m)?;
            def = def.method(name, &params);
        }
        for m in &t.static_methods {
            let (name, params) = split_method(&t.name, m)?;
            def = def.static_method(name, &params);
        }
        for f in &t.fields {
            def = def.field(f);
        }
        for f in &t.static_fields {
            def = def.static_field(f);
        }
        builder = builder.add(def);
    }
    builder.build()
}

fn split_method<'a>(owner: &str, decl: &'a str) -> Result<(&'a str, Vec<&'a str>)> {
    let mut tokens = decl.split_ascii_whitespace();
    let name = tokens.next().ok_or_else(|| {
        GuardError::BadConfig(format!("types: {owner} has an empty method declaration"))
    })?;
    Ok((name, tokens.collect()))
}
