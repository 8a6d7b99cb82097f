//! Built-in whitelist for the pipeline step library.
//!
//! Covers the packages the step classes live in plus the individual members
//! pipeline scripts need from the command helpers, step arguments, and the
//! script runtime (dynamic dispatch, `println`, map-entry accessors).

use std::sync::Arc;

use pipeguard_core::error::Result;

use super::{PackageWhitelist, ProxyWhitelist, StaticWhitelist};

pub const PACKAGES_NAME: &str = "pipeline-packages";
pub const SIGNATURES_NAME: &str = "pipeline-misc";

const PIPELINE_PACKAGES: &[&str] = &[
    "io.fabric8.utils",
    "org.apache.maven.model",
    "org.jenkinsci.plugins.fabric8",
    "org.jenkinsci.plugins.fabric8.helpers",
    "org.jenkinsci.plugins.fabric8.model",
    "org.jenkinsci.plugins.fabric8.steps",
];

const PIPELINE_SIGNATURES: &[&str] = &[
    "new org.jenkinsci.plugins.fabric8.Fabric8Commands",
    "new org.jenkinsci.plugins.fabric8.Utils",
    // step arguments
    "new org.jenkinsci.plugins.fabric8.steps.MavenFlow$Arguments",
    "method org.jenkinsci.plugins.fabric8.steps.MavenFlow$Arguments setPauseOnFailure boolean",
    "method org.jenkinsci.plugins.fabric8.steps.MavenFlow$Arguments setPauseOnSuccess boolean",
    "method org.jenkinsci.plugins.fabric8.steps.MavenFlow$Arguments setCdOrganisation java.lang.String",
    "method org.jenkinsci.plugins.fabric8.steps.MavenFlow$Arguments setCdBranches java.util.List",
    "method org.jenkinsci.plugins.fabric8.steps.MavenFlow$Arguments *",
    "staticMethod org.jenkinsci.plugins.fabric8.steps.MavenFlow perform org.jenkinsci.plugins.fabric8.Utils java.util.Map",
    // sh() goes through dynamic dispatch
    "method groovy.lang.GroovyObject invokeMethod java.lang.String java.lang.Object",
    "staticMethod org.codehaus.groovy.runtime.DefaultGroovyMethods println java.lang.Object java.lang.Object",
    "method org.jenkinsci.plugins.fabric8.CommandSupport updateEnvironment java.lang.Object",
    "method org.jenkinsci.plugins.fabric8.CommandSupport setEnv java.util.Map",
    "method org.jenkinsci.plugins.fabric8.CommandSupport setCurrentPath java.lang.String",
    "method org.jenkinsci.plugins.fabric8.CommandSupport setFileReadFacade org.jenkinsci.plugins.fabric8.FileReadFacade",
    "method org.jenkinsci.plugins.fabric8.CommandSupport setShellFacade org.jenkinsci.plugins.fabric8.ShellFacade",
    "method org.jenkinsci.plugins.fabric8.CommandSupport updateSh java.lang.Object",
    "method org.jenkinsci.plugins.fabric8.CommandSupport *",
    "method org.jenkinsci.plugins.fabric8.Utils setBranch java.lang.String",
    "method org.jenkinsci.plugins.fabric8.Utils *",
    "method java.util.Map$Entry getKey",
    "method java.util.Map$Entry getValue",
];

pub fn pipeline_packages() -> PackageWhitelist {
    PackageWhitelist::new(PACKAGES_NAME, PIPELINE_PACKAGES.iter().copied())
}

pub fn pipeline_signatures() -> Result<StaticWhitelist> {
    StaticWhitelist::from_entries(SIGNATURES_NAME, PIPELINE_SIGNATURES)
}

/// Package set and signature list combined.
pub fn pipeline_whitelist() -> Result<ProxyWhitelist> {
    Ok(ProxyWhitelist::builder("pipeline")
        .push(Arc::new(pipeline_packages()))
        .push(Arc::new(pipeline_signatures()?))
        .build())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::policy::Whitelist;
    use pipeguard_core::Member;

    #[test]
    fn builtin_signatures_compile() {
        let sigs = pipeline_signatures().unwrap();
        assert_eq!(sigs.entries().len(), PIPELINE_SIGNATURES.len());
    }

    #[test]
    fn script_affordances_are_granted() {
        let wl = pipeline_whitelist().unwrap();
        assert!(wl.permits_method(
            &Member::new("groovy.lang.GroovyObject", "invokeMethod")
                .with_params(["java.lang.String", "java.lang.Object"])
        ));
        assert!(wl.permits_static_method(
            &Member::new("org.codehaus.groovy.runtime.DefaultGroovyMethods", "println")
                .with_params(["java.lang.Object", "java.lang.Object"])
        ));
        assert!(wl.permits_method(&Member::new("java.util.Map$Entry", "getValue")));
        assert!(!wl.permits_method(&Member::new("java.util.Map$Entry", "setValue")
            .with_params(["java.lang.Object"])));
        assert!(!wl.permits_static_method(
            &Member::new("java.lang.Runtime", "getRuntime")
        ));
    }
}
