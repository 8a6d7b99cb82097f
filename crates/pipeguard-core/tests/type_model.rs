//! Declaring-type resolution over a static host type model.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pipeguard_core::access::TypeDef;
use pipeguard_core::{AccessKind, ErrorCode, TypeModel};

fn params(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn model() -> TypeModel {
    TypeModel::builder()
        .add(TypeDef::new("java.lang.Object").method("toString", &[]))
        .add(TypeDef::new("java.lang.Runnable").method("run", &[]))
        .add(
            TypeDef::new("org.acme.Base")
                .extends("java.lang.Object")
                .implements("java.lang.Runnable")
                .constructor(&[])
                .method("run", &[])
                .method("deleteAll", &[])
                .field("name")
                .static_method("create", &["java.lang.String"]),
        )
        .add(
            TypeDef::new("org.acme.steps.Derived")
                .extends("org.acme.Base")
                .constructor(&["java.lang.String"])
                .method("run", &[])
                .field("name"),
        )
        .build()
        .expect("model must build")
}

#[test]
fn lookup_returns_declared_shape() {
    let model = model();
    assert_eq!(model.len(), 4);
    let derived = model.get("org.acme.steps.Derived").unwrap();
    assert_eq!(derived.superclass.as_deref(), Some("org.acme.Base"));
    assert_eq!(derived.members.len(), 3);
    assert!(model.get("org.acme.Missing").is_none());
}

#[test]
fn inherited_method_resolves_to_declaring_type() {
    let m = model()
        .resolve("org.acme.steps.Derived", AccessKind::Method, "deleteAll", &[])
        .unwrap();
    assert_eq!(m.declaring_type, "org.acme.Base");
    assert!(m.overridden_in.is_empty());
    assert_eq!(m.package(), "org.acme");
}

#[test]
fn override_chain_walks_superclasses_then_interfaces() {
    let m = model()
        .resolve("org.acme.steps.Derived", AccessKind::Method, "run", &[])
        .unwrap();
    assert_eq!(m.declaring_type, "org.acme.steps.Derived");
    assert_eq!(m.overridden_in, vec!["org.acme.Base", "java.lang.Runnable"]);
}

#[test]
fn constructors_do_not_inherit() {
    let model = model();
    assert!(model
        .resolve("org.acme.steps.Derived", AccessKind::Constructor, "<init>", &[])
        .is_none());
    let c = model
        .resolve(
            "org.acme.steps.Derived",
            AccessKind::Constructor,
            "<init>",
            &params(&["java.lang.String"]),
        )
        .unwrap();
    assert_eq!(c.declaring_type, "org.acme.steps.Derived");
}

#[test]
fn hidden_field_resolves_to_nearest_type_only() {
    let f = model()
        .resolve("org.acme.steps.Derived", AccessKind::FieldSet, "name", &[])
        .unwrap();
    assert_eq!(f.declaring_type, "org.acme.steps.Derived");
    assert!(f.overridden_in.is_empty());
}

#[test]
fn static_method_found_through_subclass() {
    let m = model()
        .resolve(
            "org.acme.steps.Derived",
            AccessKind::StaticMethod,
            "create",
            &params(&["java.lang.String"]),
        )
        .unwrap();
    assert_eq!(m.declaring_type, "org.acme.Base");
}

#[test]
fn unknown_type_or_member_is_none() {
    let model = model();
    assert!(model.resolve("org.acme.Missing", AccessKind::Method, "run", &[]).is_none());
    assert!(model
        .resolve("org.acme.Base", AccessKind::Method, "run", &params(&["int"]))
        .is_none());
}

#[test]
fn builder_rejects_inconsistent_models() {
    let dup = TypeModel::builder()
        .add(TypeDef::new("a.A"))
        .add(TypeDef::new("a.A"))
        .build()
        .unwrap_err();
    assert_eq!(dup.code(), ErrorCode::TypeModel);

    let unknown = TypeModel::builder()
        .add(TypeDef::new("a.A").extends("a.Missing"))
        .build()
        .unwrap_err();
    assert!(unknown.to_string().contains("a.Missing"));

    let cycle = TypeModel::builder()
        .add(TypeDef::new("a.I").implements("a.J"))
        .add(TypeDef::new("a.J").implements("a.I"))
        .build()
        .unwrap_err();
    assert!(cycle.to_string().contains("cycle"));
}
