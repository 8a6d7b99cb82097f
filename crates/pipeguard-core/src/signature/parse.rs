//! Signature grammar parser.
//!
//! ```text
//! new            <Type> [<Param>... | *]
//! method         <Type> <name|*> [<Param>... | *]
//! staticMethod   <Type> <name|*> [<Param>... | *]
//! field          <Type> <name|*>      (fieldGet + fieldSet)
//! staticField    <Type> <name|*>      (staticFieldGet + staticFieldSet)
//! fieldGet | fieldSet | staticFieldGet | staticFieldSet  <Type> <name|*>
//! ```
//!
//! An omitted parameter list means "any arguments".

use crate::access::AccessKind;
use crate::error::{GuardError, Result};

use super::{MemberPattern, ParamPattern, Signature};

const WILDCARD: &str = "*";

/// Parse one entry. Shorthand field forms expand to a get and a set entry.
pub fn parse_entry(entry: &str) -> Result<Vec<Signature>> {
    let mut tokens = entry.split_ascii_whitespace();

    let keyword = tokens
        .next()
        .ok_or_else(|| GuardError::signature(entry, "empty entry"))?;
    let kinds: &[AccessKind] = match keyword {
        "new" => &[AccessKind::Constructor],
        "method" => &[AccessKind::Method],
        "staticMethod" => &[AccessKind::StaticMethod],
        "field" => &[AccessKind::FieldGet, AccessKind::FieldSet],
        "staticField" => &[AccessKind::StaticFieldGet, AccessKind::StaticFieldSet],
        "fieldGet" => &[AccessKind::FieldGet],
        "fieldSet" => &[AccessKind::FieldSet],
        "staticFieldGet" => &[AccessKind::StaticFieldGet],
        "staticFieldSet" => &[AccessKind::StaticFieldSet],
        other => {
            return Err(GuardError::signature(
                entry,
                format!("unknown keyword `{other}`"),
            ))
        }
    };

    let owner = tokens
        .next()
        .ok_or_else(|| GuardError::signature(entry, "missing owner type"))?;
    if !is_type_name(owner, false) {
        return Err(GuardError::signature(
            entry,
            format!("invalid owner type `{owner}`"),
        ));
    }

    // constructors have no member name in the grammar
    let member = if kinds[0] == AccessKind::Constructor {
        MemberPattern::Any
    } else {
        let name = tokens
            .next()
            .ok_or_else(|| GuardError::signature(entry, "missing member name"))?;
        if name == WILDCARD {
            MemberPattern::Any
        } else if is_identifier(name) {
            MemberPattern::Named(name.to_string())
        } else {
            return Err(GuardError::signature(
                entry,
                format!("invalid member name `{name}`"),
            ));
        }
    };

    let rest: Vec<&str> = tokens.collect();
    let params = if kinds[0].is_invocation() {
        parse_params(entry, &rest)?
    } else if rest.is_empty() {
        ParamPattern::Any
    } else {
        return Err(GuardError::signature(
            entry,
            "field entries take no parameter types",
        ));
    };

    Ok(kinds
        .iter()
        .map(|&kind| Signature {
            kind,
            owner: owner.to_string(),
            member: member.clone(),
            params: params.clone(),
        })
        .collect())
}

/// Parse a list of literal entries, failing on the first malformed one.
pub fn parse_entries<I, S>(entries: I) -> Result<Vec<Signature>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for e in entries {
        out.extend(parse_entry(e.as_ref())?);
    }
    Ok(out)
}

/// Parse a whitelist document: one entry per line, `#` comments and blank
/// lines ignored. Errors carry the 1-based line number.
pub fn parse_document(text: &str) -> Result<Vec<Signature>> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let sigs = parse_entry(line).map_err(|e| GuardError::AtLine {
            line: idx + 1,
            source: Box::new(e),
        })?;
        out.extend(sigs);
    }
    Ok(out)
}

fn parse_params(entry: &str, rest: &[&str]) -> Result<ParamPattern> {
    match rest {
        [] | [WILDCARD] => Ok(ParamPattern::Any),
        _ => {
            let mut params = Vec::with_capacity(rest.len());
            for p in rest {
                if *p == WILDCARD {
                    return Err(GuardError::signature(
                        entry,
                        "`*` must be the only parameter type",
                    ));
                }
                if !is_type_name(p, true) {
                    return Err(GuardError::signature(
                        entry,
                        format!("invalid parameter type `{p}`"),
                    ));
                }
                params.push(p.to_string());
            }
            Ok(ParamPattern::Exact(params))
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Dot-separated identifiers; parameter types may end in one or more `[]`.
fn is_type_name(s: &str, allow_array: bool) -> bool {
    let mut base = s;
    if allow_array {
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped;
        }
    }
    !base.is_empty() && base.split('.').all(is_identifier)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn method_with_params() {
        let sigs = parse_entry("method org.acme.Utils setBranch java.lang.String").unwrap();
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].kind, AccessKind::Method);
        assert_eq!(sigs[0].owner, "org.acme.Utils");
        assert_eq!(sigs[0].member, MemberPattern::Named("setBranch".into()));
        assert_eq!(
            sigs[0].params,
            ParamPattern::Exact(vec!["java.lang.String".into()])
        );
    }

    #[test]
    fn field_shorthand_expands() {
        let sigs = parse_entry("staticField a.b.C VALUE").unwrap();
        let kinds: Vec<_> = sigs.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![AccessKind::StaticFieldGet, AccessKind::StaticFieldSet]
        );
    }

    #[test]
    fn array_params_and_nested_types() {
        let sigs = parse_entry("staticMethod a.Outer$Inner of java.lang.Object[][] int").unwrap();
        assert_eq!(
            sigs[0].params,
            ParamPattern::Exact(vec!["java.lang.Object[][]".into(), "int".into()])
        );
        assert!(parse_entry("new a.T[]").is_err());
    }

    #[test]
    fn document_reports_line() {
        let doc = "# header\n\nnew a.T\nmethod a.T\n";
        let err = parse_document(doc).unwrap_err();
        assert!(matches!(err, GuardError::AtLine { line: 4, .. }));
        assert_eq!(err.code(), crate::ErrorCode::InvalidSignature);
    }
}
