//! Resolved member descriptor.

/// Name reported for constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// A member resolved to the type that declares it.
///
/// `overridden_in` lists supertypes that declare the same method signature,
/// nearest first. It is empty for constructors, fields and static members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    pub declaring_type: String,
    pub name: String,
    pub params: Vec<String>,
    pub overridden_in: Vec<String>,
}

impl Member {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            params: Vec::new(),
            overridden_in: Vec::new(),
        }
    }

    pub fn constructor(declaring_type: impl Into<String>) -> Self {
        Self::new(declaring_type, CONSTRUCTOR_NAME)
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_overridden_in<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overridden_in = types.into_iter().map(Into::into).collect();
        self
    }

    /// Package of the declaring type.
    pub fn package(&self) -> &str {
        package_of(&self.declaring_type)
    }

    /// Declaring type followed by the override chain.
    pub fn declaring_chain(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.declaring_type.as_str())
            .chain(self.overridden_in.iter().map(String::as_str))
    }
}

/// Package portion of a binary type name.
///
/// Nested types share the package of their outer type (`a.b.Outer$Inner` is
/// in `a.b`); a name without any `.` lives in the unnamed package `""`.
pub fn package_of(type_name: &str) -> &str {
    match type_name.rsplit_once('.') {
        Some((pkg, _)) => pkg,
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_of_nested_and_unnamed() {
        assert_eq!(package_of("org.acme.Utils"), "org.acme");
        assert_eq!(package_of("org.acme.Flow$Arguments"), "org.acme");
        assert_eq!(package_of("Script1"), "");
    }

    #[test]
    fn chain_starts_with_declaring_type() {
        let m = Member::new("a.S", "run").with_overridden_in(["a.T", "a.Base"]);
        let chain: Vec<&str> = m.declaring_chain().collect();
        assert_eq!(chain, vec!["a.S", "a.T", "a.Base"]);
    }
}
