//! Lexical scopes.
//!
//! A [`Scope`] is an ordered list of declarations with no stored parent
//! pointer: the AST is a tree of owned nodes, and anything that needs to
//! walk outward to an enclosing scope does so with an explicit ancestor
//! stack built by the caller, rather than a back-reference baked into the
//! node. This sidesteps the ownership cycle a stored parent pointer would
//! create.

use crate::decl::{Decl, DeclKind};

/// An ordered sequence of declarations with no parent link.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub body: Vec<Decl>,
}

impl Scope {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn push(&mut self, decl: Decl) {
        self.body.push(decl);
    }

    /// Finds the first declaration of kind `kind` named `name` in this
    /// scope's own body. Does not look at ancestors.
    pub fn find_local(&self, kind: DeclKind, name: &str) -> Option<&Decl> {
        self.body.iter().find(|d| d.kind() == kind && d.name() == name)
    }

    /// Finds the first declaration of kind `kind` named `name`, restricted
    /// to exported declarations.
    pub fn find_local_exported(&self, kind: DeclKind, name: &str) -> Option<&Decl> {
        self.body
            .iter()
            .find(|d| d.kind() == kind && d.name() == name && d.is_exported())
    }
}

/// Walks an explicit ancestor stack (innermost scope last... or first,
/// caller's choice — this walks the slice in the order given) looking for
/// a declaration of kind `kind` named `name`, stopping at the first match.
pub fn lookup_in_ancestors<'a>(ancestors: &[&'a Scope], kind: DeclKind, name: &str) -> Option<&'a Decl> {
    for scope in ancestors {
        if let Some(decl) = scope.find_local(kind, name) {
            return Some(decl);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{EnumDecl, StructDecl};
    use modulon_base::Location;

    #[test]
    fn find_local_matches_kind_and_name() {
        let mut scope = Scope::new();
        scope.push(Decl::Struct(StructDecl::new("P", Location::default(), Vec::new())));
        scope.push(Decl::Enum(EnumDecl::new("Color", Location::default(), Vec::new())));

        assert!(scope.find_local(DeclKind::Struct, "P").is_some());
        assert!(scope.find_local(DeclKind::Enum, "P").is_none());
        assert!(scope.find_local(DeclKind::Struct, "Missing").is_none());
    }

    #[test]
    fn find_local_exported_filters_lowercase() {
        let mut scope = Scope::new();
        scope.push(Decl::Struct(StructDecl::new("priv", Location::default(), Vec::new())));
        scope.push(Decl::Struct(StructDecl::new("Pub", Location::default(), Vec::new())));

        assert!(scope.find_local_exported(DeclKind::Struct, "priv").is_none());
        assert!(scope.find_local_exported(DeclKind::Struct, "Pub").is_some());
    }

    #[test]
    fn lookup_in_ancestors_stops_at_first_match() {
        let mut outer = Scope::new();
        outer.push(Decl::Struct(StructDecl::new("P", Location::default(), Vec::new())));
        let inner = Scope::new();

        let ancestors = vec![&inner, &outer];
        let found = lookup_in_ancestors(&ancestors, DeclKind::Struct, "P");
        assert!(found.is_some());
    }
}
