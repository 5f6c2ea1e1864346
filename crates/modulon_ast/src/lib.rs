//! The shape of a parsed module: type expressions, declarations, and scopes.
//!
//! Nothing in this crate resolves a size, an alignment, or a template
//! instantiation — that is `modulon-layout`'s job. This crate only knows
//! how to hold and walk the tree a parser (external to this workspace)
//! produces.

pub mod decl;
pub mod module;
pub mod scope;
pub mod type_expr;

pub use decl::{
    is_exported_name, Decl, DeclKind, EnumDecl, FuncDecl, IncludeDecl, StructDecl, StructMember, TemplateParam,
    TemplateParamDecl,
};
pub use module::ModuleAst;
pub use scope::{lookup_in_ancestors, Scope};
pub use type_expr::{TypeExpr, TypeExprKind, UNSIZED};
