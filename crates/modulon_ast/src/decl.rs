//! Module-level declarations.

use crate::type_expr::TypeExpr;
use modulon_base::Location;

/// Returns `true` if `name` begins with an uppercase ASCII letter.
///
/// This is the sole export rule: a declaration (struct, enum, or function)
/// is exported iff its name passes this check. Includes and template
/// parameters are never exported regardless of spelling.
pub fn is_exported_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// One template parameter, along with its `(size, align)` once assigned by
/// the layout resolver from an argument tuple.
#[derive(Debug, Clone)]
pub struct TemplateParam {
    pub name: String,
    pub size: i64,
    pub align: i64,
}

impl TemplateParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: crate::type_expr::UNSIZED,
            align: crate::type_expr::UNSIZED,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.size != crate::type_expr::UNSIZED
    }
}

/// One struct member: name, type, and resolved byte offset within the struct.
#[derive(Debug, Clone)]
pub struct StructMember {
    pub name: String,
    pub ty: TypeExpr,
    pub offset: i64,
}

impl StructMember {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            offset: crate::type_expr::UNSIZED,
        }
    }
}

/// A `#include` declaration: a path, an import alias, and an ordered list
/// of template arguments (empty for a non-template include).
#[derive(Debug, Clone)]
pub struct IncludeDecl {
    pub name: String,
    pub location: Location,
    pub path: String,
    pub alias: String,
    pub template_args: Vec<TypeExpr>,
    pub imported: bool,
}

impl IncludeDecl {
    pub fn new(name: impl Into<String>, location: Location, path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location,
            path: path.into(),
            alias: alias.into(),
            template_args: Vec::new(),
            imported: false,
        }
    }
}

/// A `#template` declaration: the ordered parameter names a module expects
/// to receive a `(size, align)` tuple for.
#[derive(Debug, Clone)]
pub struct TemplateParamDecl {
    pub name: String,
    pub location: Location,
    pub params: Vec<TemplateParam>,
}

/// A `struct` declaration.
#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: String,
    pub location: Location,
    pub members: Vec<StructMember>,
    pub struct_size: i64,
    pub struct_align: i64,
}

impl StructDecl {
    pub fn new(name: impl Into<String>, location: Location, members: Vec<StructMember>) -> Self {
        Self {
            name: name.into(),
            location,
            members,
            struct_size: crate::type_expr::UNSIZED,
            struct_align: crate::type_expr::UNSIZED,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.struct_size != crate::type_expr::UNSIZED
    }
}

/// An `enum` declaration.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub location: Location,
    pub members: Vec<(String, i64)>,
    pub enum_size: i64,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>, location: Location, members: Vec<(String, i64)>) -> Self {
        Self {
            name: name.into(),
            location,
            members,
            enum_size: crate::type_expr::UNSIZED,
        }
    }
}

/// A function declaration: optional receiver struct name, parameters,
/// return type, and body scope.
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: String,
    pub location: Location,
    pub receiver: Option<String>,
    pub params: Vec<(String, TypeExpr)>,
    pub return_type: TypeExpr,
    pub body: crate::scope::Scope,
}

impl FuncDecl {
    /// A function is exported when its own name is uppercase and, if it
    /// has a receiver, the receiver's name is also uppercase.
    pub fn is_exported(&self) -> bool {
        is_exported_name(&self.name) && self.receiver.as_deref().map_or(true, is_exported_name)
    }
}

/// One module-level declaration.
#[derive(Debug, Clone)]
pub enum Decl {
    Include(IncludeDecl),
    TemplateParam(TemplateParamDecl),
    Struct(StructDecl),
    Enum(EnumDecl),
    Func(FuncDecl),
}

/// Discriminates the kind of declaration a name lookup is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Include,
    TemplateParam,
    Struct,
    Enum,
    Func,
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Include(d) => &d.name,
            Decl::TemplateParam(d) => &d.name,
            Decl::Struct(d) => &d.name,
            Decl::Enum(d) => &d.name,
            Decl::Func(d) => &d.name,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Decl::Include(d) => d.location,
            Decl::TemplateParam(d) => d.location,
            Decl::Struct(d) => d.location,
            Decl::Enum(d) => d.location,
            Decl::Func(d) => d.location,
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Decl::Include(_) => DeclKind::Include,
            Decl::TemplateParam(_) => DeclKind::TemplateParam,
            Decl::Struct(_) => DeclKind::Struct,
            Decl::Enum(_) => DeclKind::Enum,
            Decl::Func(_) => DeclKind::Func,
        }
    }

    /// Includes and template parameters are never exported; structs, enums,
    /// and functions follow the uppercase-first-letter rule.
    pub fn is_exported(&self) -> bool {
        match self {
            Decl::Include(_) | Decl::TemplateParam(_) => false,
            Decl::Struct(d) => is_exported_name(&d.name),
            Decl::Enum(d) => is_exported_name(&d.name),
            Decl::Func(d) => d.is_exported(),
        }
    }
}
