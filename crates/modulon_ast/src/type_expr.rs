//! The shape of type expressions in the AST.

/// Sentinel for `size`/`align` fields that have not yet been resolved.
pub const UNSIZED: i64 = -1;

/// The kind tag of a [`TypeExpr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeExprKind {
    Primitive,
    Pointer,
    Slice,
    Array,
    Function,
    Named,
    Foreign,
}

/// A recursive type expression.
///
/// `direct` holds the pointer/array/slice target or the function return
/// type; `indirect` holds function parameter types. `name` holds the
/// primitive's spelling, the local declaration name for `Named`, or the
/// declared symbol for `Foreign` (whose source module is named by
/// `include_tgt`). `size`/`align` start at [`UNSIZED`] and are filled in
/// place by the layout resolver.
///
/// Equality is structural over `(kind, name, direct, indirect, length)`:
/// resolved `size`/`align` never participate in identity, so two
/// differently-sized-but-not-yet-resolved occurrences of the same type
/// compare equal, and a fully resolved occurrence still compares equal to
/// an unresolved one of the same shape.
#[derive(Debug, Clone)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub direct: Option<Box<TypeExpr>>,
    pub indirect: Vec<TypeExpr>,
    pub name: String,
    pub include_tgt: Option<String>,
    pub length: i64,
    pub size: i64,
    pub align: i64,
}

impl TypeExpr {
    /// Creates a type expression with unresolved size and alignment.
    pub fn new(kind: TypeExprKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            direct: None,
            indirect: Vec::new(),
            name: name.into(),
            include_tgt: None,
            length: 0,
            size: UNSIZED,
            align: UNSIZED,
        }
    }

    /// A primitive type already sized at parse time.
    pub fn primitive(name: impl Into<String>, size: i64, align: i64) -> Self {
        Self {
            size,
            align,
            ..Self::new(TypeExprKind::Primitive, name)
        }
    }

    /// The `void` primitive: size 0, alignment 1.
    pub fn void() -> Self {
        Self::primitive("void", 0, 1)
    }

    /// A pointer, slice, or function type whose target/params are set via
    /// `direct`/`indirect` by the caller.
    pub fn with_direct(kind: TypeExprKind, target: TypeExpr) -> Self {
        Self {
            direct: Some(Box::new(target)),
            ..Self::new(kind, "")
        }
    }

    /// An array of `length` elements of `element`.
    pub fn array(element: TypeExpr, length: i64) -> Self {
        Self {
            length,
            ..Self::with_direct(TypeExprKind::Array, element)
        }
    }

    /// A reference to a locally declared struct, enum, or template parameter.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeExprKind::Named, name)
    }

    /// A reference to `name` exported from the module imported under `include_tgt`.
    pub fn foreign(include_tgt: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            include_tgt: Some(include_tgt.into()),
            ..Self::new(TypeExprKind::Foreign, name)
        }
    }

    /// Returns `true` once both `size` and `align` have been resolved.
    pub fn is_resolved(&self) -> bool {
        self.size != UNSIZED && self.align != UNSIZED
    }

    /// Returns `true` if this is the `void` primitive.
    pub fn is_void(&self) -> bool {
        self.kind == TypeExprKind::Primitive && self.name == "void"
    }

    /// Deep-clones this type expression, preserving structure and resolved
    /// `size`/`align` metadata.
    ///
    /// Each template instantiation operates on its own deep copy of the
    /// parsed template module, since the resolver mutates sizes and
    /// alignments in place.
    pub fn deep_clone(&self) -> TypeExpr {
        TypeExpr {
            kind: self.kind,
            direct: self.direct.as_ref().map(|d| Box::new(d.deep_clone())),
            indirect: self.indirect.iter().map(TypeExpr::deep_clone).collect(),
            name: self.name.clone(),
            include_tgt: self.include_tgt.clone(),
            length: self.length,
            size: self.size,
            align: self.align,
        }
    }
}

impl PartialEq for TypeExpr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.direct == other.direct
            && self.indirect == other.indirect
            && self.length == other.length
    }
}
