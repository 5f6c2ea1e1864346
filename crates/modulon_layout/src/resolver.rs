//! The fixed-point layout resolver.
//!
//! [`LayoutResolver::resolve`] runs an outer *progress loop* modeled on a
//! normalize-to-fixed-point reduction: each iteration runs three passes in
//! a fixed order and the loop keeps going only as long as some pass
//! changed something. The three mutually recursive concerns — local type
//! expressions, struct layout, and cross-module template instantiation —
//! never need a dependency graph because every pass only ever turns an
//! unknown field into a known one; a monotone loop is simpler than a
//! worklist and produces the same answer.

use crate::source::ModuleSource;
use crate::store::{InstantiationStore, ResolvedModule};
use modulon_ast::{Decl, DeclKind, ModuleAst, TypeExpr, TypeExprKind, UNSIZED};
use modulon_base::{Diagnostic, Location};

/// The engine: an architecture word width and a handle to the external
/// module loader. Carries no mutable state of its own — all of that lives
/// in the [`ModuleAst`] being resolved and the [`InstantiationStore`]
/// threaded through explicitly.
pub struct LayoutResolver<'s, S: ModuleSource> {
    arch_word_size: i64,
    source: &'s S,
}

impl<'s, S: ModuleSource> LayoutResolver<'s, S> {
    /// Creates a resolver targeting an architecture with the given pointer
    /// width in bytes (e.g. `8` for a 64-bit target).
    pub fn new(arch_word_size: i64, source: &'s S) -> Self {
        Self { arch_word_size, source }
    }

    /// Resolves `module` against a template argument tuple, recursively
    /// instantiating its includes, and appends the result to `store`.
    ///
    /// Returns the index of the newly stored [`ResolvedModule`]. Fails
    /// without mutating `store` if the argument arity is wrong, an include
    /// never becomes decidable, or a struct's size never converges.
    pub fn resolve(
        &self,
        mut module: ModuleAst,
        arg_sizes: &[i64],
        arg_aligns: &[i64],
        store: &mut InstantiationStore,
    ) -> Result<usize, Diagnostic> {
        let param_count = module.template_param_count();
        if arg_sizes.is_empty() != (param_count == 0) {
            return Err(Diagnostic::new(
                "E0806",
                format!(
                    "template argument arity inconsistent with module '{}': it declares {} parameter(s), got {} argument(s)",
                    module.source_path,
                    param_count,
                    arg_sizes.len()
                ),
                Location::default(),
            ));
        }
        if arg_sizes.len() != param_count {
            return Err(Diagnostic::new(
                "E0807",
                format!(
                    "template argument count mismatch for module '{}': expected {}, got {}",
                    module.source_path,
                    param_count,
                    arg_sizes.len()
                ),
                Location::default(),
            ));
        }

        module.assign_template_args(arg_sizes, arg_aligns);
        eagerly_size_enums(&mut module);

        log::debug!(
            "resolving module '{}' with {} template argument(s)",
            module.source_path,
            arg_sizes.len()
        );

        let mut iteration = 0u32;
        loop {
            let mut progress = false;

            progress |= self.pass_a_include_args(&mut module, store)?;
            progress |= self.pass_b_import_includes(&mut module, store)?;
            progress |= self.pass_c_resolve_structs(&mut module, store)?;

            log::trace!("iteration {iteration}: progress = {progress}");
            iteration += 1;
            if !progress {
                break;
            }
        }

        for decl in module.top.body.iter() {
            if let Decl::Include(inc) = decl {
                if !inc.imported {
                    return Err(Diagnostic::new(
                        "E0807",
                        format!("include '{}' arguments undecidable", inc.path),
                        inc.location,
                    ));
                }
            }
        }
        for decl in module.top.body.iter() {
            if let Decl::Struct(s) = decl {
                if !s.is_resolved() {
                    return Err(Diagnostic::new("E0808", format!("struct '{}' size undecidable", s.name), s.location));
                }
            }
        }

        let unique_name = assign_unique_name(&module.source_path, store);
        let idx = store.add(ResolvedModule {
            source_path: module.source_path.clone(),
            unique_name,
            ast: module,
            template_arg_tuple: (arg_sizes.to_vec(), arg_aligns.to_vec()),
        });
        Ok(idx)
    }

    /// Pass A: resolve the type expressions of every include's template
    /// arguments that are not yet fully sized.
    ///
    /// Mutates a clone of each `IncludeDecl`, not the slot itself: the
    /// original stays in `module.top.body` for the duration of the lookup,
    /// so a type expression that refers back to a declaration by name still
    /// finds it present (if unresolved, that is itself the "wait for
    /// another pass" signal — it must never look absent).
    fn pass_a_include_args(&self, module: &mut ModuleAst, store: &InstantiationStore) -> Result<bool, Diagnostic> {
        let mut progress = false;
        for i in 0..module.top.body.len() {
            let mut inc = match &module.top.body[i] {
                Decl::Include(inc) => inc.clone(),
                _ => continue,
            };
            let ctx = Ctx {
                module,
                store,
                source: self.source,
                arch_word_size: self.arch_word_size,
            };
            for arg in inc.template_args.iter_mut() {
                if complete_type(&ctx, arg)? {
                    progress = true;
                }
            }
            module.top.body[i] = Decl::Include(inc);
        }
        Ok(progress)
    }

    /// Pass B: import every include whose argument types are all fully
    /// sized, deduplicating against modules already in `store`.
    fn pass_b_import_includes(&self, module: &mut ModuleAst, store: &mut InstantiationStore) -> Result<bool, Diagnostic> {
        let mut progress = false;
        for i in 0..module.top.body.len() {
            let mut inc = match &module.top.body[i] {
                Decl::Include(inc) => inc.clone(),
                _ => continue,
            };
            if !inc.imported && inc.template_args.iter().all(|a| a.size >= 0) {
                let sizes: Vec<i64> = inc.template_args.iter().map(|a| a.size).collect();
                let aligns: Vec<i64> = inc.template_args.iter().map(|a| a.align).collect();
                if store.find(&inc.path, &sizes, &aligns).is_some() {
                    inc.imported = true;
                } else {
                    let template_module = self.source.load(&inc.path)?;
                    let cloned = template_module.deep_clone();
                    self.resolve(cloned, &sizes, &aligns, store)?;
                    inc.imported = true;
                }
                progress = true;
            }
            module.top.body[i] = Decl::Include(inc);
        }
        Ok(progress)
    }

    /// Pass C: finish laying out every struct whose size is still unknown.
    ///
    /// Same clone-and-write-back discipline as Pass A: a struct being laid
    /// out this iteration is never removed from `module.top.body`, so a
    /// self-referential member (`Node* next` inside `struct Node`) finds
    /// its own declaration present-but-unresolved via `complete_named` and
    /// waits for a later iteration rather than failing with E0802. Direct,
    /// non-indirected self-inclusion (`struct Bad { Bad x; }`) still never
    /// converges and is caught afterward as E0808, per `astCalc.cpp`.
    fn pass_c_resolve_structs(&self, module: &mut ModuleAst, store: &InstantiationStore) -> Result<bool, Diagnostic> {
        let mut progress = false;
        for i in 0..module.top.body.len() {
            let mut s = match &module.top.body[i] {
                Decl::Struct(s) if !s.is_resolved() => s.clone(),
                _ => continue,
            };
            let ctx = Ctx {
                module,
                store,
                source: self.source,
                arch_word_size: self.arch_word_size,
            };
            if complete_struct(&ctx, &mut s)? {
                progress = true;
            }
            module.top.body[i] = Decl::Struct(s);
        }
        Ok(progress)
    }
}

struct Ctx<'a, S: ModuleSource> {
    module: &'a ModuleAst,
    store: &'a InstantiationStore,
    source: &'a S,
    arch_word_size: i64,
}

/// Recurses into `t`'s children first, then fills in `t.size`/`t.align` if
/// unknown. Returns `true` iff any field in the subtree changed.
fn complete_type<S: ModuleSource>(ctx: &Ctx<S>, t: &mut TypeExpr) -> Result<bool, Diagnostic> {
    let mut modified = false;
    if let Some(direct) = t.direct.as_mut() {
        modified |= complete_type(ctx, direct)?;
    }
    for child in t.indirect.iter_mut() {
        modified |= complete_type(ctx, child)?;
    }

    if t.size != UNSIZED && t.align != UNSIZED {
        return Ok(modified);
    }

    match t.kind {
        TypeExprKind::Primitive => {
            debug_assert!(t.size != UNSIZED, "primitive types must already be sized when the resolver sees them");
            Ok(modified)
        }
        TypeExprKind::Pointer | TypeExprKind::Slice | TypeExprKind::Function => {
            t.size = ctx.arch_word_size;
            t.align = ctx.arch_word_size;
            Ok(true)
        }
        TypeExprKind::Array => {
            let elem = t.direct.as_ref().expect("array TypeExpr must carry an element type in `direct`");
            if elem.is_void() {
                return Err(Diagnostic::new("E0801", "array or slice of void is not permitted", Location::default()));
            }
            if elem.size > 0 {
                t.size = elem.size * t.length;
                t.align = elem.align;
                modified = true;
            }
            Ok(modified)
        }
        TypeExprKind::Named => complete_named(ctx, t, modified),
        TypeExprKind::Foreign => complete_foreign(ctx, t, modified),
    }
}

fn complete_named<S: ModuleSource>(ctx: &Ctx<S>, t: &mut TypeExpr, mut modified: bool) -> Result<bool, Diagnostic> {
    if let Some(Decl::Struct(s)) = ctx.module.find(DeclKind::Struct, &t.name) {
        if s.is_resolved() {
            t.size = s.struct_size;
            t.align = s.struct_align;
            modified = true;
        }
        return Ok(modified);
    }
    if let Some(Decl::Enum(e)) = ctx.module.find(DeclKind::Enum, &t.name) {
        t.size = e.enum_size;
        t.align = e.enum_size;
        return Ok(true);
    }
    if let Some(param) = ctx.module.find_template_param(&t.name) {
        if param.is_assigned() {
            t.size = param.size;
            t.align = param.align;
            modified = true;
        }
        return Ok(modified);
    }
    Err(Diagnostic::new("E0802", format!("unresolved local type '{}'", t.name), Location::default()))
}

fn complete_foreign<S: ModuleSource>(ctx: &Ctx<S>, t: &mut TypeExpr, modified: bool) -> Result<bool, Diagnostic> {
    let alias = t.include_tgt.as_deref().unwrap_or("");
    let include = ctx.module.includes().find_map(|d| match d {
        Decl::Include(inc) if inc.alias == alias => Some(inc),
        _ => None,
    });
    let include = match include {
        Some(inc) => inc,
        None => return Err(Diagnostic::new("E0803", format!("missing include alias '{alias}'"), Location::default())),
    };

    let sizes: Vec<i64> = include.template_args.iter().map(|a| a.size).collect();
    let aligns: Vec<i64> = include.template_args.iter().map(|a| a.align).collect();

    let resolved_idx = match ctx.store.find(&include.path, &sizes, &aligns) {
        Some(idx) => idx,
        None => {
            return match ctx.source.load(&include.path) {
                Ok(_) => Ok(modified),
                Err(_) => Err(Diagnostic::new(
                    "E0804",
                    format!("missing included module '{}'", include.path),
                    Location::default(),
                )),
            };
        }
    };

    let resolved = ctx.store.get(resolved_idx);
    if let Some(Decl::Struct(s)) = resolved.ast.find_exported(DeclKind::Struct, &t.name) {
        t.size = s.struct_size;
        t.align = s.struct_align;
        return Ok(true);
    }
    if let Some(Decl::Enum(e)) = resolved.ast.find_exported(DeclKind::Enum, &t.name) {
        t.size = e.enum_size;
        t.align = e.enum_size;
        return Ok(true);
    }
    Err(Diagnostic::new(
        "E0805",
        format!("missing symbol '{}' inside included module '{}'", t.name, include.path),
        Location::default(),
    ))
}

/// Completes every member's type, then lays the struct out in declaration
/// order if every member ended up with a positive size.
fn complete_struct<S: ModuleSource>(ctx: &Ctx<S>, s: &mut modulon_ast::StructDecl) -> Result<bool, Diagnostic> {
    let mut modified = false;
    for member in s.members.iter_mut() {
        modified |= complete_type(ctx, &mut member.ty)?;
    }

    if s.members.iter().any(|m| m.ty.size <= 0) {
        return Ok(modified);
    }

    let mut offset: i64 = 0;
    let mut struct_align: i64 = 1;
    for member in s.members.iter_mut() {
        let align = member.ty.align;
        let pad = (align - offset % align) % align;
        offset += pad;
        member.offset = offset;
        offset += member.ty.size;
        struct_align = struct_align.max(align);
    }
    let tail_pad = (struct_align - offset % struct_align) % struct_align;
    s.struct_size = offset + tail_pad;
    s.struct_align = struct_align;
    Ok(true)
}

/// The enum backing size is decidable without iteration: the smallest
/// power-of-two byte width that can hold the declared member count.
/// `enum_align == enum_size` as the source format specifies.
fn eagerly_size_enums(module: &mut ModuleAst) {
    for decl in module.top.body.iter_mut() {
        if let Decl::Enum(e) = decl {
            if e.enum_size == UNSIZED {
                let size = compute_enum_size(e.members.len());
                debug_assert!((size as u64).is_power_of_two());
                e.enum_size = size;
            }
        }
    }
}

fn compute_enum_size(member_count: usize) -> i64 {
    let mut bytes: i64 = 1;
    while bytes < 8 && (1i64 << (bytes * 8)) <= member_count as i64 {
        bytes *= 2;
    }
    bytes
}

fn assign_unique_name(source_path: &str, store: &InstantiationStore) -> String {
    let base = stem_of(source_path);
    if store.find_by_unique_name(&base).is_none() {
        return base;
    }
    let mut i = 0u32;
    loop {
        let candidate = format!("{base}_{i}");
        if store.find_by_unique_name(&candidate).is_none() {
            return candidate;
        }
        i += 1;
    }
}

fn stem_of(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rfind('.') {
        Some(idx) => file[..idx].to_string(),
        None => file.to_string(),
    }
}
