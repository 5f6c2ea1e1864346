//! One parsed module.

use crate::decl::{Decl, DeclKind, TemplateParam};
use crate::scope::Scope;
use crate::type_expr::TypeExpr;

/// A parsed module: its source path and its top-level declarations.
///
/// Lookup here only ever looks at the module's own top-level body — the
/// `Scope`/ancestor-stack machinery in [`crate::scope`] exists for the
/// nested scopes an external statement parser would attach under a
/// function body, which this crate does not populate.
#[derive(Debug, Clone)]
pub struct ModuleAst {
    pub source_path: String,
    pub top: Scope,
}

impl ModuleAst {
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            top: Scope::new(),
        }
    }

    pub fn push(&mut self, decl: Decl) {
        self.top.push(decl);
    }

    /// Finds a top-level declaration of the given kind and name.
    pub fn find(&self, kind: DeclKind, name: &str) -> Option<&Decl> {
        self.top.find_local(kind, name)
    }

    pub fn find_mut(&mut self, kind: DeclKind, name: &str) -> Option<&mut Decl> {
        self.top.body.iter_mut().find(|d| d.kind() == kind && d.name() == name)
    }

    /// Finds an exported top-level declaration of the given kind and name.
    pub fn find_exported(&self, kind: DeclKind, name: &str) -> Option<&Decl> {
        self.top.find_local_exported(kind, name)
    }

    /// Total number of template parameters declared across every
    /// `#template` clause in this module.
    pub fn template_param_count(&self) -> usize {
        self.top
            .body
            .iter()
            .filter_map(|d| match d {
                Decl::TemplateParam(t) => Some(t.params.len()),
                _ => None,
            })
            .sum()
    }

    /// Finds a template parameter by name across every `#template` clause.
    pub fn find_template_param(&self, name: &str) -> Option<&TemplateParam> {
        self.top.body.iter().find_map(|d| match d {
            Decl::TemplateParam(t) => t.params.iter().find(|p| p.name == name),
            _ => None,
        })
    }

    /// Assigns `(size, align)` tuples to this module's template parameters
    /// in declaration order, across however many `#template` clauses the
    /// module has.
    pub fn assign_template_args(&mut self, sizes: &[i64], aligns: &[i64]) {
        let mut i = 0;
        for decl in self.top.body.iter_mut() {
            if let Decl::TemplateParam(t) = decl {
                for param in t.params.iter_mut() {
                    if i < sizes.len() {
                        param.size = sizes[i];
                        param.align = aligns[i];
                        i += 1;
                    }
                }
            }
        }
    }

    pub fn includes(&self) -> impl Iterator<Item = &Decl> {
        self.top.body.iter().filter(|d| d.kind() == DeclKind::Include)
    }

    pub fn structs(&self) -> impl Iterator<Item = &Decl> {
        self.top.body.iter().filter(|d| d.kind() == DeclKind::Struct)
    }

    /// Deep-clones the whole module, including resolved size/align metadata.
    ///
    /// Every template instantiation starts from a fresh copy, since the
    /// resolver mutates sizes, alignments, and offsets in place.
    pub fn deep_clone(&self) -> ModuleAst {
        ModuleAst {
            source_path: self.source_path.clone(),
            top: Scope {
                body: self.top.body.iter().map(deep_clone_decl).collect(),
            },
        }
    }
}

fn deep_clone_decl(decl: &Decl) -> Decl {
    match decl {
        Decl::Include(d) => Decl::Include(crate::decl::IncludeDecl {
            name: d.name.clone(),
            location: d.location,
            path: d.path.clone(),
            alias: d.alias.clone(),
            template_args: d.template_args.iter().map(TypeExpr::deep_clone).collect(),
            imported: d.imported,
        }),
        Decl::TemplateParam(d) => Decl::TemplateParam(crate::decl::TemplateParamDecl {
            name: d.name.clone(),
            location: d.location,
            params: d
                .params
                .iter()
                .map(|p| TemplateParam {
                    name: p.name.clone(),
                    size: p.size,
                    align: p.align,
                })
                .collect(),
        }),
        Decl::Struct(d) => Decl::Struct(crate::decl::StructDecl {
            name: d.name.clone(),
            location: d.location,
            members: d
                .members
                .iter()
                .map(|m| crate::decl::StructMember {
                    name: m.name.clone(),
                    ty: m.ty.deep_clone(),
                    offset: m.offset,
                })
                .collect(),
            struct_size: d.struct_size,
            struct_align: d.struct_align,
        }),
        Decl::Enum(d) => Decl::Enum(crate::decl::EnumDecl {
            name: d.name.clone(),
            location: d.location,
            members: d.members.clone(),
            enum_size: d.enum_size,
        }),
        Decl::Func(d) => Decl::Func(crate::decl::FuncDecl {
            name: d.name.clone(),
            location: d.location,
            receiver: d.receiver.clone(),
            params: d.params.iter().map(|(n, t)| (n.clone(), t.deep_clone())).collect(),
            return_type: d.return_type.deep_clone(),
            body: d.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{StructDecl, TemplateParamDecl};
    use modulon_base::Location;

    #[test]
    fn assign_template_args_sets_param_size_align() {
        let mut module = ModuleAst::new("box.fc");
        module.push(Decl::TemplateParam(TemplateParamDecl {
            name: "T".to_string(),
            location: Location::default(),
            params: vec![TemplateParam::new("T")],
        }));
        module.assign_template_args(&[4], &[4]);
        let param = module.find_template_param("T").unwrap();
        assert_eq!(param.size, 4);
        assert_eq!(param.align, 4);
    }

    #[test]
    fn template_param_count_sums_across_clauses() {
        let mut module = ModuleAst::new("box.fc");
        module.push(Decl::TemplateParam(TemplateParamDecl {
            name: "T".to_string(),
            location: Location::default(),
            params: vec![TemplateParam::new("T"), TemplateParam::new("U")],
        }));
        assert_eq!(module.template_param_count(), 2);
    }

    #[test]
    fn deep_clone_produces_independent_struct_sizes() {
        let mut module = ModuleAst::new("p.fc");
        let mut s = StructDecl::new("P", Location::default(), Vec::new());
        s.struct_size = 16;
        module.push(Decl::Struct(s));

        let mut cloned = module.deep_clone();
        if let Some(Decl::Struct(s)) = cloned.find_mut(DeclKind::Struct, "P") {
            s.struct_size = 32;
        }

        if let Some(Decl::Struct(original)) = module.find(DeclKind::Struct, "P") {
            assert_eq!(original.struct_size, 16);
        } else {
            panic!("expected struct P");
        }
    }
}
