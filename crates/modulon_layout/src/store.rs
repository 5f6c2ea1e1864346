//! The append-only table of fully resolved modules.

use modulon_ast::ModuleAst;
use std::collections::HashMap;

/// A module that has passed all the way through [`crate::LayoutResolver::resolve`].
///
/// Immutable once stored: `unique_name` is guaranteed not to collide with
/// any other entry, and `template_arg_tuple` is empty for a non-template
/// module.
#[derive(Debug, Clone)]
pub struct ResolvedModule {
    pub source_path: String,
    pub unique_name: String,
    pub ast: ModuleAst,
    pub template_arg_tuple: (Vec<i64>, Vec<i64>),
}

/// Append-only store of [`ResolvedModule`]s, keyed by `(source_path,
/// arg_sizes, arg_aligns)`.
///
/// Plain (non-template) modules are looked up in a path-keyed map in O(1),
/// mirroring how the source tokenizer's module table distinguishes a fast
/// hash lookup for ordinary modules from a linear equality scan for
/// template instances, which differ only by their argument tuple and so
/// need that tuple compared explicitly.
#[derive(Debug, Default)]
pub struct InstantiationStore {
    modules: Vec<ResolvedModule>,
    plain_by_path: HashMap<String, usize>,
}

impl InstantiationStore {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            plain_by_path: HashMap::new(),
        }
    }

    /// Finds the index of a stored module matching `path` and the given
    /// argument tuple. `sizes`/`aligns` are empty for a non-template lookup.
    pub fn find(&self, path: &str, sizes: &[i64], aligns: &[i64]) -> Option<usize> {
        if sizes.is_empty() {
            self.plain_by_path.get(path).copied()
        } else {
            self.modules
                .iter()
                .position(|m| m.source_path == path && m.template_arg_tuple.0 == sizes && m.template_arg_tuple.1 == aligns)
        }
    }

    /// Finds the index of the stored module with the given unique name.
    pub fn find_by_unique_name(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.unique_name == name)
    }

    /// Appends a resolved module, returning its index.
    pub fn add(&mut self, module: ResolvedModule) -> usize {
        let idx = self.modules.len();
        if module.template_arg_tuple.0.is_empty() {
            self.plain_by_path.insert(module.source_path.clone(), idx);
        }
        self.modules.push(module);
        idx
    }

    pub fn get(&self, idx: usize) -> &ResolvedModule {
        &self.modules[idx]
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
