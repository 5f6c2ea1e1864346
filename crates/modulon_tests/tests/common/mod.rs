//! In-memory module source used as a fixture across the integration tests.
//!
//! No parser lives in this workspace, so scenarios build their
//! [`modulon_ast::ModuleAst`] fixtures directly and register them here under
//! the path an `#include` would name.

use modulon_ast::ModuleAst;
use modulon_base::{Diagnostic, Location};
use modulon_layout::ModuleSource;
use std::collections::HashMap;

#[derive(Default)]
pub struct FixtureSource {
    modules: HashMap<String, ModuleAst>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, module: ModuleAst) -> Self {
        self.modules.insert(path.to_string(), module);
        self
    }
}

impl ModuleSource for FixtureSource {
    fn load(&self, path: &str) -> Result<ModuleAst, Diagnostic> {
        self.modules
            .get(path)
            .map(ModuleAst::deep_clone)
            .ok_or_else(|| Diagnostic::new("E0804", format!("no fixture registered for '{path}'"), Location::default()))
    }
}
