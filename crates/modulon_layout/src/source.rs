//! The external collaborator that hands parsed modules to the resolver.

use modulon_ast::ModuleAst;
use modulon_base::Diagnostic;

/// Supplies parsed modules by path.
///
/// Implemented by the embedding driver (parser + file loader), neither of
/// which lives in this workspace. The resolver only ever asks for a module
/// by the path an `#include` names.
pub trait ModuleSource {
    /// Returns the parsed (but not yet sized) module at `path`, or a
    /// diagnostic if it cannot be produced (missing file, parse error).
    fn load(&self, path: &str) -> Result<ModuleAst, Diagnostic>;
}
