//! Fixed-point size/alignment resolution and cross-module template
//! instantiation.
//!
//! This crate owns the one stage of the pipeline that needs a global view:
//! [`LayoutResolver`] walks a parsed [`modulon_ast::ModuleAst`], fills in
//! every `size`/`align` it can, recursively instantiates `#include`d
//! templates through a [`ModuleSource`], and records the results in an
//! [`InstantiationStore`]. Nothing upstream of this crate (`modulon-base`,
//! `modulon-lex`, `modulon-ast`) knows what a byte size is.

pub mod resolver;
pub mod source;
pub mod store;

pub use resolver::LayoutResolver;
pub use source::ModuleSource;
pub use store::{InstantiationStore, ResolvedModule};
