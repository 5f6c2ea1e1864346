//! Foundational types shared across the `modulon` crates.
//!
//! # Design Principles
//!
//! - No knowledge of tokens, types, or modules lives here. Everything in
//!   this crate is generic enough to belong in any compiler front end.
//! - No global mutable state. [`SourceRegistry`], [`Interner`], and
//!   [`Arena`] are all owned values a caller constructs and threads through
//!   explicitly.
//! - Diagnostics are values, not exceptions: every fallible operation
//!   upstream returns `Result<T, Diagnostic>`.

pub mod arena;
pub mod diagnostic;
pub mod intern;
pub mod location;
pub mod registry;

pub use arena::Arena;
pub use diagnostic::{Diagnostic, Result};
pub use intern::{Interner, Symbol, SymbolEq};
pub use location::{Location, UNKNOWN_SOURCE};
pub use registry::SourceRegistry;
