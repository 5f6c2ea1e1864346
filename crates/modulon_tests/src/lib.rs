//! Integration test suite tying the `modulon` pipeline together.
//!
//! This crate exists only to run integration tests from the `tests/`
//! directory end to end: scan with `modulon-lex`, hand the result to an
//! (external, fixture-only) AST builder, and resolve layout with
//! `modulon-layout`. All test code lives in `tests/*.rs`.
