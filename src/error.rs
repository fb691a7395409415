//! The crate's top-level failure type.
//!
//! Every semantic error (`SemaError`, `Conflict`) is an ordinary value
//! returned in a `Vec`, never raised — see `analyze::SemaError` and
//! `symtab::Conflict`. `CoreError` is reserved for the two places the core
//! can fail outside that: a parse-tree accessor handing back something the
//! core cannot make sense of, and unresolved symbol conflicts blocking
//! analysis entirely.

use std::fmt;

use crate::symtab::Conflict;

#[derive(Debug)]
pub enum CoreError {
    /// An accessor on a parse-tree node returned data the core has no
    /// declaration shape for (e.g. a C declarator with no identifier leaf).
    Malformed(String),
    /// The `SymbolTable` produced by collection still has unresolved
    /// conflicts; analysis was not attempted.
    UnresolvedConflict(Vec<Conflict>),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Malformed(msg) => write!(f, "malformed parse-tree node: {msg}"),
            CoreError::UnresolvedConflict(conflicts) => write!(
                f,
                "{} unresolved symbol conflict(s); analysis not attempted",
                conflicts.len()
            ),
        }
    }
}

impl std::error::Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;
