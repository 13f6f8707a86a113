//! Error types for the grammar table-construction engine.

use thiserror::Error;

/// Errors that can occur while building or analyzing a grammar.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("duplicate production: {0}")]
    DuplicateProduction(String),

    #[error("wrong symbol kind: {0}")]
    WrongSymbolKind(String),

    #[error("item has no dot in its right-hand side")]
    MissingDot,

    #[error("parse rejected: {reason}")]
    ParseRejected { reason: String },
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
