//! Diagnostic error types for the taxonet engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text so users know exactly which
//! line of their facts file went wrong and how to fix it.
//!
//! Note that the network core itself has no error path: a missing attribute
//! is a normal `None` outcome, never an error. Everything here belongs to
//! the parsing and I/O surface.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the taxonet engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text, source chains) through to
/// the user.
#[derive(Debug, Error, Diagnostic)]
pub enum TaxoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fact(#[from] FactError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Symbol(#[from] SymbolError),
}

// ---------------------------------------------------------------------------
// Fact errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum FactError {
    #[error("invalid fact on line {line_no}: {content}")]
    #[diagnostic(
        code(taxonet::fact::invalid_line),
        help(
            "Facts must match `keyword(arg1, arg2[, arg3])` with keyword one of \
             `es_un`/`is_a`, `instancia`/`instance`, `atributo`/`attribute`. \
             Blank lines and lines starting with `#` are ignored."
        )
    )]
    InvalidLine { line_no: usize, content: String },

    #[error("`{keyword}` takes {expected} arguments, got {got} on line {line_no}: {content}")]
    #[diagnostic(
        code(taxonet::fact::wrong_arity),
        help(
            "`es_un(child, parent)` and `instancia(instance, class)` take two \
             arguments; `atributo(entity, attribute, value)` takes three. \
             Arguments are comma-separated and trimmed."
        )
    )]
    WrongArity {
        keyword: String,
        expected: usize,
        got: usize,
        line_no: usize,
        content: String,
    },
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read facts file: {path}")]
    #[diagnostic(
        code(taxonet::load::io),
        help("Ensure the file exists, is readable, and is valid UTF-8.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Symbol errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SymbolError {
    #[error("symbol allocator exhausted: cannot intern more than u64::MAX tokens")]
    #[diagnostic(
        code(taxonet::symbol::exhausted),
        help(
            "The symbol ID space is exhausted. This is extremely unlikely in \
             practice (requires 2^64 interned tokens). If you see this error, \
             check for an interning loop."
        )
    )]
    AllocatorExhausted,
}

/// Convenience alias for functions returning taxonet results.
pub type TaxoResult<T> = std::result::Result<T, TaxoError>;
