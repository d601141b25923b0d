//! Error types for the compiler crate.

use sindri_ir::{IrError, WireId};
use thiserror::Error;

/// Errors raised during compilation.
///
/// Every error is fatal: compilation aborts at the point of detection and no
/// partial circuit is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Source uses a construct the lowering does not recognize.
    #[error("Unsupported construct: {construct}")]
    UnsupportedConstruct {
        /// Description of the offending construct.
        construct: String,
    },

    /// A register resize to zero width was requested.
    #[error("Register resize to width {requested} is invalid")]
    InvalidResize {
        /// The requested width.
        requested: u32,
    },

    /// An operator lowering was asked to treat its own target as one of its
    /// sources in a case with no reversible construction (Or-in-place).
    #[error("Operator target aliases one of its sources (wire {wire})")]
    AliasingViolation {
        /// A wire shared between the target and a source.
        wire: WireId,
    },

    /// An expression references a variable that is not bound.
    #[error("Unknown variable '{name}'")]
    UnknownVariable {
        /// The unbound variable name.
        name: String,
    },

    /// The function contains more than one return statement, or a statement
    /// after its return.
    #[error("Statement after return (or duplicate return)")]
    StatementAfterReturn,

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),
}

impl CompileError {
    /// Shorthand for an [`CompileError::UnsupportedConstruct`] rejection.
    pub fn unsupported(construct: impl Into<String>) -> Self {
        CompileError::UnsupportedConstruct {
            construct: construct.into(),
        }
    }
}

/// Result type for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;
