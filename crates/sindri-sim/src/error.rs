//! Error types for the executor crate.

use thiserror::Error;

/// Errors raised while executing a compiled circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecError {
    /// The caller supplied no value for an argument register.
    #[error("Missing value for argument '{name}'")]
    MissingArgument {
        /// The argument register name.
        name: String,
    },

    /// The caller supplied a value for a register that does not exist.
    #[error("Unknown argument '{name}'")]
    UnknownArgument {
        /// The offending name.
        name: String,
    },

    /// An argument value does not fit its register.
    #[error("Value {value} for argument '{name}' does not fit in {width} bits")]
    ValueTooWide {
        /// The argument register name.
        name: String,
        /// The offending value.
        value: u64,
        /// The register width.
        width: u32,
    },
}

/// Result type for executor operations.
pub type ExecResult<T> = Result<T, ExecError>;
