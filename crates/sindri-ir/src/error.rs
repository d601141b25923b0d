//! Error types for the IR crate.

use crate::wire::WireId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Wire not declared in circuit.
    #[error("Wire {wire} not declared in circuit")]
    WireNotFound {
        /// The wire that was not found.
        wire: WireId,
    },

    /// The same wire appears more than once in one gate's operand list.
    #[error("Wire {wire} appears more than once in a {gate} gate")]
    OverlappingOperands {
        /// The duplicated wire.
        wire: WireId,
        /// Name of the gate.
        gate: &'static str,
    },

    /// MCX requires at least two controls.
    #[error("MCX requires at least 2 controls, got {got}")]
    ControlCountMismatch {
        /// Actual number of controls provided.
        got: usize,
    },

    /// A constant does not fit the requested bit-width.
    #[error("Value {value} does not fit in {width} bits")]
    ValueTooWide {
        /// The offending value.
        value: u64,
        /// The requested width.
        width: u32,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
