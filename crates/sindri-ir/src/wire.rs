//! Wire identifiers and declarations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for one binary state cell within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId(pub u32);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

impl From<u32> for WireId {
    fn from(id: u32) -> Self {
        WireId(id)
    }
}

impl From<usize> for WireId {
    fn from(id: usize) -> Self {
        WireId(u32::try_from(id).expect("WireId overflow: exceeds u32::MAX"))
    }
}

/// How a declared wire entered the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireKind {
    /// Holds one bit of a function argument; initialized by the caller.
    Argument,
    /// Minted by the compiler's wire pool; starts at logical zero.
    Ancilla,
}

/// A declared wire with optional register membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire {
    /// The unique identifier.
    pub id: WireId,
    /// The kind of declaration.
    pub kind: WireKind,
    /// The name of the register this wire belongs to, if any.
    pub register: Option<String>,
    /// The bit index within the register (0 = least significant), if any.
    pub index: Option<u32>,
}

impl Wire {
    /// Create a new ancilla wire with just an id.
    pub fn ancilla(id: WireId) -> Self {
        Self {
            id,
            kind: WireKind::Ancilla,
            register: None,
            index: None,
        }
    }

    /// Create a new argument wire with register membership.
    pub fn argument(id: WireId, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            kind: WireKind::Argument,
            register: Some(register.into()),
            index: Some(index),
        }
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.register, self.index) {
            (Some(reg), Some(idx)) => write!(f, "{reg}[{idx}]"),
            _ => write!(f, "{}", self.id),
        }
    }
}
