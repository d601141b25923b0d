//! Reversible gate instructions.

use crate::wire::WireId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A primitive reversible gate over explicit wire identifiers.
///
/// This is the closed gate set every compiled function lowers to. All four
/// gates are classical permutations of the state space, so a circuit built
/// from them is reversible by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Negate the target wire.
    X { target: WireId },
    /// Negate the target wire if the control wire is set.
    CX { control: WireId, target: WireId },
    /// Negate the target wire if every control wire is set. Always carries
    /// at least two controls; smaller control lists are X or CX.
    MCX {
        controls: Vec<WireId>,
        target: WireId,
    },
    /// Exchange the values of two wires.
    Swap { a: WireId, b: WireId },
}

impl Gate {
    /// The wire written by this gate (for Swap, both operands are written;
    /// this returns the first).
    pub fn target(&self) -> WireId {
        match self {
            Gate::X { target }
            | Gate::CX { target, .. }
            | Gate::MCX { target, .. }
            | Gate::Swap { a: target, .. } => *target,
        }
    }

    /// Every wire this gate touches, controls first.
    pub fn wires(&self) -> Vec<WireId> {
        match self {
            Gate::X { target } => vec![*target],
            Gate::CX { control, target } => vec![*control, *target],
            Gate::MCX { controls, target } => {
                let mut ws = controls.clone();
                ws.push(*target);
                ws
            }
            Gate::Swap { a, b } => vec![*a, *b],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::X { target } => write!(f, "x {target}"),
            Gate::CX { control, target } => write!(f, "cx {control}, {target}"),
            Gate::MCX { controls, target } => {
                write!(f, "mcx ")?;
                for c in controls {
                    write!(f, "{c}, ")?;
                }
                write!(f, "{target}")
            }
            Gate::Swap { a, b } => write!(f, "swap {a}, {b}"),
        }
    }
}

/// One entry in a circuit's instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// A reversible gate.
    Gate(Gate),
    /// Restore a recycled pool wire to logical zero before it is handed out
    /// again. Never emitted under a predicate; this is pool hygiene, not a
    /// program operation.
    Reset(WireId),
}

impl Instruction {
    /// Every wire this instruction touches.
    pub fn wires(&self) -> Vec<WireId> {
        match self {
            Instruction::Gate(g) => g.wires(),
            Instruction::Reset(w) => vec![*w],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Gate(g) => write!(f, "{g}"),
            Instruction::Reset(w) => write!(f, "reset {w}"),
        }
    }
}
