//! Append-only circuit description builder.

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, Instruction};
use crate::wire::{Wire, WireId, WireKind};
use serde::{Deserialize, Serialize};

/// A reversible circuit description.
///
/// A circuit is an ordered set of declared wires plus an ordered instruction
/// stream over them. Wires are declared as they are needed — argument wires
/// up front, ancilla wires whenever the compiler's pool grows — and every
/// instruction references wires by identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Declared wires, in declaration order.
    wires: Vec<Wire>,
    /// Emitted instructions, in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wires: vec![],
            instructions: vec![],
        }
    }

    /// Declare a single ancilla wire.
    pub fn add_wire(&mut self) -> WireId {
        let id = WireId(self.wires.len() as u32);
        self.wires.push(Wire::ancilla(id));
        id
    }

    /// Declare an argument register of `size` wires, least-significant first.
    pub fn add_argument_reg(&mut self, name: impl Into<String>, size: u32) -> Vec<WireId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = WireId(self.wires.len() as u32);
            self.wires.push(Wire::argument(id, &name, i));
            ids.push(id);
        }
        ids
    }

    fn check_wire(&self, wire: WireId) -> IrResult<()> {
        if (wire.0 as usize) < self.wires.len() {
            Ok(())
        } else {
            Err(IrError::WireNotFound { wire })
        }
    }

    /// Append a negate gate.
    pub fn x(&mut self, target: WireId) -> IrResult<&mut Self> {
        self.check_wire(target)?;
        self.instructions.push(Instruction::Gate(Gate::X { target }));
        Ok(self)
    }

    /// Append a controlled-negate gate.
    pub fn cx(&mut self, control: WireId, target: WireId) -> IrResult<&mut Self> {
        self.check_wire(control)?;
        self.check_wire(target)?;
        if control == target {
            return Err(IrError::OverlappingOperands {
                wire: control,
                gate: "cx",
            });
        }
        self.instructions
            .push(Instruction::Gate(Gate::CX { control, target }));
        Ok(self)
    }

    /// Append a multi-controlled-negate gate with at least two controls.
    pub fn mcx(
        &mut self,
        controls: impl IntoIterator<Item = WireId>,
        target: WireId,
    ) -> IrResult<&mut Self> {
        let controls: Vec<WireId> = controls.into_iter().collect();
        if controls.len() < 2 {
            return Err(IrError::ControlCountMismatch {
                got: controls.len(),
            });
        }
        self.check_wire(target)?;
        for (i, &c) in controls.iter().enumerate() {
            self.check_wire(c)?;
            if c == target || controls[..i].contains(&c) {
                return Err(IrError::OverlappingOperands { wire: c, gate: "mcx" });
            }
        }
        self.instructions
            .push(Instruction::Gate(Gate::MCX { controls, target }));
        Ok(self)
    }

    /// Append a swap gate.
    pub fn swap(&mut self, a: WireId, b: WireId) -> IrResult<&mut Self> {
        self.check_wire(a)?;
        self.check_wire(b)?;
        if a == b {
            return Err(IrError::OverlappingOperands { wire: a, gate: "swap" });
        }
        self.instructions.push(Instruction::Gate(Gate::Swap { a, b }));
        Ok(self)
    }

    /// Append a reset of one wire to logical zero.
    pub fn reset(&mut self, wire: WireId) -> IrResult<&mut Self> {
        self.check_wire(wire)?;
        self.instructions.push(Instruction::Reset(wire));
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of declared wires.
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    /// Number of declared ancilla wires.
    pub fn num_ancillas(&self) -> usize {
        self.wires
            .iter()
            .filter(|w| w.kind == WireKind::Ancilla)
            .count()
    }

    /// The declared wires, in declaration order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// The instruction stream, in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of emitted instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the instruction stream is empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
