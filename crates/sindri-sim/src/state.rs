//! Classical bit-state engine.

use sindri_ir::{Gate, Instruction, WireId};

/// The classical state of every wire in a circuit.
///
/// All instructions in the reversible gate set are classical permutations,
/// so executing a circuit is a deterministic walk over a bit vector.
#[derive(Debug, Clone)]
pub struct BitState {
    bits: Vec<bool>,
}

impl BitState {
    /// Create a state of `num_wires` wires, all at logical zero.
    pub fn new(num_wires: usize) -> Self {
        Self {
            bits: vec![false; num_wires],
        }
    }

    /// Number of wires.
    pub fn num_wires(&self) -> usize {
        self.bits.len()
    }

    /// Read one wire.
    pub fn get(&self, wire: WireId) -> bool {
        self.bits[wire.0 as usize]
    }

    /// Write one wire.
    pub fn set(&mut self, wire: WireId, value: bool) {
        self.bits[wire.0 as usize] = value;
    }

    /// Apply one instruction.
    pub fn apply(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Gate(gate) => self.apply_gate(gate),
            Instruction::Reset(wire) => self.set(*wire, false),
        }
    }

    fn apply_gate(&mut self, gate: &Gate) {
        match gate {
            Gate::X { target } => {
                self.bits[target.0 as usize] ^= true;
            }
            Gate::CX { control, target } => {
                if self.get(*control) {
                    self.bits[target.0 as usize] ^= true;
                }
            }
            Gate::MCX { controls, target } => {
                if controls.iter().all(|&c| self.get(c)) {
                    self.bits[target.0 as usize] ^= true;
                }
            }
            Gate::Swap { a, b } => {
                self.bits.swap(a.0 as usize, b.0 as usize);
            }
        }
    }

    /// Read a register's value, least significant wire first. Registers
    /// wider than 64 bits read their low 64.
    pub fn read(&self, wires: &[WireId]) -> u64 {
        wires
            .iter()
            .take(64)
            .enumerate()
            .fold(0, |acc, (i, &w)| acc | (u64::from(self.get(w)) << i))
    }

    /// Load a value into a register, least significant wire first.
    pub fn load(&mut self, wires: &[WireId], value: u64) {
        for (i, &w) in wires.iter().enumerate() {
            self.set(w, i < 64 && (value >> i) & 1 == 1);
        }
    }
}
