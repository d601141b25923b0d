//! Predicate-aware gate emission.
//!
//! Every effectful operation in the compiler goes through these four
//! primitives. When the predicate stack is non-empty its top wire — the
//! conjunction of all enclosing conditions — is added as one extra control,
//! upgrading negate to controlled-negate, controlled-negate to
//! doubly-controlled-negate, and swap to its controlled three-gate
//! expansion. This is the single mechanism that makes every operator
//! lowering automatically conditional inside an `if` body.

use crate::compiler::Compiler;
use crate::error::CompileResult;
use crate::register::Register;
use sindri_ir::WireId;

impl Compiler {
    /// Negate a wire, guarded by the active predicate.
    pub(crate) fn emit_x(&mut self, target: WireId) -> CompileResult<()> {
        match self.predicates.last().copied() {
            Some(pred) => self.circuit.cx(pred, target)?,
            None => self.circuit.x(target)?,
        };
        Ok(())
    }

    /// Controlled-negate, guarded by the active predicate.
    pub(crate) fn emit_cx(&mut self, control: WireId, target: WireId) -> CompileResult<()> {
        match self.predicates.last().copied() {
            Some(pred) => self.circuit.mcx([pred, control], target)?,
            None => self.circuit.cx(control, target)?,
        };
        Ok(())
    }

    /// Multi-controlled-negate, guarded by the active predicate. The control
    /// list is emitted in minimal form: no controls degrades to X, one to CX.
    pub(crate) fn emit_mcx(&mut self, controls: Vec<WireId>, target: WireId) -> CompileResult<()> {
        let mut controls = controls;
        if let Some(&pred) = self.predicates.last() {
            controls.insert(0, pred);
        }
        match controls.len() {
            0 => self.circuit.x(target)?,
            1 => self.circuit.cx(controls[0], target)?,
            _ => self.circuit.mcx(controls, target)?,
        };
        Ok(())
    }

    /// Swap two wires, guarded by the active predicate. The guarded form is
    /// the standard controlled-swap expansion over CX/MCX.
    pub(crate) fn emit_swap(&mut self, a: WireId, b: WireId) -> CompileResult<()> {
        match self.predicates.last().copied() {
            Some(pred) => {
                self.circuit.cx(b, a)?;
                self.circuit.mcx([pred, a], b)?;
                self.circuit.cx(b, a)?;
            }
            None => {
                self.circuit.swap(a, b)?;
            }
        };
        Ok(())
    }

    /// Reduce a test register to a single predicate wire.
    ///
    /// Builds `parent AND (bit0 OR bit1 OR ...)` into a freshly acquired
    /// wire: every source bit is negated, a multi-controlled-negate over the
    /// negated bits (and the parent conjunction, when nested) lands the
    /// all-zero case on the new wire, the source bits are restored, and a
    /// final flip — X when outermost, CX from the parent when nested —
    /// completes the OR. The result always encodes the full conjunction of
    /// every enclosing condition, which is what the guarded-assignment
    /// correction relies on.
    pub(crate) fn collapse_to_bool(&mut self, test: &Register) -> CompileResult<WireId> {
        let pred = self.pool.acquire(&mut self.circuit)?;
        let parent = self.predicates.last().copied();

        for &bit in &test.wires {
            self.circuit.x(bit)?;
        }
        let mut controls: Vec<WireId> = Vec::with_capacity(test.wires.len() + 1);
        if let Some(parent) = parent {
            controls.push(parent);
        }
        controls.extend(&test.wires);
        match controls.len() {
            1 => self.circuit.cx(controls[0], pred)?,
            _ => self.circuit.mcx(controls, pred)?,
        };
        for &bit in &test.wires {
            self.circuit.x(bit)?;
        }

        match parent {
            Some(parent) => self.circuit.cx(parent, pred)?,
            None => self.circuit.x(pred)?,
        };
        Ok(pred)
    }

    /// Flip the top predicate to the complement of its own condition, for
    /// walking an `else` body. Outermost predicates toggle with X; nested
    /// ones toggle against the parent conjunction so the top stays
    /// `parent AND NOT test`.
    pub(crate) fn toggle_top_predicate(&mut self) -> CompileResult<()> {
        if let [rest @ .., pred] = self.predicates.as_slice() {
            let pred = *pred;
            match rest.last().copied() {
                Some(parent) => self.circuit.cx(parent, pred)?,
                None => self.circuit.x(pred)?,
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sindri_ir::{Gate, Instruction};

    fn gates(c: &Compiler) -> Vec<&Instruction> {
        c.circuit.instructions().iter().collect()
    }

    #[test]
    fn test_unguarded_primitives() {
        let mut c = Compiler::new("t");
        let a = c.pool.acquire(&mut c.circuit).unwrap();
        let b = c.pool.acquire(&mut c.circuit).unwrap();

        c.emit_x(a).unwrap();
        c.emit_cx(a, b).unwrap();
        c.emit_swap(a, b).unwrap();

        assert_eq!(
            gates(&c),
            vec![
                &Instruction::Gate(Gate::X { target: a }),
                &Instruction::Gate(Gate::CX {
                    control: a,
                    target: b
                }),
                &Instruction::Gate(Gate::Swap { a, b }),
            ]
        );
    }

    #[test]
    fn test_predicate_upgrades_controls() {
        let mut c = Compiler::new("t");
        let a = c.pool.acquire(&mut c.circuit).unwrap();
        let b = c.pool.acquire(&mut c.circuit).unwrap();
        let p = c.pool.acquire(&mut c.circuit).unwrap();
        c.predicates.push(p);

        c.emit_x(a).unwrap();
        c.emit_cx(a, b).unwrap();

        assert_eq!(
            c.circuit.instructions()[0],
            Instruction::Gate(Gate::CX {
                control: p,
                target: a
            })
        );
        assert_eq!(
            c.circuit.instructions()[1],
            Instruction::Gate(Gate::MCX {
                controls: vec![p, a],
                target: b
            })
        );
    }

    #[test]
    fn test_mcx_minimal_form() {
        let mut c = Compiler::new("t");
        let a = c.pool.acquire(&mut c.circuit).unwrap();
        let b = c.pool.acquire(&mut c.circuit).unwrap();

        c.emit_mcx(vec![], a).unwrap();
        c.emit_mcx(vec![a], b).unwrap();
        assert_eq!(
            gates(&c),
            vec![
                &Instruction::Gate(Gate::X { target: a }),
                &Instruction::Gate(Gate::CX {
                    control: a,
                    target: b
                }),
            ]
        );
    }

    #[test]
    fn test_guarded_swap_expansion() {
        let mut c = Compiler::new("t");
        let a = c.pool.acquire(&mut c.circuit).unwrap();
        let b = c.pool.acquire(&mut c.circuit).unwrap();
        let p = c.pool.acquire(&mut c.circuit).unwrap();
        c.predicates.push(p);

        c.emit_swap(a, b).unwrap();
        assert_eq!(
            gates(&c),
            vec![
                &Instruction::Gate(Gate::CX {
                    control: b,
                    target: a
                }),
                &Instruction::Gate(Gate::MCX {
                    controls: vec![p, a],
                    target: b
                }),
                &Instruction::Gate(Gate::CX {
                    control: b,
                    target: a
                }),
            ]
        );
    }
}
