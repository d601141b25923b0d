//! Registers and their lifetime operations.

use crate::compiler::Compiler;
use crate::error::{CompileError, CompileResult};
use sindri_ir::WireId;

/// An ordered, fixed-length handle over wires representing one value.
///
/// Wire 0 is the least significant bit. A temporary register holds a
/// disposable intermediate result and is eligible for in-place reuse as
/// another operation's output; registers bound to variable names and
/// function parameters are not temporary.
#[derive(Debug, Clone)]
pub struct Register {
    pub(crate) wires: Vec<WireId>,
    pub(crate) temporary: bool,
}

impl Register {
    pub(crate) fn new(wires: Vec<WireId>, temporary: bool) -> Self {
        Self { wires, temporary }
    }

    /// Bit-width of the register.
    pub fn width(&self) -> u32 {
        self.wires.len() as u32
    }

    /// The wires, least significant first.
    pub fn wires(&self) -> &[WireId] {
        &self.wires
    }

    /// Whether the value is a disposable intermediate.
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    /// Whether this register shares any wire with another.
    pub(crate) fn overlaps(&self, other: &Register) -> Option<WireId> {
        self.wires.iter().copied().find(|w| other.wires.contains(w))
    }
}

impl Compiler {
    /// Acquire `size` zeroed wires as a new temporary register.
    pub(crate) fn create_temp(&mut self, size: u32) -> CompileResult<Register> {
        if size == 0 {
            return Err(CompileError::InvalidResize { requested: 0 });
        }
        let mut wires = Vec::with_capacity(size as usize);
        for _ in 0..size {
            wires.push(self.pool.acquire(&mut self.circuit)?);
        }
        Ok(Register::new(wires, true))
    }

    /// Grow or shrink a register to `new_size` wires, preserving its
    /// temporary flag. Growth appends zeroed wires at the most significant
    /// end; shrinking releases the trailing wires.
    pub(crate) fn resize_reg(&mut self, reg: &mut Register, new_size: u32) -> CompileResult<()> {
        if new_size == 0 {
            return Err(CompileError::InvalidResize { requested: 0 });
        }
        while reg.width() < new_size {
            let wire = self.pool.acquire(&mut self.circuit)?;
            reg.wires.push(wire);
        }
        while reg.width() > new_size {
            if let Some(wire) = reg.wires.pop() {
                self.pool.release(wire);
            }
        }
        Ok(())
    }

    /// Release every wire of a register back to the pool.
    pub(crate) fn destroy_reg(&mut self, reg: Register) {
        for wire in reg.wires {
            self.pool.release(wire);
        }
    }

    /// Destroy the register only if it is temporary; the standard way to
    /// reclaim an intermediate immediately after use.
    pub(crate) fn drop_if_temporary(&mut self, reg: Register) {
        if reg.temporary {
            self.destroy_reg(reg);
        }
    }

    /// Release the wires of a superseded binding that are not reused by its
    /// replacement. Parameter wires are never released.
    pub(crate) fn drop_unused_bits(&mut self, old: Register, new: &Register) {
        for wire in old.wires {
            if self.param_wires.contains(&wire) || new.wires.contains(&wire) {
                continue;
            }
            self.pool.release(wire);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resize() {
        let mut c = Compiler::new("t");
        let mut reg = c.create_temp(3).unwrap();
        assert_eq!(reg.width(), 3);
        assert!(reg.is_temporary());
        assert_eq!(c.circuit.num_ancillas(), 3);

        c.resize_reg(&mut reg, 5).unwrap();
        assert_eq!(reg.width(), 5);
        assert_eq!(c.circuit.num_ancillas(), 5);

        c.resize_reg(&mut reg, 2).unwrap();
        assert_eq!(reg.width(), 2);
        assert_eq!(c.pool.num_free(), 3);
        // Shrinking releases wires, it never undeclares them.
        assert_eq!(c.circuit.num_ancillas(), 5);
    }

    #[test]
    fn test_resize_to_zero_rejected() {
        let mut c = Compiler::new("t");
        let mut reg = c.create_temp(2).unwrap();
        assert!(matches!(
            c.resize_reg(&mut reg, 0),
            Err(CompileError::InvalidResize { requested: 0 })
        ));
        assert_eq!(reg.width(), 2);
    }

    #[test]
    fn test_drop_if_temporary() {
        let mut c = Compiler::new("t");
        let tmp = c.create_temp(2).unwrap();
        c.drop_if_temporary(tmp);
        assert_eq!(c.pool.num_free(), 2);

        let mut kept = c.create_temp(2).unwrap();
        kept.temporary = false;
        c.drop_if_temporary(kept);
        assert_eq!(c.pool.num_free(), 0);
    }

    #[test]
    fn test_resize_reuses_freed_wires() {
        let mut c = Compiler::new("t");
        let tmp = c.create_temp(2).unwrap();
        c.destroy_reg(tmp);

        let reg = c.create_temp(2).unwrap();
        assert_eq!(reg.width(), 2);
        // No new declarations: both wires came off the free list.
        assert_eq!(c.circuit.num_ancillas(), 2);
    }
}
