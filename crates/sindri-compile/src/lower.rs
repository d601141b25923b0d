//! Operator lowering: expressions to gate sequences.
//!
//! Each lowering picks an output register — reusing a temporary operand in
//! place when one exists — emits the minimal gate sequence through the
//! predicate-aware primitives, and reclaims every consumed temporary. The
//! optional width limit comes from a declared bit-width on the assignment
//! target; the final width is `min(natural_result_width, limit)`.

use crate::ast::{BinOp, Expr};
use crate::compiler::Compiler;
use crate::error::{CompileError, CompileResult};
use crate::register::Register;
use sindri_ir::bits::uint_len;
use sindri_ir::WireId;
use tracing::trace;

impl Compiler {
    /// Lower one expression to a register holding its value.
    pub(crate) fn lower_expr(&mut self, expr: &Expr, limit: Option<u32>) -> CompileResult<Register> {
        match expr {
            Expr::Name(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| CompileError::UnknownVariable { name: name.clone() }),
            Expr::Int(value) => self.from_constant(*value, limit),
            Expr::Bool(value) => self.from_constant(u64::from(*value), limit.or(Some(1))),
            Expr::Not(operand) => {
                let source = self.lower_expr(operand, None)?;
                let mut out = self.lower_not(source)?;
                self.clamp(&mut out, limit)?;
                Ok(out)
            }
            Expr::Bin { op, lhs, rhs } => match op {
                BinOp::Xor => {
                    let sources = self.lower_sources(&expr.flatten(BinOp::Xor))?;
                    self.lower_xor(sources, limit)
                }
                BinOp::And => {
                    let sources = self.lower_sources(&expr.flatten(BinOp::And))?;
                    self.lower_and(sources, limit)
                }
                BinOp::Or => {
                    let sources = self.lower_sources(&expr.flatten(BinOp::Or))?;
                    self.lower_or(sources, limit)
                }
                BinOp::Shl | BinOp::Shr => {
                    let distance = Self::shift_distance(rhs)?;
                    let source = self.lower_expr(lhs, None)?;
                    if *op == BinOp::Shl {
                        self.lower_shl(source, distance, limit)
                    } else {
                        self.lower_shr(source, distance, limit)
                    }
                }
            },
        }
    }

    /// Encode a constant into a fresh register, least significant bit first.
    /// A width limit truncates the constant to its low bits.
    pub(crate) fn from_constant(&mut self, value: u64, limit: Option<u32>) -> CompileResult<Register> {
        let natural = uint_len(value);
        let width = limit.map_or(natural, |l| natural.min(l));
        let masked = if width >= 64 {
            value
        } else {
            value & ((1u64 << width) - 1)
        };
        let reg = self.create_temp(width)?;
        for i in 0..width {
            if (masked >> i) & 1 == 1 {
                self.emit_x(reg.wires[i as usize])?;
            }
        }
        trace!(value, width, "constant");
        Ok(reg)
    }

    /// Reversible copy of a register into a fresh temporary.
    pub(crate) fn copy_reg(&mut self, source: &Register) -> CompileResult<Register> {
        let out = self.create_temp(source.width())?;
        for i in 0..source.wires.len() {
            self.emit_cx(source.wires[i], out.wires[i])?;
        }
        Ok(out)
    }

    fn lower_sources(&mut self, exprs: &[&Expr]) -> CompileResult<Vec<Register>> {
        exprs.iter().map(|e| self.lower_expr(e, None)).collect()
    }

    fn shift_distance(rhs: &Expr) -> CompileResult<u32> {
        match rhs {
            Expr::Int(d) => u32::try_from(*d)
                .map_err(|_| CompileError::unsupported("shift distance too large")),
            _ => Err(CompileError::unsupported("non-constant shift distance")),
        }
    }

    /// Truncate a register to a declared width limit, if one applies.
    fn clamp(&mut self, reg: &mut Register, limit: Option<u32>) -> CompileResult<()> {
        if let Some(limit) = limit {
            if reg.width() > limit {
                self.resize_reg(reg, limit)?;
            }
        }
        Ok(())
    }

    /// Remove and return the widest temporary operand, if any.
    fn take_widest_temp(sources: &mut Vec<Register>) -> Option<Register> {
        let idx = sources
            .iter()
            .enumerate()
            .filter(|(_, r)| r.temporary)
            .max_by_key(|(_, r)| r.width())
            .map(|(i, _)| i)?;
        Some(sources.swap_remove(idx))
    }

    /// The distinct source wires at one bit position.
    fn bit_controls(sources: &[Register], bit: usize) -> Vec<WireId> {
        let mut controls: Vec<WireId> = vec![];
        for source in sources {
            if let Some(&wire) = source.wires.get(bit) {
                if !controls.contains(&wire) {
                    controls.push(wire);
                }
            }
        }
        controls
    }

    /// Invert: in-place negation for a temporary operand, otherwise an
    /// all-ones register uncomputed to the complement by each source bit.
    fn lower_not(&mut self, source: Register) -> CompileResult<Register> {
        if source.temporary {
            for i in 0..source.wires.len() {
                self.emit_x(source.wires[i])?;
            }
            return Ok(source);
        }
        let out = self.create_temp(source.width())?;
        for i in 0..out.wires.len() {
            self.emit_x(out.wires[i])?;
        }
        for i in 0..source.wires.len() {
            self.emit_cx(source.wires[i], out.wires[i])?;
        }
        Ok(out)
    }

    /// Xor over N sources. Natural width is the widest source; the widest
    /// temporary operand is reused in place as the target when one exists.
    fn lower_xor(&mut self, mut sources: Vec<Register>, limit: Option<u32>) -> CompileResult<Register> {
        let natural = sources.iter().map(Register::width).max().unwrap_or(1);
        let width = limit.map_or(natural, |l| natural.min(l));

        let mut target = match Self::take_widest_temp(&mut sources) {
            Some(reg) => reg,
            None => self.create_temp(width)?,
        };
        self.resize_reg(&mut target, width)?;

        for source in &sources {
            for i in 0..source.wires.len().min(target.wires.len()) {
                self.emit_cx(source.wires[i], target.wires[i])?;
            }
        }
        for source in sources {
            self.drop_if_temporary(source);
        }
        Ok(target)
    }

    /// Bitwise and over N sources. Natural width is the narrowest source.
    ///
    /// When a temporary operand is reused as the target, each target bit is
    /// first evacuated to a borrowed wire by a swap so the multi-controlled
    /// negate lands on a zeroed cell, with the borrowed wire joining the
    /// control list. A fresh target needs no evacuation.
    fn lower_and(&mut self, mut sources: Vec<Register>, limit: Option<u32>) -> CompileResult<Register> {
        let natural = sources.iter().map(Register::width).min().unwrap_or(1);
        let width = limit.map_or(natural, |l| natural.min(l));

        match Self::take_widest_temp(&mut sources) {
            Some(mut target) => {
                self.resize_reg(&mut target, width)?;
                for i in 0..width as usize {
                    let mut controls = Self::bit_controls(&sources, i);
                    if controls.is_empty() {
                        // Every other source was this same register; the bit
                        // already holds the result.
                        continue;
                    }
                    let borrowed = self.pool.acquire(&mut self.circuit)?;
                    self.emit_swap(borrowed, target.wires[i])?;
                    controls.push(borrowed);
                    self.emit_mcx(controls, target.wires[i])?;
                    self.pool.release(borrowed);
                }
                for source in sources {
                    self.drop_if_temporary(source);
                }
                Ok(target)
            }
            None => {
                let target = self.create_temp(width)?;
                for i in 0..width as usize {
                    let controls = Self::bit_controls(&sources, i);
                    self.emit_mcx(controls, target.wires[i])?;
                }
                Ok(target)
            }
        }
    }

    /// Bitwise or over N sources, by De Morgan's law: negate the source
    /// bits and the target bit, apply the and construction, negate the
    /// source bits back. The target is always a fresh register; in-place
    /// or has no reversible construction.
    fn lower_or(&mut self, sources: Vec<Register>, limit: Option<u32>) -> CompileResult<Register> {
        let natural = sources.iter().map(Register::width).max().unwrap_or(1);
        let width = limit.map_or(natural, |l| natural.min(l));

        let target = self.create_temp(width)?;
        self.or_into(&sources, &target)?;
        for source in sources {
            self.drop_if_temporary(source);
        }
        Ok(target)
    }

    /// De Morgan or of `sources` into a zeroed `target`.
    pub(crate) fn or_into(&mut self, sources: &[Register], target: &Register) -> CompileResult<()> {
        for source in sources {
            if let Some(wire) = source.overlaps(target) {
                return Err(CompileError::AliasingViolation { wire });
            }
        }
        for i in 0..target.wires.len() {
            let controls = Self::bit_controls(sources, i);
            if controls.is_empty() {
                continue;
            }
            for &c in &controls {
                self.emit_x(c)?;
            }
            self.emit_x(target.wires[i])?;
            self.emit_mcx(controls.clone(), target.wires[i])?;
            for &c in &controls {
                self.emit_x(c)?;
            }
        }
        Ok(())
    }

    /// Left shift by a constant distance. A temporary operand is spliced:
    /// borrowed zero wires slide in at the least significant end and no
    /// gates are emitted.
    fn lower_shl(&mut self, source: Register, distance: u32, limit: Option<u32>) -> CompileResult<Register> {
        let natural = source.width().saturating_add(distance);
        let width = limit.map_or(natural, |l| natural.min(l));

        if source.temporary {
            let mut wires = Vec::with_capacity(natural as usize);
            for _ in 0..distance {
                wires.push(self.pool.acquire(&mut self.circuit)?);
            }
            wires.extend(source.wires);
            let mut out = Register::new(wires, true);
            self.resize_reg(&mut out, width)?;
            return Ok(out);
        }

        let out = self.create_temp(width)?;
        for i in 0..source.wires.len() {
            let shifted = i + distance as usize;
            if shifted < out.wires.len() {
                self.emit_cx(source.wires[i], out.wires[shifted])?;
            }
        }
        Ok(out)
    }

    /// Right shift by a constant distance. A temporary operand is spliced:
    /// the least significant wires are released. Shifting out every bit
    /// yields a one-wire zero register.
    fn lower_shr(&mut self, source: Register, distance: u32, limit: Option<u32>) -> CompileResult<Register> {
        if distance >= source.width() {
            self.drop_if_temporary(source);
            return self.create_temp(1);
        }
        let natural = source.width() - distance;
        let width = limit.map_or(natural, |l| natural.min(l));

        if source.temporary {
            let mut wires = source.wires;
            for wire in wires.drain(..distance as usize) {
                self.pool.release(wire);
            }
            let mut out = Register::new(wires, true);
            self.resize_reg(&mut out, width)?;
            return Ok(out);
        }

        let out = self.create_temp(width)?;
        for i in 0..out.wires.len() {
            self.emit_cx(source.wires[i + distance as usize], out.wires[i])?;
        }
        Ok(out)
    }
}
