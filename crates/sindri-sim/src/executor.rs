//! Execution of compiled functions.

use rustc_hash::FxHashMap;
use sindri_compile::CompiledFunction;
use sindri_ir::bits::uint_len;
use sindri_ir::{WireId, WireKind};
use tracing::debug;

use crate::error::{ExecError, ExecResult};
use crate::state::BitState;

/// The result of one execution.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Value measured on the return register, if the function returns.
    pub ret: Option<u64>,
    /// Final value of every bound variable.
    pub vars: FxHashMap<String, u64>,
}

/// Execute a compiled function once with the given argument values.
///
/// Every argument register must be assigned a value that fits its width;
/// the instruction stream then runs start to finish and the return register
/// and final variable bindings are read out.
pub fn execute(
    func: &CompiledFunction,
    args: &FxHashMap<String, u64>,
) -> ExecResult<Outcome> {
    // Group argument wires by register, in bit order.
    let mut arg_regs: FxHashMap<&str, Vec<WireId>> = FxHashMap::default();
    for wire in func.circuit.wires() {
        if wire.kind == WireKind::Argument {
            if let (Some(name), Some(index)) = (&wire.register, wire.index) {
                let reg = arg_regs.entry(name.as_str()).or_default();
                debug_assert_eq!(reg.len(), index as usize, "argument wires out of order");
                reg.push(wire.id);
            }
        }
    }

    for name in args.keys() {
        if !arg_regs.contains_key(name.as_str()) {
            return Err(ExecError::UnknownArgument { name: name.clone() });
        }
    }

    let mut state = BitState::new(func.circuit.num_wires());
    for (name, wires) in &arg_regs {
        let value = *args
            .get(*name)
            .ok_or_else(|| ExecError::MissingArgument {
                name: (*name).to_string(),
            })?;
        let width = wires.len() as u32;
        if uint_len(value) > width {
            return Err(ExecError::ValueTooWide {
                name: (*name).to_string(),
                value,
                width,
            });
        }
        state.load(wires, value);
    }

    debug!(
        wires = func.circuit.num_wires(),
        instructions = func.circuit.len(),
        "execute"
    );
    for instruction in func.circuit.instructions() {
        state.apply(instruction);
    }

    Ok(Outcome {
        ret: func.ret.as_deref().map(|wires| state.read(wires)),
        vars: func
            .bindings
            .iter()
            .map(|(name, wires)| (name.clone(), state.read(wires)))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sindri_compile::{Compiler, Expr, Function, Param, Stmt};

    fn args(pairs: &[(&str, u64)]) -> FxHashMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_missing_argument() {
        let func = Function::new(
            "f",
            vec![Param::new("a", 1)],
            vec![Stmt::ret(Expr::name("a"))],
        );
        let compiled = Compiler::compile(&func).unwrap();
        assert!(matches!(
            execute(&compiled, &args(&[])),
            Err(ExecError::MissingArgument { .. })
        ));
        assert!(matches!(
            execute(&compiled, &args(&[("a", 0), ("zz", 1)])),
            Err(ExecError::UnknownArgument { .. })
        ));
        assert!(matches!(
            execute(&compiled, &args(&[("a", 2)])),
            Err(ExecError::ValueTooWide { .. })
        ));
    }

    #[test]
    fn test_identity_return() {
        let func = Function::new(
            "f",
            vec![Param::new("a", 3)],
            vec![Stmt::ret(Expr::name("a"))],
        );
        let compiled = Compiler::compile(&func).unwrap();
        let out = execute(&compiled, &args(&[("a", 0b110)])).unwrap();
        assert_eq!(out.ret, Some(0b110));
        assert_eq!(out.vars["a"], 0b110);
    }
}
