//! The compiler context and statement walker.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use sindri_ir::{Circuit, WireId};
use tracing::debug;

use crate::ast::{Expr, Function, Stmt};
use crate::error::{CompileError, CompileResult};
use crate::pool::WirePool;
use crate::register::Register;

/// The result of compiling one function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledFunction {
    /// The emitted circuit description.
    pub circuit: Circuit,
    /// Wires of the designated return register, least significant first,
    /// or `None` if the function has no return statement.
    pub ret: Option<Vec<WireId>>,
    /// Final wires of every bound variable, by name.
    pub bindings: FxHashMap<String, Vec<WireId>>,
    /// Wires left on the pool's free list when compilation finished.
    pub free_wires: Vec<WireId>,
}

/// A single in-progress compilation.
///
/// The compiler owns its wire pool, variable environment and predicate stack;
/// nothing is shared between compilations, so independent functions can be
/// compiled concurrently with independent `Compiler` instances.
pub struct Compiler {
    pub(crate) circuit: Circuit,
    pub(crate) pool: WirePool,
    pub(crate) env: FxHashMap<String, Register>,
    /// Wires backing function parameters; never released.
    pub(crate) param_wires: FxHashSet<WireId>,
    /// Conjunction wires of the enclosing conditionals, innermost last.
    pub(crate) predicates: Vec<WireId>,
    ret: Option<Register>,
}

impl Compiler {
    /// Create a fresh compilation context.
    pub(crate) fn new(name: &str) -> Self {
        Self {
            circuit: Circuit::new(name),
            pool: WirePool::new(),
            env: FxHashMap::default(),
            param_wires: FxHashSet::default(),
            predicates: Vec::new(),
            ret: None,
        }
    }

    /// Compile one function to a circuit description.
    ///
    /// This is the single entry point: a pure, deterministic, single-pass
    /// function of the statement tree. Any rejection aborts the whole
    /// compilation with no partial circuit.
    pub fn compile(func: &Function) -> CompileResult<CompiledFunction> {
        let mut c = Compiler::new(&func.name);

        for param in &func.params {
            if param.width == 0 {
                return Err(CompileError::InvalidResize { requested: 0 });
            }
            debug!(name = %param.name, width = param.width, "declare parameter");
            let wires = c.circuit.add_argument_reg(&param.name, param.width);
            c.param_wires.extend(wires.iter().copied());
            c.env
                .insert(param.name.clone(), Register::new(wires, false));
        }

        for stmt in &func.body {
            c.walk_stmt(stmt)?;
        }

        let Compiler {
            circuit,
            pool,
            env,
            ret,
            ..
        } = c;

        Ok(CompiledFunction {
            circuit,
            ret: ret.map(|r| r.wires),
            bindings: env.into_iter().map(|(k, v)| (k, v.wires)).collect(),
            free_wires: pool.free_wires().to_vec(),
        })
    }

    fn walk_stmt(&mut self, stmt: &Stmt) -> CompileResult<()> {
        if self.ret.is_some() {
            return Err(CompileError::StatementAfterReturn);
        }
        match stmt {
            Stmt::Assign {
                target,
                width,
                value,
            } => self.walk_assign(target, *width, value),
            Stmt::Return(value) => self.walk_return(value),
            Stmt::If {
                test,
                then_body,
                else_body,
            } => self.walk_if(test, then_body, else_body),
        }
    }

    /// Assignment, including the guarded-assignment correction.
    ///
    /// Under an active predicate the lowered value comes out as
    /// `predicate ? value : 0`, because every effectful gate the lowering
    /// emitted was guarded. The correction then copies the old binding in
    /// under the inverted predicate, turning the result into
    /// `predicate ? value : old` with no gate-level branching.
    fn walk_assign(&mut self, target: &str, width: Option<u32>, value: &Expr) -> CompileResult<()> {
        debug!(var = target, ?width, "assign");
        let mut new_reg = self.lower_expr(value, width)?;

        // A bare name evaluates to the bound register itself; materialize a
        // reversible copy so the two bindings never share wires.
        if !new_reg.temporary {
            new_reg = self.copy_reg(&new_reg)?;
        }

        if let Some(old) = self.env.remove(target) {
            if let Some(&pred) = self.predicates.last() {
                if new_reg.width() < old.width() {
                    self.resize_reg(&mut new_reg, old.width())?;
                }
                // Toggling the predicate wire itself is never guarded.
                self.circuit.x(pred)?;
                for i in 0..old.width().min(new_reg.width()) {
                    self.emit_cx(old.wires[i as usize], new_reg.wires[i as usize])?;
                }
                self.circuit.x(pred)?;
            }
            self.drop_unused_bits(old, &new_reg);
        }

        new_reg.temporary = false;
        self.env.insert(target.to_string(), new_reg);
        Ok(())
    }

    /// Bind the designated output register.
    fn walk_return(&mut self, value: &Expr) -> CompileResult<()> {
        debug!("return");
        // A return under a predicate has no reversible meaning: a bare name
        // would bind unconditionally and a lowered expression reads zero on
        // the untaken branch.
        if !self.predicates.is_empty() {
            return Err(CompileError::unsupported("return inside a conditional"));
        }
        let mut reg = match value {
            // A bare name returns the bound register directly, no copy.
            Expr::Name(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| CompileError::UnknownVariable { name: name.clone() })?,
            other => self.lower_expr(other, None)?,
        };
        // The returned value is retained for the caller; it must never be
        // reclaimed as a temporary.
        reg.temporary = false;
        self.ret = Some(reg);
        Ok(())
    }

    /// Conditional execution without branching.
    fn walk_if(&mut self, test: &Expr, then_body: &[Stmt], else_body: &[Stmt]) -> CompileResult<()> {
        debug!("if");
        let test_reg = self.lower_expr(test, None)?;
        let pred = self.collapse_to_bool(&test_reg)?;
        self.drop_if_temporary(test_reg);

        self.predicates.push(pred);
        for stmt in then_body {
            self.walk_stmt(stmt)?;
        }
        if !else_body.is_empty() {
            debug!("else");
            self.toggle_top_predicate()?;
            for stmt in else_body {
                self.walk_stmt(stmt)?;
            }
        }
        self.predicates.pop();
        self.pool.release(pred);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Param;
    use rustc_hash::FxHashSet;

    fn and_func() -> Function {
        Function::new(
            "and3",
            vec![Param::new("a", 3), Param::new("b", 3)],
            vec![
                Stmt::assign("c", Expr::and(Expr::name("a"), Expr::name("b"))),
                Stmt::ret(Expr::name("c")),
            ],
        )
    }

    #[test]
    fn test_compile_and() {
        let compiled = Compiler::compile(&and_func()).unwrap();
        assert_eq!(compiled.circuit.num_wires(), 9);
        assert_eq!(compiled.circuit.num_ancillas(), 3);
        assert_eq!(compiled.ret.as_ref().unwrap().len(), 3);
        assert!(compiled.free_wires.is_empty());
    }

    #[test]
    fn test_wire_conservation() {
        // Several temporaries come and go; every ancilla must end up either
        // free or owned by a live binding, never both.
        let func = Function::new(
            "f",
            vec![Param::new("a", 3), Param::new("b", 3)],
            vec![
                Stmt::assign(
                    "c",
                    Expr::xor(
                        Expr::not(Expr::name("a")),
                        Expr::or(Expr::name("b"), Expr::int(5)),
                    ),
                ),
                Stmt::assign("c", Expr::and(Expr::name("c"), Expr::name("a"))),
                Stmt::ret(Expr::name("c")),
            ],
        );
        let compiled = Compiler::compile(&func).unwrap();

        let free: FxHashSet<_> = compiled.free_wires.iter().copied().collect();
        assert_eq!(free.len(), compiled.free_wires.len(), "free list has dupes");

        let mut live: FxHashSet<_> = FxHashSet::default();
        for wires in compiled.bindings.values() {
            live.extend(wires.iter().copied());
        }
        if let Some(ret) = &compiled.ret {
            live.extend(ret.iter().copied());
        }

        assert!(free.is_disjoint(&live));
        for wire in compiled.circuit.wires() {
            assert!(
                free.contains(&wire.id) || live.contains(&wire.id),
                "wire {} neither free nor live",
                wire.id
            );
        }
    }

    #[test]
    fn test_reassignment_releases_old_register() {
        let func = Function::new(
            "f",
            vec![Param::new("a", 2)],
            vec![
                Stmt::assign("x", Expr::not(Expr::name("a"))),
                Stmt::assign("x", Expr::int(1)),
            ],
        );
        let compiled = Compiler::compile(&func).unwrap();
        // The constant is lowered before the old binding is superseded, so
        // one more ancilla is minted; the old register's two wires then go
        // back to the pool.
        assert_eq!(compiled.circuit.num_ancillas(), 3);
        assert_eq!(compiled.free_wires.len(), 2);
    }

    #[test]
    fn test_parameter_wires_survive_reassignment() {
        let func = Function::new(
            "f",
            vec![Param::new("a", 2)],
            vec![Stmt::assign("a", Expr::int(3))],
        );
        let compiled = Compiler::compile(&func).unwrap();
        // The argument register is never released.
        assert!(compiled.free_wires.is_empty());
        assert_ne!(compiled.bindings["a"], vec![sindri_ir::WireId(0), sindri_ir::WireId(1)]);
    }

    #[test]
    fn test_bare_name_assignment_copies() {
        let func = Function::new(
            "f",
            vec![Param::new("a", 2)],
            vec![Stmt::assign("x", Expr::name("a"))],
        );
        let compiled = Compiler::compile(&func).unwrap();
        let a = &compiled.bindings["a"];
        let x = &compiled.bindings["x"];
        assert!(a.iter().all(|w| !x.contains(w)), "bindings share wires");
    }

    #[test]
    fn test_bare_name_return_does_not_copy() {
        let compiled = Compiler::compile(&and_func()).unwrap();
        assert_eq!(compiled.ret.as_ref().unwrap(), &compiled.bindings["c"]);
    }

    #[test]
    fn test_statement_after_return_rejected() {
        let func = Function::new(
            "f",
            vec![Param::new("a", 1)],
            vec![
                Stmt::ret(Expr::name("a")),
                Stmt::assign("x", Expr::int(1)),
            ],
        );
        assert!(matches!(
            Compiler::compile(&func),
            Err(CompileError::StatementAfterReturn)
        ));
    }

    #[test]
    fn test_return_inside_conditional_rejected() {
        // `if a: return b ^ 1` must be rejected, not compiled with the
        // condition dropped.
        let func = Function::new(
            "f",
            vec![Param::new("a", 1), Param::new("b", 1)],
            vec![Stmt::if_then(
                Expr::name("a"),
                vec![Stmt::ret(Expr::xor(Expr::name("b"), Expr::int(1)))],
            )],
        );
        assert!(matches!(
            Compiler::compile(&func),
            Err(CompileError::UnsupportedConstruct { .. })
        ));

        // A bare-name return under a predicate is just as meaningless.
        let bare = Function::new(
            "f",
            vec![Param::new("a", 1), Param::new("b", 1)],
            vec![Stmt::if_then(
                Expr::name("a"),
                vec![Stmt::ret(Expr::name("b"))],
            )],
        );
        assert!(matches!(
            Compiler::compile(&bare),
            Err(CompileError::UnsupportedConstruct { .. })
        ));
    }

    #[test]
    fn test_zero_width_parameter_rejected() {
        let func = Function::new("f", vec![Param::new("a", 0)], vec![]);
        assert!(matches!(
            Compiler::compile(&func),
            Err(CompileError::InvalidResize { requested: 0 })
        ));
    }

    #[test]
    fn test_if_releases_predicate_wire() {
        let func = Function::new(
            "f",
            vec![Param::new("a", 1), Param::new("b", 1)],
            vec![Stmt::if_then(
                Expr::name("a"),
                vec![Stmt::assign("b", Expr::int(1))],
            )],
        );
        let compiled = Compiler::compile(&func).unwrap();
        // The predicate wire is back on the free list after the body.
        assert!(!compiled.free_wires.is_empty());
    }

    #[test]
    fn test_declared_width_truncates() {
        let func = Function::new(
            "f",
            vec![Param::new("a", 4)],
            vec![Stmt::assign_width(
                "x",
                2,
                Expr::xor(Expr::name("a"), Expr::int(15)),
            )],
        );
        let compiled = Compiler::compile(&func).unwrap();
        assert_eq!(compiled.bindings["x"].len(), 2);
    }
}
