//! Sindri Expression Compiler
//!
//! This crate translates a restricted imperative expression language —
//! boolean/bitwise assignments, conditionals, shifts, constants — into a
//! network of reversible logic operations over a pool of binary wires.
//!
//! # Overview
//!
//! The compiler walks one [`Function`]'s statement tree depth-first, lowering
//! each operator onto the closed reversible gate set of `sindri-ir` while
//! managing wire lifetimes: every intermediate register is either consumed in
//! place by the next operation or released back to the wire pool the moment
//! it is no longer referenced. Conditionals never branch; a predicate wire
//! holding the conjunction of all enclosing conditions guards every effectful
//! gate, and guarded assignments are corrected under the inverted predicate
//! so an `if`-body assignment behaves as `predicate ? new : old`.
//!
//! # Core Components
//!
//! - **AST**: [`Function`], [`Stmt`], [`Expr`], [`BinOp`] — the closed input
//!   statement tree
//! - **Compiler**: [`Compiler::compile`], producing a [`CompiledFunction`]
//! - **Templates**: fixed-topology adder and lookup-table generators in
//!   [`templates`]
//!
//! # Example
//!
//! ```rust
//! use sindri_compile::{Compiler, Expr, Function, Param, Stmt};
//!
//! // c = a & b; return c
//! let func = Function::new(
//!     "and3",
//!     vec![Param::new("a", 3), Param::new("b", 3)],
//!     vec![
//!         Stmt::assign("c", Expr::and(Expr::name("a"), Expr::name("b"))),
//!         Stmt::ret(Expr::name("c")),
//!     ],
//! );
//!
//! let compiled = Compiler::compile(&func).unwrap();
//! assert_eq!(compiled.ret.as_ref().unwrap().len(), 3);
//! assert_eq!(compiled.circuit.num_wires(), 9);
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod pool;
pub mod register;
pub mod templates;

mod emit;
mod lower;

pub use ast::{BinOp, Expr, Function, Param, Stmt};
pub use compiler::{CompiledFunction, Compiler};
pub use error::{CompileError, CompileResult};
pub use pool::WirePool;
pub use register::Register;
