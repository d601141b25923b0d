//! Sindri Classical Reversible Executor
//!
//! This crate runs finished circuit descriptions. The Sindri gate set is a
//! set of classical permutations, so execution is exact: one bit vector, one
//! pass over the instruction stream, no sampling.
//!
//! # Example
//!
//! ```rust
//! use rustc_hash::FxHashMap;
//! use sindri_compile::{Compiler, Expr, Function, Param, Stmt};
//! use sindri_sim::execute;
//!
//! let func = Function::new(
//!     "and3",
//!     vec![Param::new("a", 3), Param::new("b", 3)],
//!     vec![
//!         Stmt::assign("c", Expr::and(Expr::name("a"), Expr::name("b"))),
//!         Stmt::ret(Expr::name("c")),
//!     ],
//! );
//! let compiled = Compiler::compile(&func).unwrap();
//!
//! let mut args = FxHashMap::default();
//! args.insert("a".to_string(), 0b101);
//! args.insert("b".to_string(), 0b011);
//!
//! let outcome = execute(&compiled, &args).unwrap();
//! assert_eq!(outcome.ret, Some(0b001));
//! ```

pub mod error;
pub mod executor;
pub mod state;

pub use error::{ExecError, ExecResult};
pub use executor::{execute, Outcome};
pub use state::BitState;
