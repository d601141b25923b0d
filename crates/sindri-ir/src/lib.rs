//! Sindri Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing reversible
//! circuits in Sindri. It forms the foundation of the compilation stack.
//!
//! # Overview
//!
//! A circuit is a flat, append-only description: an ordered set of declared
//! wires (binary state cells, partitioned into argument and ancilla wires)
//! and an ordered list of primitive reversible instructions over them. The
//! compiler in `sindri-compile` produces these descriptions; the executor in
//! `sindri-sim` runs them.
//!
//! # Core Components
//!
//! - **Wires**: [`WireId`], [`Wire`], [`WireKind`] for addressing state cells
//! - **Gates**: [`Gate`] — the closed reversible gate set (X, CX, MCX, Swap)
//! - **Instructions**: [`Instruction`] — gates plus pool-hygiene resets
//! - **Circuit**: [`Circuit`] append-only builder
//! - **Bits**: least-significant-first conversion helpers in [`bits`]
//!
//! # Example
//!
//! ```rust
//! use sindri_ir::{Circuit, WireId};
//!
//! let mut circuit = Circuit::new("majority");
//! let a = circuit.add_argument_reg("a", 1)[0];
//! let b = circuit.add_argument_reg("b", 1)[0];
//! let out = circuit.add_wire();
//!
//! circuit.mcx([a, b], out).unwrap();
//! assert_eq!(circuit.num_wires(), 3);
//! ```
//!
//! # Gate Set
//!
//! | Gate | Wires | Description |
//! |------|-------|-------------|
//! | `X` | 1 | Negate |
//! | `CX` | 2 | Controlled negate |
//! | `MCX` | 3+ | Multi-controlled negate |
//! | `Swap` | 2 | Exchange two wires |

pub mod bits;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod wire;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, Instruction};
pub use wire::{Wire, WireId, WireKind};
