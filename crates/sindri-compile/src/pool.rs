//! Free-list wire pool.

use sindri_ir::{Circuit, IrResult, WireId};
use tracing::trace;

/// A free-list allocator handing out single binary cells.
///
/// Every wire handed out is at logical zero: freshly minted wires start
/// there, and recycled wires get a reset instruction before reuse. Released
/// wires may hold garbage; the reset on the next acquire covers it. The pool
/// is unbounded and grows the circuit's ancilla partition on demand.
#[derive(Debug, Default)]
pub struct WirePool {
    free: Vec<WireId>,
}

impl WirePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out one zeroed wire, minting a new circuit wire if the free
    /// list is empty.
    pub fn acquire(&mut self, circuit: &mut Circuit) -> IrResult<WireId> {
        match self.free.pop() {
            Some(wire) => {
                trace!(%wire, "recycle wire");
                circuit.reset(wire)?;
                Ok(wire)
            }
            None => {
                let wire = circuit.add_wire();
                trace!(%wire, "mint wire");
                Ok(wire)
            }
        }
    }

    /// Return a wire to the free list.
    pub fn release(&mut self, wire: WireId) {
        debug_assert!(!self.free.contains(&wire), "double release of {wire}");
        trace!(%wire, "release wire");
        self.free.push(wire);
    }

    /// Wires currently on the free list.
    pub fn free_wires(&self) -> &[WireId] {
        &self.free
    }

    /// Number of wires currently free.
    pub fn num_free(&self) -> usize {
        self.free.len()
    }
}
