//! Reversible adder circuit generators.

use sindri_ir::{Circuit, IrResult, WireId};

/// Generate a one-bit full adder over four wires: `a`, `b`, `sum` (carry-in
/// on entry, sum bit on exit) and `cout`.
pub fn full_adder() -> IrResult<Circuit> {
    let mut qc = Circuit::new("full_adder");
    let a = qc.add_argument_reg("a", 1)[0];
    let b = qc.add_argument_reg("b", 1)[0];
    let sum = qc.add_argument_reg("sum", 1)[0];
    let cout = qc.add_argument_reg("cout", 1)[0];

    full_adder_into(&mut qc, a, b, sum, cout)?;
    Ok(qc)
}

/// Generate a ripple-carry adder: `sum = a + b mod 2^size`, with `sum`
/// expected to start at zero. The operand registers are preserved.
pub fn ripple_adder(size: u32) -> IrResult<Circuit> {
    let mut qc = Circuit::new("adder");
    let a = qc.add_argument_reg("a", size);
    let b = qc.add_argument_reg("b", size);
    let sum = qc.add_argument_reg("sum", size);

    if size == 0 {
        return Ok(qc);
    }

    // Each stage writes its carry into the next sum wire, which the next
    // stage then consumes as its carry-in.
    for i in 0..size as usize - 1 {
        full_adder_into(&mut qc, a[i], b[i], sum[i], sum[i + 1])?;
    }

    let last = size as usize - 1;
    qc.cx(a[last], sum[last])?;
    qc.cx(b[last], sum[last])?;

    Ok(qc)
}

fn full_adder_into(
    qc: &mut Circuit,
    a: WireId,
    b: WireId,
    sum: WireId,
    cout: WireId,
) -> IrResult<()> {
    qc.mcx([a, b], cout)?;
    qc.cx(a, b)?;
    qc.mcx([b, sum], cout)?;
    qc.cx(b, sum)?;
    qc.cx(a, b)?;
    Ok(())
}
