//! Lookup-table circuit generator.

use sindri_ir::bits::uint_to_bits;
use sindri_ir::{Circuit, IrResult};

/// Generate a lookup table: for each `(key, value)` pair, reading the
/// circuit with the address register holding `key` xors `value` into the
/// data register.
///
/// Every key is matched by conjugating the address wires where the key has
/// a zero bit with X, so one multi-controlled negate per set value bit
/// fires exactly on that address.
pub fn lookup_table(
    address_bits: u32,
    data_bits: u32,
    values: &[(u64, u64)],
) -> IrResult<Circuit> {
    let mut qc = Circuit::new("lookup_table");
    let address = qc.add_argument_reg("addr", address_bits);
    let data = qc.add_argument_reg("data", data_bits);

    for &(key, value) in values {
        let key_bits = uint_to_bits(key, address_bits)?;
        let value_bits = uint_to_bits(value, data_bits)?;

        for (i, &bit) in key_bits.iter().enumerate() {
            if !bit {
                qc.x(address[i])?;
            }
        }

        for (i, &bit) in value_bits.iter().enumerate() {
            if bit {
                if address.len() == 1 {
                    qc.cx(address[0], data[i])?;
                } else {
                    qc.mcx(address.iter().copied(), data[i])?;
                }
            }
        }

        for (i, &bit) in key_bits.iter().enumerate() {
            if !bit {
                qc.x(address[i])?;
            }
        }
    }

    Ok(qc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sindri_ir::IrError;

    #[test]
    fn test_lookup_table_shape() {
        let qc = lookup_table(2, 3, &[(0, 1), (1, 3), (2, 6), (3, 7)]).unwrap();
        assert_eq!(qc.num_wires(), 5);
        assert!(!qc.is_empty());
    }

    #[test]
    fn test_key_out_of_range() {
        assert!(matches!(
            lookup_table(2, 3, &[(4, 1)]),
            Err(IrError::ValueTooWide { value: 4, width: 2 })
        ));
    }

    #[test]
    fn test_value_out_of_range() {
        assert!(matches!(
            lookup_table(2, 3, &[(1, 9)]),
            Err(IrError::ValueTooWide { value: 9, width: 3 })
        ));
    }
}
