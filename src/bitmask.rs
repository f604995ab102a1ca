//! 1-bit-per-position presence masks.
//!
//! Positions are packed 8 per byte, MSB first: 1-based position `p` sets
//! bit `0x80 >> ((p-1) % 8)` of byte `(p-1) / 8`. Decoding walks a fixed
//! 256-entry table mapping a byte value to the ordered offsets of its set
//! bits, so only nonzero bytes cost anything.

use crate::error::{FilterError, Result};

/// Set-bit offsets for every byte value, MSB first: (count, offsets).
static BYTE_OFFSETS: [(u8, [u8; 8]); 256] = build_byte_offsets();

const fn build_byte_offsets() -> [(u8, [u8; 8]); 256] {
    let mut table = [(0u8, [0u8; 8]); 256];
    let mut byte = 0usize;
    while byte < 256 {
        let mut offsets = [0u8; 8];
        let mut count = 0u8;
        let mut bit = 0u8;
        while bit < 8 {
            if byte & (0x80usize >> bit) != 0 {
                offsets[count as usize] = bit;
                count += 1;
            }
            bit += 1;
        }
        table[byte] = (count, offsets);
        byte += 1;
    }
    table
}

/// Bytes needed to pack a track covering `chrom_len` bases.
pub fn packed_len(chrom_len: u64) -> usize {
    ((chrom_len + 7) / 8) as usize
}

/// Pack 1-based positions into a presence mask sized to the chromosome.
/// Positions outside `[1, chrom_len]` are an error. Duplicates are
/// harmless; they set the same bit.
pub fn pack_positions(positions: &[u64], chrom_len: u64) -> Result<Vec<u8>> {
    let mut mask = vec![0u8; packed_len(chrom_len)];
    for &pos in positions {
        if pos == 0 || pos > chrom_len {
            return Err(FilterError::Reference(format!(
                "position {} outside chromosome of length {}",
                pos, chrom_len
            )));
        }
        let off = pos - 1;
        mask[(off / 8) as usize] |= 0x80 >> (off % 8);
    }
    Ok(mask)
}

/// Byte-wise AND of two packed masks. Lengths must match.
pub fn intersect(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        return Err(FilterError::Reference(format!(
            "packed track length mismatch: {} vs {} bytes",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x & y).collect())
}

/// Decode every set bit of a packed mask back to its 1-based position,
/// in ascending order.
pub fn decode_set_positions(packed: &[u8]) -> Vec<u64> {
    let mut positions = Vec::new();
    for (idx, &byte) in packed.iter().enumerate() {
        if byte == 0 {
            continue;
        }
        let (count, offsets) = BYTE_OFFSETS[byte as usize];
        for &off in &offsets[..count as usize] {
            positions.push(8 * idx as u64 + u64::from(off) + 1);
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_byte_offset_table() {
        assert_eq!(BYTE_OFFSETS[0x00].0, 0);
        assert_eq!(BYTE_OFFSETS[0x80], (1, [0, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(BYTE_OFFSETS[0x01], (1, [7, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(BYTE_OFFSETS[0xff], (8, [0, 1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(BYTE_OFFSETS[0xa0].0, 2);
        assert_eq!(&BYTE_OFFSETS[0xa0].1[..2], &[0, 2]);
    }

    #[test]
    fn test_pack_decode_round_trip() {
        let positions = vec![1, 2, 8, 9, 63, 64];
        let mask = pack_positions(&positions, 64).unwrap();
        assert_eq!(mask.len(), 8);
        assert_eq!(decode_set_positions(&mask), positions);
    }

    #[test]
    fn test_pack_rejects_out_of_range() {
        assert!(pack_positions(&[0], 10).is_err());
        assert!(pack_positions(&[11], 10).is_err());
        assert!(pack_positions(&[10], 10).is_ok());
    }

    #[test]
    fn test_partial_last_byte() {
        // length 10 needs 2 bytes; position 10 lands in bit 1 of byte 1
        let mask = pack_positions(&[10], 10).unwrap();
        assert_eq!(mask, vec![0x00, 0x40]);
        assert_eq!(decode_set_positions(&mask), vec![10]);
    }

    #[test]
    fn test_intersect() {
        let a = pack_positions(&[3, 5, 17], 24).unwrap();
        let b = pack_positions(&[5, 17, 20], 24).unwrap();
        let hits = intersect(&a, &b).unwrap();
        assert_eq!(decode_set_positions(&hits), vec![5, 17]);
        assert!(intersect(&a, &[0u8; 2]).is_err());
    }

    #[test]
    fn test_empty_mask() {
        let mask = pack_positions(&[], 100).unwrap();
        assert!(decode_set_positions(&mask).is_empty());
    }
}
