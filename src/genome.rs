//! Genome-wide coordinate conversion.
//!
//! A gpos collapses (chromosome, position) into one monotonic integer axis
//! by concatenating per-chromosome offsets. Chromosome order is 1..=24 in
//! the order of the supplied length table (index 0 = chr1), with the
//! mitochondrial contig (code 0) placed after the last entry so every valid
//! code converts.

use crate::error::{FilterError, Result};

#[derive(Debug, Clone)]
pub struct GenomeIndex {
    lengths: Vec<u64>,
    /// offsets[i] = gpos of base 1 of chromosome i+1.
    offsets: Vec<u64>,
    total: u64,
}

impl GenomeIndex {
    /// Build from an ordered chromosome length table, index 0 = chr1.
    pub fn new(chrom_lengths: Vec<u64>) -> Self {
        let mut offsets = Vec::with_capacity(chrom_lengths.len());
        let mut acc = 0u64;
        for &len in &chrom_lengths {
            offsets.push(acc);
            acc += len;
        }
        GenomeIndex {
            lengths: chrom_lengths,
            offsets,
            total: acc,
        }
    }

    pub fn chrom_lengths(&self) -> &[u64] {
        &self.lengths
    }

    /// Length of a chromosome by code. A code absent from the length table
    /// is an error; the table never carries the mitochondrial contig.
    pub fn chrom_len(&self, chrom: u8) -> Result<u64> {
        if chrom == 0 {
            return Err(FilterError::Reference(
                "no length entry for the mitochondrial contig".to_string(),
            ));
        }
        self.lengths
            .get((chrom - 1) as usize)
            .copied()
            .ok_or_else(|| self.missing(chrom))
    }

    /// Global coordinate of a 1-based chromosome-local position. Strictly
    /// increasing within a chromosome and across chromosome boundaries.
    pub fn gpos(&self, chrom: u8, pos: u64) -> Result<u64> {
        if pos == 0 {
            return Err(FilterError::Reference(format!(
                "position 0 on chromosome {} (positions are 1-based)",
                chrom
            )));
        }
        if chrom == 0 {
            return Ok(self.total + pos - 1);
        }
        match self.offsets.get((chrom - 1) as usize) {
            Some(&off) => Ok(off + pos - 1),
            None => Err(self.missing(chrom)),
        }
    }

    /// Elementwise conversion over parallel chromosome/position slices.
    pub fn chrom_pos_to_gpos(&self, chroms: &[u8], positions: &[u64]) -> Result<Vec<u64>> {
        debug_assert_eq!(chroms.len(), positions.len());
        chroms
            .iter()
            .zip(positions)
            .map(|(&c, &p)| self.gpos(c, p))
            .collect()
    }

    fn missing(&self, chrom: u8) -> FilterError {
        FilterError::Reference(format!(
            "chromosome {} absent from length table ({} entries)",
            chrom,
            self.lengths.len()
        ))
    }
}
