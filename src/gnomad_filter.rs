//! Population-panel presence annotation.
//!
//! For each chromosome with panel data, the query positions are packed
//! into 1-bit presence masks (one over all rows, one per alternate base
//! restricted to SSNVs), ANDed byte-wise against the panel's precomputed
//! track, and the surviving bits decoded back to positions. Matching then
//! happens on global coordinates so one overlap table serves all
//! chromosomes.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::bitmask;
use crate::error::Result;
use crate::genome::GenomeIndex;
use crate::panel::TrackSource;
use crate::record::{MutationSet, Track};

/// Highest chromosome code with panel data; the panel carries no
/// sex-chromosome or mitochondrial variants.
const MAX_PANEL_CHROM: u8 = 22;

/// Per-row panel overlap flags, one per annotation track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GnomadFlags {
    pub all: bool,
    pub a: bool,
    pub c: bool,
    pub g: bool,
    pub t: bool,
}

impl GnomadFlags {
    pub fn get(&self, track: Track) -> bool {
        match track {
            Track::All => self.all,
            Track::A => self.a,
            Track::C => self.c,
            Track::G => self.g,
            Track::T => self.t,
        }
    }

    fn set(&mut self, track: Track) {
        match track {
            Track::All => self.all = true,
            Track::A => self.a = true,
            Track::C => self.c = true,
            Track::G => self.g = true,
            Track::T => self.t = true,
        }
    }
}

/// Annotate each mutation with whether the population panel has a variant
/// at its position, overall and per alternate base.
///
/// Returns one flags struct per input row, in input order. Rows on
/// chromosomes without panel data (X, Y, MT) keep default-false flags.
/// A chromosome present in the mutations but absent from the panel's
/// length table is an error.
pub fn filter_mutations_against_gnomad(
    muts: &MutationSet,
    panel: &impl TrackSource,
    index: &GenomeIndex,
) -> Result<Vec<GnomadFlags>> {
    // group row ids by chromosome, ascending
    let mut by_chrom: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for rec in muts.records() {
        by_chrom.entry(rec.chrom).or_default().push(rec.id);
    }

    // overlap gpos sets, one per track; an empty chromosome or track
    // simply contributes nothing
    let mut overlaps: [HashSet<u64>; 5] = Default::default();

    for (&chrom, ids) in &by_chrom {
        if chrom == 0 || chrom > MAX_PANEL_CHROM {
            continue;
        }
        let chrom_len = index.chrom_len(chrom)?;

        for track in Track::ALL {
            let positions: Vec<u64> = ids
                .iter()
                .map(|&id| muts.get(id))
                .filter(|m| match track.alt_base() {
                    None => true,
                    Some(base) => m.is_ssnv() && m.alt_allele == base,
                })
                .map(|m| m.pos)
                .collect();
            if positions.is_empty() {
                continue;
            }

            let query = bitmask::pack_positions(&positions, chrom_len)?;
            let reference = panel.packed_track(track, chrom)?;
            let hits = bitmask::intersect(&query, &reference)?;

            let track_set = &mut overlaps[track.index()];
            for pos in bitmask::decode_set_positions(&hits) {
                track_set.insert(index.gpos(chrom, pos)?);
            }
        }
        debug!("chr{}: intersected {} rows against panel", chrom, ids.len());
    }

    // scatter flags back by row id; membership is by gpos, so any row at
    // an overlapped position is flagged regardless of its own allele
    let mut flags = vec![GnomadFlags::default(); muts.len()];
    for rec in muts.records() {
        if rec.chrom == 0 || rec.chrom > MAX_PANEL_CHROM {
            continue;
        }
        let gpos = index.gpos(rec.chrom, rec.pos)?;
        for track in Track::ALL {
            if overlaps[track.index()].contains(&gpos) {
                flags[rec.id].set(track);
            }
        }
    }
    Ok(flags)
}
