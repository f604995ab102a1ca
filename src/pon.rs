//! Panel-of-normals artifact scoring.
//!
//! The PoN file is a flat array of little-endian u16 counters, 8
//! allele-frequency bins per site, addressed by global coordinate. Each
//! mutation's observed alt/ref counts parameterize a Beta posterior whose
//! credible mass over discrete AF bins is dotted with the panel's
//! tail distribution at that site.

use std::fs::File;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use memmap2::Mmap;
use statrs::distribution::{Beta, ContinuousCDF};

use crate::error::{FilterError, Result};
use crate::genome::GenomeIndex;
use crate::record::MutationSet;

/// Allele-frequency bin edges for the credible-mass discretization.
pub const AF_BIN_EDGES: [f64; 6] = [0.0, 0.001, 0.003, 0.03, 0.2, 1.0];

/// Histogram bins stored per panel site.
pub const PON_BINS: usize = 8;

/// Bytes per packed panel counter.
const COUNTER_WIDTH: usize = 2;

/// Guard against log10(0) for sites with no panel mass.
const SCORE_EPSILON: f64 = 1e-20;

/// Fetch the 8-bin allele-count histogram stored at each global coordinate.
pub fn fetch_pon_histograms<P: AsRef<Path>>(
    path: P,
    gposes: &[u64],
) -> Result<Vec<[u32; PON_BINS]>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FilterError::PanelNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    debug!(
        "PoN {}: {} bytes, fetching {} sites",
        path.display(),
        mmap.len(),
        gposes.len()
    );

    let site_width = (COUNTER_WIDTH * PON_BINS) as u64;
    let mut histograms = Vec::with_capacity(gposes.len());
    for &gpos in gposes {
        let start = site_width * gpos;
        let end = start + site_width;
        if end > mmap.len() as u64 {
            return Err(FilterError::Reference(format!(
                "PoN file {} too short for gpos {} ({} bytes)",
                path.display(),
                gpos,
                mmap.len()
            )));
        }
        let bytes = &mmap[start as usize..end as usize];
        let mut hist = [0u32; PON_BINS];
        for (bin, count) in hist.iter_mut().enumerate() {
            let off = COUNTER_WIDTH * bin;
            *count = u32::from(LittleEndian::read_u16(&bytes[off..off + COUNTER_WIDTH]));
        }
        histograms.push(hist);
    }
    Ok(histograms)
}

/// Score each mutation against a panel of normals. Returns one score per
/// row, input order: log10 of the overlap between the Beta(alt+1, ref+1)
/// credible mass and the panel's AF tail distribution at that site. More
/// panel mass at or above the observed allele fraction pushes the score
/// toward 0; a site the panel never saw bottoms out at log10 of the
/// epsilon guard.
pub fn score_mutations_against_pon<P: AsRef<Path>>(
    muts: &MutationSet,
    pon_path: P,
    index: &GenomeIndex,
) -> Result<Vec<f64>> {
    let mut gposes = Vec::with_capacity(muts.len());
    let mut counts = Vec::with_capacity(muts.len());
    for rec in muts.records() {
        let (n_alt, n_ref) = match (rec.n_alt, rec.n_ref) {
            (Some(alt), Some(rf)) => (alt, rf),
            _ => {
                return Err(FilterError::Schema(format!(
                    "mutation {} lacks n_alt/n_ref read counts",
                    rec.id
                )))
            }
        };
        counts.push((n_alt, n_ref));
        gposes.push(index.gpos(rec.chrom, rec.pos)?);
    }

    let histograms = fetch_pon_histograms(pon_path, &gposes)?;

    let mut scores = Vec::with_capacity(muts.len());
    for (&(n_alt, n_ref), hist) in counts.iter().zip(&histograms) {
        let mass = beta_credible_mass(n_alt, n_ref)?;
        let tail = panel_tail_fractions(hist);
        let dot: f64 = mass.iter().zip(&tail).map(|(m, t)| m * t).sum();
        scores.push((dot + SCORE_EPSILON).log10());
    }
    Ok(scores)
}

/// Posterior probability mass a Beta(alt+1, ref+1) model places in each
/// AF bin.
fn beta_credible_mass(n_alt: u32, n_ref: u32) -> Result<[f64; 5]> {
    let posterior = Beta::new(f64::from(n_alt) + 1.0, f64::from(n_ref) + 1.0)
        .map_err(|e| FilterError::Reference(format!("beta posterior: {}", e)))?;
    let mut mass = [0.0f64; 5];
    let mut below = posterior.cdf(AF_BIN_EDGES[0]);
    for (bin, m) in mass.iter_mut().enumerate() {
        let upto = posterior.cdf(AF_BIN_EDGES[bin + 1]);
        *m = upto - below;
        below = upto;
    }
    Ok(mass)
}

/// Fraction of panel samples at or above each AF-bin boundary. Bins 2..=6
/// carry the distribution, with bin 7 folded into bin 6; the denominator
/// is the site's total count.
fn panel_tail_fractions(hist: &[u32; PON_BINS]) -> [f64; 5] {
    let total: u32 = hist.iter().sum();
    let folded = [hist[2], hist[3], hist[4], hist[5], hist[6] + hist[7]];
    let mut tail = [0.0f64; 5];
    let mut acc = 0u32;
    for bin in (0..5).rev() {
        acc += folded[bin];
        tail[bin] = if total > 0 {
            f64::from(acc) / f64::from(total)
        } else {
            0.0
        };
    }
    tail
}
