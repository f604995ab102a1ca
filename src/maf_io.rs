//! Tab-separated table boundary.
//!
//! Reads MAF-style mutation tables and target interval tables into the
//! typed arenas. Chromosome names run through the codec here; a name that
//! does not map to an integer code is a hard error at this boundary (the
//! lenient string passthrough exists only in the codec itself).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::chrom::{encode_chrom, ChromCode};
use crate::record::{MutationSet, TargetSet};
use crate::schema::MafSchema;

/// Read a tab-separated MAF-style table. The header row is resolved
/// against `schema` once; read counts are attached where both count
/// columns resolved.
pub fn read_maf<P: AsRef<Path>>(path: P, schema: &MafSchema) -> Result<MutationSet> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening MAF {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let header_line = match lines.next() {
        Some(line) => line?,
        None => bail!("MAF {} is empty", path.display()),
    };
    let header: Vec<&str> = header_line.split('\t').collect();
    let resolved = schema.resolve(&header)?;

    let mut muts = MutationSet::new();
    for (lineno, line) in lines.enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let row = lineno + 2; // 1-based, counting the header

        let chrom = parse_chrom(field(&fields, resolved.chrom, row)?)
            .with_context(|| format!("line {} of {}", row, path.display()))?;
        let pos: u64 = field(&fields, resolved.pos, row)?
            .parse()
            .with_context(|| format!("bad position at line {} of {}", row, path.display()))?;

        let id = muts.push(
            chrom,
            pos,
            field(&fields, resolved.ref_allele, row)?,
            field(&fields, resolved.alt_allele, row)?,
        );

        if let (Some(ri), Some(ai)) = (resolved.n_ref, resolved.n_alt) {
            let n_ref: u32 = field(&fields, ri, row)?
                .parse()
                .with_context(|| format!("bad n_ref at line {} of {}", row, path.display()))?;
            let n_alt: u32 = field(&fields, ai, row)?
                .parse()
                .with_context(|| format!("bad n_alt at line {} of {}", row, path.display()))?;
            muts.set_counts(id, n_ref, n_alt);
        }
    }
    Ok(muts)
}

/// Read a headerless tab-separated interval table: chromosome, start, end
/// (1-based, inclusive). Target ids are assigned by row rank.
pub fn read_targets<P: AsRef<Path>>(path: P) -> Result<TargetSet> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening targets {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut targets = TargetSet::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            bail!(
                "line {} of {}: expected at least 3 columns, got {}",
                lineno + 1,
                path.display(),
                fields.len()
            );
        }
        let chrom = parse_chrom(fields[0])
            .with_context(|| format!("line {} of {}", lineno + 1, path.display()))?;
        let start: u64 = fields[1]
            .parse()
            .with_context(|| format!("bad start at line {} of {}", lineno + 1, path.display()))?;
        let end: u64 = fields[2]
            .parse()
            .with_context(|| format!("bad end at line {} of {}", lineno + 1, path.display()))?;
        if end < start {
            bail!(
                "line {} of {}: interval end {} before start {}",
                lineno + 1,
                path.display(),
                end,
                start
            );
        }
        targets.push(chrom, start, end);
    }
    Ok(targets)
}

fn field<'a>(fields: &[&'a str], idx: usize, row: usize) -> Result<&'a str> {
    fields
        .get(idx)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("line {}: missing column {}", row, idx))
}

/// Chromosomes must arrive as integer codes 1-24 (0 for MT); bare and
/// chr-prefixed names are accepted and encoded.
fn parse_chrom(raw: &str) -> Result<u8> {
    match encode_chrom(raw) {
        ChromCode::Mapped(code) => Ok(code),
        ChromCode::Passthrough(name) => {
            bail!("chromosome '{}' is not an integer code 1-24 or a recognized name", name)
        }
    }
}
