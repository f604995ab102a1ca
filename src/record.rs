//! Mutation and target interval arenas.
//!
//! Records carry a stable integer id (their index in the arena). Sorting
//! for the merge algorithms happens on permutation vectors, never on the
//! arena itself, so results always scatter back by id.

/// A single somatic mutation call. `pos` is 1-based and chromosome-local.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub id: usize,
    /// 1-22 autosomes, 23 = X, 24 = Y, 0 = mitochondrial.
    pub chrom: u8,
    pub pos: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    /// Reference-supporting read count, where the caller has one.
    pub n_ref: Option<u32>,
    /// Alternate-supporting read count.
    pub n_alt: Option<u32>,
}

impl Mutation {
    /// Simple single-nucleotide substitution: ref and alt alleles each a
    /// single A/C/G/T base.
    pub fn is_ssnv(&self) -> bool {
        is_base(&self.ref_allele) && is_base(&self.alt_allele)
    }
}

fn is_base(allele: &str) -> bool {
    matches!(allele, "A" | "C" | "G" | "T")
}

/// Arena of mutation records with id = insertion index.
#[derive(Debug, Clone, Default)]
pub struct MutationSet {
    records: Vec<Mutation>,
}

impl MutationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, assigning it the next id.
    pub fn push(
        &mut self,
        chrom: u8,
        pos: u64,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> usize {
        debug_assert!(chrom <= 24, "chromosome code {} out of range", chrom);
        let id = self.records.len();
        self.records.push(Mutation {
            id,
            chrom,
            pos,
            ref_allele: ref_allele.into(),
            alt_allele: alt_allele.into(),
            n_ref: None,
            n_alt: None,
        });
        id
    }

    /// Attach supporting read counts to an existing record.
    pub fn set_counts(&mut self, id: usize, n_ref: u32, n_alt: u32) {
        let rec = &mut self.records[id];
        rec.n_ref = Some(n_ref);
        rec.n_alt = Some(n_alt);
    }

    pub fn get(&self, id: usize) -> &Mutation {
        &self.records[id]
    }

    pub fn records(&self) -> &[Mutation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids ordered by (chromosome, position). Ties keep id order.
    pub fn sorted_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = (0..self.records.len()).collect();
        ids.sort_by_key(|&id| {
            let r = &self.records[id];
            (r.chrom, r.pos, id)
        });
        ids
    }
}

/// A capture target interval with inclusive ends.
#[derive(Debug, Clone)]
pub struct Target {
    pub id: usize,
    pub chrom: u8,
    pub start: u64,
    pub end: u64,
}

/// Arena of target intervals with id = insertion index.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    records: Vec<Target>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chrom: u8, start: u64, end: u64) -> usize {
        let id = self.records.len();
        self.records.push(Target {
            id,
            chrom,
            start,
            end,
        });
        id
    }

    pub fn get(&self, id: usize) -> &Target {
        &self.records[id]
    }

    pub fn records(&self) -> &[Target] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids ordered by (chromosome, start, end). Ties keep id order.
    pub fn sorted_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = (0..self.records.len()).collect();
        ids.sort_by_key(|&id| {
            let t = &self.records[id];
            (t.chrom, t.start, t.end, id)
        });
        ids
    }
}

/// Annotation tracks in the reference panel: one over all positions, one
/// per alternate base restricted to SSNVs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    All,
    A,
    C,
    G,
    T,
}

impl Track {
    pub const ALL: [Track; 5] = [Track::All, Track::A, Track::C, Track::G, Track::T];

    /// File stem of the packed reference track for this selector.
    pub fn stem(&self) -> &'static str {
        match self {
            Track::All => "all",
            Track::A => "to_A",
            Track::C => "to_C",
            Track::G => "to_G",
            Track::T => "to_T",
        }
    }

    /// Alternate base this track is restricted to, if any.
    pub fn alt_base(&self) -> Option<&'static str> {
        match self {
            Track::All => None,
            Track::A => Some("A"),
            Track::C => Some("C"),
            Track::G => Some("G"),
            Track::T => Some("T"),
        }
    }

    /// Dense index for per-track accumulators.
    pub fn index(&self) -> usize {
        match self {
            Track::All => 0,
            Track::A => 1,
            Track::C => 2,
            Track::G => 3,
            Track::T => 4,
        }
    }
}
