//! Mutation-to-target interval assignment.
//!
//! Two-pointer merge over (chromosome, position)-sorted views of both
//! arenas; the arenas themselves are never reordered. Linear in the
//! combined input size once both sides are sorted.

use crate::error::{FilterError, Result};
use crate::record::{MutationSet, TargetSet};

/// Sentinel target id for mutations no interval covers.
pub const UNMAPPED: i64 = -1;

/// Assign each mutation to at most one covering target interval.
///
/// Returns the covering target id per mutation id, `UNMAPPED` where no
/// target's `[start, end]` contains the position. When several sorted
/// targets could cover a position, the first in (chromosome, start, end)
/// order wins; multimapping is not implemented and requesting it is an
/// explicit error rather than a silent no-op.
pub fn map_mutations_to_targets(
    muts: &MutationSet,
    targets: &TargetSet,
    allow_multimap: bool,
) -> Result<Vec<i64>> {
    if allow_multimap {
        return Err(FilterError::Unsupported(
            "mapping to multiple overlapping targets",
        ));
    }

    let mut assigned = vec![UNMAPPED; muts.len()];
    if muts.is_empty() || targets.is_empty() {
        return Ok(assigned);
    }

    let mut_order = muts.sorted_ids();
    let targ_order = targets.sorted_ids();
    let last = targ_order.len() - 1;

    let mut cursor = 0usize;
    for &mid in &mut_order {
        let m = muts.get(mid);

        // skip targets ending strictly before this mutation, without
        // overrunning the last target
        while cursor < last {
            let t = targets.get(targ_order[cursor]);
            let behind = t.chrom < m.chrom || (t.chrom == m.chrom && t.end < m.pos);
            if !behind {
                break;
            }
            cursor += 1;
        }

        let t = targets.get(targ_order[cursor]);
        if t.chrom == m.chrom && m.pos >= t.start && m.pos <= t.end {
            assigned[mid] = t.id as i64;
        }
    }
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_set(intervals: &[(u8, u64, u64)]) -> TargetSet {
        let mut targets = TargetSet::new();
        for &(chrom, start, end) in intervals {
            targets.push(chrom, start, end);
        }
        targets
    }

    #[test]
    fn test_basic_containment() {
        let mut muts = MutationSet::new();
        muts.push(1, 150, "A", "T");
        muts.push(1, 250, "A", "T");
        let targets = target_set(&[(1, 100, 200)]);

        let assigned = map_mutations_to_targets(&muts, &targets, false).unwrap();
        assert_eq!(assigned, vec![0, UNMAPPED]);
    }

    #[test]
    fn test_two_mutations_in_one_target() {
        let mut muts = MutationSet::new();
        muts.push(1, 120, "A", "T");
        muts.push(1, 180, "G", "C");
        let targets = target_set(&[(1, 100, 200)]);

        let assigned = map_mutations_to_targets(&muts, &targets, false).unwrap();
        assert_eq!(assigned, vec![0, 0]);
    }

    #[test]
    fn test_boundary_positions_inclusive() {
        let mut muts = MutationSet::new();
        muts.push(1, 100, "A", "T");
        muts.push(1, 200, "A", "T");
        muts.push(1, 99, "A", "T");
        muts.push(1, 201, "A", "T");
        let targets = target_set(&[(1, 100, 200)]);

        let assigned = map_mutations_to_targets(&muts, &targets, false).unwrap();
        assert_eq!(assigned, vec![0, 0, UNMAPPED, UNMAPPED]);
    }

    #[test]
    fn test_chromosome_separation() {
        let mut muts = MutationSet::new();
        muts.push(2, 150, "A", "T");
        muts.push(1, 150, "A", "T");
        let targets = target_set(&[(1, 100, 200), (2, 400, 500)]);

        let assigned = map_mutations_to_targets(&muts, &targets, false).unwrap();
        assert_eq!(assigned, vec![UNMAPPED, 0]);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let targets = target_set(&[(1, 100, 200), (1, 300, 400), (2, 50, 60)]);

        let mut forward = MutationSet::new();
        forward.push(1, 150, "A", "T");
        forward.push(1, 350, "A", "T");
        forward.push(2, 55, "A", "T");

        let mut reversed = MutationSet::new();
        reversed.push(2, 55, "A", "T");
        reversed.push(1, 350, "A", "T");
        reversed.push(1, 150, "A", "T");

        let fwd = map_mutations_to_targets(&forward, &targets, false).unwrap();
        let rev = map_mutations_to_targets(&reversed, &targets, false).unwrap();
        assert_eq!(fwd, vec![0, 1, 2]);
        assert_eq!(rev, vec![2, 1, 0]);
    }

    #[test]
    fn test_multimap_is_unsupported() {
        let muts = MutationSet::new();
        let targets = TargetSet::new();
        let err = map_mutations_to_targets(&muts, &targets, true).unwrap_err();
        assert!(matches!(err, FilterError::Unsupported(_)));
    }

    #[test]
    fn test_empty_inputs() {
        let mut muts = MutationSet::new();
        muts.push(1, 10, "A", "T");
        let empty_targets = TargetSet::new();
        assert_eq!(
            map_mutations_to_targets(&muts, &empty_targets, false).unwrap(),
            vec![UNMAPPED]
        );

        let empty_muts = MutationSet::new();
        let targets = target_set(&[(1, 1, 10)]);
        assert!(map_mutations_to_targets(&empty_muts, &targets, false)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_mutation_past_all_targets_stays_unmapped() {
        let mut muts = MutationSet::new();
        muts.push(5, 1_000_000, "A", "T");
        let targets = target_set(&[(1, 100, 200), (2, 100, 200)]);

        let assigned = map_mutations_to_targets(&muts, &targets, false).unwrap();
        assert_eq!(assigned, vec![UNMAPPED]);
    }
}
