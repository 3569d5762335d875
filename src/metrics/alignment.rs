/**
Group alignment distance: the number of operations (inserting a group, deleting a group or
reshaping a cluster of overlapping groups) needed to turn a sequence of groups into another one.
The distance does not depend on which sequence is taken as the reference.
*/
use ahash::AHashSet;
use either::Either;
use std::cmp::{max, Ordering};
use tracing::trace;

/// Two groups are compatible when they share at least one token index.
fn compatible(first: &[usize], second: &[usize]) -> bool {
    first.iter().any(|index| second.contains(index))
}

/// Returns the length of the leading run of `groups` that stays compatible with `opposing`.
///
/// The run ends at the first index not contained in `opposing`. The group holding that index is
/// excluded from the run if it is its first index, and included otherwise.
fn compatibility_boundary<G: AsRef<[usize]>>(groups: &[G], opposing: &[usize]) -> usize {
    for (position, group) in groups.iter().enumerate() {
        if let Some(offset) = group
            .as_ref()
            .iter()
            .position(|index| !opposing.contains(index))
        {
            return if offset == 0 { position } else { position + 1 };
        }
    }
    groups.len()
}

/// Picks the side keeping a single group when two clusters of groups are reshaped into each
/// other. `Left(run)`: the reference is atomic and `run` comparison groups are consumed.
/// `Right(run)`: the comparison is atomic and `run` reference groups are consumed.
fn atomic_side(reference_run: usize, comparison_run: usize) -> Option<Either<usize, usize>> {
    match reference_run.cmp(&comparison_run) {
        Ordering::Less => Some(Either::Left(comparison_run)),
        Ordering::Greater => Some(Either::Right(reference_run)),
        Ordering::Equal => None,
    }
}

/// Cost of merging the `run` into the `atomic` group: every token in only one of them must be
/// moved, and every extra group of the run must be merged.
fn reshape_cost<G: AsRef<[usize]>>(run: &[G], atomic: &[usize]) -> usize {
    let union: AHashSet<usize> = run.iter().flat_map(|g| g.as_ref().iter().copied()).collect();
    let atomic: AHashSet<usize> = atomic.iter().copied().collect();
    union.symmetric_difference(&atomic).count() + run.len().saturating_sub(1)
}

/// Groups consumed from each sequence by one alignment step, and what the step costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    reference: usize,
    comparison: usize,
    cost: usize,
}

/// Aligns the leading groups of two non-empty sequences.
fn step<R, C>(reference: &[R], comparison: &[C]) -> Step
where
    R: AsRef<[usize]>,
    C: AsRef<[usize]>,
{
    let reference_head = reference[0].as_ref();
    let comparison_head = comparison[0].as_ref();
    if reference_head == comparison_head {
        return Step {
            reference: 1,
            comparison: 1,
            cost: 0,
        };
    }
    if !compatible(reference_head, comparison_head) {
        // The group starting first is missing from the other sequence.
        return if reference_head.first() < comparison_head.first() {
            Step {
                reference: 1,
                comparison: 0,
                cost: 1,
            }
        } else {
            Step {
                reference: 0,
                comparison: 1,
                cost: 1,
            }
        };
    }
    let reference_run = compatibility_boundary(reference, comparison_head);
    let comparison_run = compatibility_boundary(comparison, reference_head);
    match atomic_side(reference_run, comparison_run) {
        Some(Either::Left(run)) => Step {
            reference: 1,
            comparison: run,
            cost: reshape_cost(&comparison[..run], reference_head),
        },
        Some(Either::Right(run)) => Step {
            reference: run,
            comparison: 1,
            cost: reshape_cost(&reference[..run], comparison_head),
        },
        None => {
            // Clusters of the same size are aligned group by group.
            let run = max(reference_run, 1);
            Step {
                reference: run,
                comparison: run,
                cost: run - 1,
            }
        }
    }
}

/// Minimum number of insertions, deletions and reshapes needed to turn the `reference` groups
/// into the `comparison` groups. Both sequences must be sorted by their first index.
///
/// ```rust
/// use rusiaa::group_alignment_distance;
///
/// let reference = vec![vec![0], vec![3], vec![24, 25]];
/// let comparison = vec![vec![0], vec![3], vec![25]];
/// assert_eq!(group_alignment_distance(&reference, &comparison), 1);
/// ```
pub fn group_alignment_distance<R, C>(reference: &[R], comparison: &[C]) -> usize
where
    R: AsRef<[usize]>,
    C: AsRef<[usize]>,
{
    let (mut r, mut c) = (0, 0);
    let mut distance = 0;
    while r < reference.len() && c < comparison.len() {
        let next = step(&reference[r..], &comparison[c..]);
        trace!("Alignment step at ({}, {}): {:?}", r, c, next);
        r += next.reference;
        c += next.comparison;
        distance += next.cost;
    }
    // Every group left over is either inserted or deleted.
    distance + (reference.len() - r) + (comparison.len() - c)
}

/// Group alignment distance divided by the length of the longest sequence. Two empty sequences
/// are at a distance of 0.
pub fn normalized_group_alignment_distance<R, C>(reference: &[R], comparison: &[C]) -> f64
where
    R: AsRef<[usize]>,
    C: AsRef<[usize]>,
{
    let longest = max(reference.len(), comparison.len());
    if longest == 0 {
        return 0.0;
    }
    group_alignment_distance(reference, comparison) as f64 / longest as f64
}
