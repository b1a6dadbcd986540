//! Stride iteration: pop a batch of nodes from a spiral window.
//!
//! A stride takes a read-only snapshot of the [`WorkingSet`], selects a
//! bounded spiral window from it, then greedily pops up to `stride`
//! minimum-cost nodes from that window. The caller removes the popped
//! nodes from the working set with [`WorkingSet::without`].

use crate::distance::{self, Candidate};
use crate::rotate;
use crate::types::Point3;

/// Nodes not yet placed, kept in ascending distance from the start node.
///
/// Owned by the driver for the whole run. Nodes enter it once, through
/// [`extended`](Self::extended), and leave it once, through
/// [`without`](Self::without).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet(Vec<Candidate>);

impl WorkingSet {
    /// Create a working set from candidates already sorted by
    /// distance from the start node.
    #[must_use]
    pub const fn new(candidates: Vec<Candidate>) -> Self {
        Self(candidates)
    }

    /// Returns the number of nodes left.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if every node has been placed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the remaining candidates in distance order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.0
    }

    /// Append the next slice of the distance-sorted cloud after the
    /// nodes carried over from the previous slice.
    #[must_use]
    pub fn extended(mut self, slice: &[Candidate]) -> Self {
        self.0.extend_from_slice(slice);
        self
    }

    /// The working set without the `placed` nodes. Order is preserved.
    #[must_use]
    pub fn without(mut self, placed: &[Candidate]) -> Self {
        let before = self.0.len();
        self.0.retain(|c| !placed.iter().any(|p| p.index == c.index));
        debug_assert_eq!(
            before - self.0.len(),
            placed.len(),
            "placed nodes must come from the working set",
        );
        self
    }
}

/// Nodes popped by one stride.
#[derive(Debug, Clone, PartialEq)]
pub struct Stride {
    /// Popped nodes in placement order.
    pub placed: Vec<Candidate>,
    /// Position of the last popped node (unchanged if nothing was popped).
    pub prev: Point3,
    /// Number of times the counterclockwise filter came up empty and the
    /// unfiltered candidates were used instead.
    pub fallbacks: usize,
}

/// Select the spiral window for the next stride.
///
/// Without `directional`, the window is the `window_size` nodes nearest
/// to the start. With it, the counterclockwise side of `prev` is
/// cost-sorted from `prev` and truncated to `window_size`.
///
/// The returned flag is `true` when the counterclockwise filter was
/// empty and the whole working set was used.
#[must_use]
pub fn spiral_window(
    working: &WorkingSet,
    prev: Point3,
    window_size: usize,
    directional: bool,
) -> (Vec<Candidate>, bool) {
    let candidates = working.candidates();
    if !directional {
        let end = window_size.min(candidates.len());
        return (candidates[..end].to_vec(), false);
    }

    let positions: Vec<Point3> = candidates.iter().map(|c| c.position).collect();
    let (kept, fell_back) = rotate::counterclockwise_filter(&positions, prev);
    let filtered = kept.into_iter().map(|i| candidates[i]).collect();

    let mut window = distance::cost_sort(filtered, prev);
    window.truncate(window_size);
    (window, fell_back)
}

/// Pop the minimum-cost node of `window` as seen from `prev`.
///
/// Returns the node and whether the counterclockwise filter fell back to
/// the whole window. `None` only for an empty window.
fn pop_next(
    window: &mut Vec<Candidate>,
    prev: Point3,
    directional: bool,
) -> Option<(Candidate, bool)> {
    let (eligible, fell_back) = if directional {
        let positions: Vec<Point3> = window.iter().map(|c| c.position).collect();
        rotate::counterclockwise_filter(&positions, prev)
    } else {
        ((0..window.len()).collect::<Vec<_>>(), false)
    };

    let eligible_candidates: Vec<Candidate> = eligible.iter().map(|&i| window[i]).collect();
    let best = distance::argmin(&distance::costs(&eligible_candidates, prev))?;
    Some((window.remove(eligible[best]), fell_back))
}

/// Run one stride over a snapshot of the working set.
///
/// Pops up to `min(stride, window)` nodes, recomputing costs against the
/// most recently popped node before every pop.
#[must_use]
pub fn spiral_stride(
    working: &WorkingSet,
    prev: Point3,
    window_size: usize,
    stride: usize,
    directional: bool,
) -> Stride {
    let (mut window, window_fell_back) = spiral_window(working, prev, window_size, directional);
    let mut fallbacks = usize::from(window_fell_back);
    if window_fell_back {
        log::trace!("counterclockwise window empty, using all {} nodes", working.len());
    }

    let pops = stride.min(window.len());
    let mut placed = Vec::with_capacity(pops);
    let mut prev = prev;

    for _ in 0..pops {
        let Some((next, fell_back)) = pop_next(&mut window, prev, directional) else {
            break;
        };
        if fell_back {
            log::trace!(
                "counterclockwise pop empty, using all {} window nodes",
                window.len() + 1
            );
            fallbacks += 1;
        }
        prev = next.position;
        placed.push(next);
    }

    Stride {
        placed,
        prev,
        fallbacks,
    }
}
