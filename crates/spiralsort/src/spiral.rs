//! The spiral driver: setup, slice traversal and stride loop.
//!
//! ```text
//! Setup -> for each slice: accumulate slice -> strides -> Done
//! ```
//!
//! Every slice but the last stops once the working set has shrunk to
//! half the slice length; the remainder is carried into the next slice
//! so nodes near the boundary still see their true neighbours. The last
//! slice runs until the working set is empty.

use std::collections::HashSet;
use std::ops::Range;

use crate::diagnostics::{Clock, SliceDiagnostics, SortDiagnostics, SortSummary};
use crate::distance::{self, Candidate};
use crate::slices::{compute_slices, half_slice};
use crate::stride::{WorkingSet, spiral_stride};
use crate::types::{Node, Point3, SortError, SpiralConfig, path_length};

/// Reject clouds with repeated ids.
///
/// # Errors
///
/// Returns [`SortError::DuplicateId`] with the first id seen twice.
pub fn check_unique_ids(cloud: &[Node]) -> Result<(), SortError> {
    let mut seen = HashSet::with_capacity(cloud.len());
    match cloud.iter().find(|node| !seen.insert(node.id.as_str())) {
        Some(node) => Err(SortError::DuplicateId(node.id.clone())),
        None => Ok(()),
    }
}

/// Translate the cloud so the start node is the origin, drop the start
/// node, and sort the rest by distance from it (stable).
fn distance_sorted(cloud: &[Node], start_index: usize) -> Vec<Candidate> {
    let origin = cloud[start_index].position;
    let (indices, positions): (Vec<usize>, Vec<Point3>) = cloud
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != start_index)
        .map(|(i, node)| (i, node.position.offset_from(origin)))
        .unzip();
    let from_start = distance::distances_from(&positions, Point3::ORIGIN);

    let mut candidates: Vec<Candidate> = indices
        .into_iter()
        .zip(positions)
        .zip(from_start)
        .map(|((index, position), from_start)| Candidate {
            index,
            position,
            from_start,
        })
        .collect();
    candidates.sort_by(|a, b| a.from_start.total_cmp(&b.from_start));
    candidates
}

/// Mutable state of one run.
struct Run<'a> {
    config: &'a SpiralConfig,
    /// Cloud indices in placement order.
    order: Vec<usize>,
    /// Position of the most recently placed node.
    prev: Point3,
    working: WorkingSet,
}

impl Run<'_> {
    /// Process one slice and report what happened.
    fn slice(
        &mut self,
        slice_index: usize,
        slice: &Range<usize>,
        sorted: &[Candidate],
        is_last: bool,
    ) -> SliceDiagnostics {
        let carried_in = self.working.len();
        self.working = std::mem::take(&mut self.working).extended(&sorted[slice.clone()]);

        let window_size = self.config.spiral_window_size(slice_index);
        // Whole strides that fit above the half-slice floor; `None` means
        // run until empty.
        let budget = (!is_last)
            .then(|| self.working.len().saturating_sub(half_slice(slice)) / self.config.stride);

        log::debug!(
            "slice {slice_index} ({}..{}): window={window_size} carried_in={carried_in} budget={budget:?}",
            slice.start,
            slice.end,
        );

        let placed_before = self.order.len();
        let mut strides = 0;
        let mut directional_strides = 0;
        let mut fallbacks = 0;

        loop {
            let done = budget.map_or(self.working.is_empty(), |b| strides >= b);
            if done {
                break;
            }

            let directional = self.order.len() > self.config.warmup_nodes;
            let step = spiral_stride(
                &self.working,
                self.prev,
                window_size,
                self.config.stride,
                directional,
            );
            debug_assert!(
                !step.placed.is_empty(),
                "a stride over a non-empty working set places at least one node",
            );
            if step.placed.is_empty() {
                break;
            }

            log::trace!(
                "stride {strides}: placed {} (directional={directional})",
                step.placed.len()
            );
            strides += 1;
            directional_strides += usize::from(directional);
            fallbacks += step.fallbacks;
            self.prev = step.prev;
            self.order.extend(step.placed.iter().map(|c| c.index));
            self.working = std::mem::take(&mut self.working).without(&step.placed);
        }

        SliceDiagnostics {
            start: slice.start,
            end: slice.end,
            spiral_window: window_size,
            half_slice: half_slice(slice),
            carried_in,
            carried_out: self.working.len(),
            strides,
            directional_strides,
            placed: self.order.len() - placed_before,
            fallbacks,
            duration: std::time::Duration::ZERO,
        }
    }
}

/// Order `cloud` along an outward counterclockwise spiral from `start_id`.
///
/// # Errors
///
/// See [`crate::sort_with_diagnostics`].
pub fn spiral_sort<C: Clock>(
    cloud: &[Node],
    start_id: &str,
    config: &SpiralConfig,
    clock: &C,
) -> Result<(Vec<Node>, SortDiagnostics), SortError> {
    let run_start = clock.now();

    // --- Setup ---
    config.validate()?;
    check_unique_ids(cloud)?;
    let start_index = cloud
        .iter()
        .position(|node| node.id == start_id)
        .ok_or_else(|| SortError::UnknownStartNode(start_id.to_string()))?;

    let sorted = distance_sorted(cloud, start_index);
    let slices = compute_slices(sorted.len(), config);
    let setup_duration = clock.elapsed(&run_start);

    let mut run = Run {
        config,
        order: Vec::with_capacity(cloud.len()),
        prev: Point3::ORIGIN,
        working: WorkingSet::default(),
    };
    run.order.push(start_index);

    // --- Slices ---
    let mut slice_diagnostics = Vec::with_capacity(slices.len());
    for (slice_index, slice) in slices.iter().enumerate() {
        let slice_start = clock.now();
        let is_last = slice_index + 1 == slices.len();
        let mut diag = run.slice(slice_index, slice, &sorted, is_last);
        diag.duration = clock.elapsed(&slice_start);
        slice_diagnostics.push(diag);
    }

    // --- Done ---
    debug_assert!(run.working.is_empty(), "every node must be placed");
    debug_assert_eq!(run.order.len(), cloud.len(), "output must be a permutation");

    let nodes: Vec<Node> = run.order.iter().map(|&i| cloud[i].clone()).collect();
    let length = path_length(&nodes);
    #[allow(clippy::cast_precision_loss)]
    let mean_step = if nodes.len() > 1 {
        length / (nodes.len() - 1) as f64
    } else {
        0.0
    };

    let summary = SortSummary {
        node_count: nodes.len(),
        slice_count: slice_diagnostics.len(),
        stride_count: slice_diagnostics.iter().map(|s| s.strides).sum(),
        fallback_count: slice_diagnostics.iter().map(|s| s.fallbacks).sum(),
        path_length: length,
        mean_step,
    };
    log::info!(
        "spiral-sorted {} nodes in {} slices ({} strides, {} fallbacks)",
        summary.node_count,
        summary.slice_count,
        summary.stride_count,
        summary.fallback_count,
    );

    Ok((
        nodes,
        SortDiagnostics {
            setup_duration,
            slices: slice_diagnostics,
            total_duration: clock.elapsed(&run_start),
            summary,
        },
    ))
}
