//! spiralsort: order a 3D point cloud along an outward counterclockwise
//! spiral (sans-IO).
//!
//! Starting at a chosen node, every following node is picked greedily by
//! `|node - start| + |node - prev|`, restricted to the counterclockwise
//! side of the previous node so the path keeps turning one way. Windows,
//! strides and slices bound the search so large clouds stay tractable.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! nodes. Parsing and serialization live in `spiralsort-format`, file
//! handling in `spiralsort-cli`.

pub mod diagnostics;
pub mod distance;
pub mod rotate;
pub mod slices;
pub mod spiral;
pub mod stride;
pub mod types;

pub use diagnostics::{Clock, NoClock, SliceDiagnostics, SortDiagnostics, SortSummary};
pub use types::{Node, Point3, SortError, SpiralConfig, path_length};

/// Spiral-sort `cloud` starting from the node with id `start_id`, using
/// the default [`SpiralConfig`].
///
/// Returns every node of `cloud` exactly once, starting with the start
/// node, with the original coordinates untouched.
///
/// # Errors
///
/// Returns [`SortError::DuplicateId`] if two nodes share an id.
/// Returns [`SortError::UnknownStartNode`] if `start_id` is not in `cloud`.
pub fn sort(cloud: &[Node], start_id: &str) -> Result<Vec<Node>, SortError> {
    sort_with_config(cloud, start_id, &SpiralConfig::default())
}

/// Like [`sort`] with explicit tuning parameters.
///
/// # Errors
///
/// Returns [`SortError::InvalidConfig`] if `config` fails
/// [`SpiralConfig::validate`], otherwise as [`sort`].
pub fn sort_with_config(
    cloud: &[Node],
    start_id: &str,
    config: &SpiralConfig,
) -> Result<Vec<Node>, SortError> {
    spiral::spiral_sort(cloud, start_id, config, &NoClock).map(|(nodes, _)| nodes)
}

/// Run the spiral sort and collect per-slice diagnostics.
///
/// # Steps
///
/// 1. Validate the config, the ids and the start node
/// 2. Translate so the start node is the origin and sort by distance
/// 3. Plan slices over the distance-sorted nodes
/// 4. Per slice: merge with the carried-over nodes, run strides
/// 5. Map the placement order back to the caller's nodes
///
/// Nothing is computed when validation fails.
///
/// # Errors
///
/// Returns [`SortError::InvalidConfig`] for an invalid `config`.
/// Returns [`SortError::DuplicateId`] if two nodes share an id.
/// Returns [`SortError::UnknownStartNode`] if `start_id` is not in `cloud`.
pub fn sort_with_diagnostics<C: Clock>(
    cloud: &[Node],
    start_id: &str,
    config: &SpiralConfig,
    clock: &C,
) -> Result<(Vec<Node>, SortDiagnostics), SortError> {
    spiral::spiral_sort(cloud, start_id, config, clock)
}
