//! Run diagnostics: timing and counts for setup and every slice.
//!
//! Intended for tuning the window, stride and slice parameters on real
//! clouds. Timing goes through the [`Clock`] trait so this crate never
//! touches a platform time API; front ends supply their own clock.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Source of timestamps for diagnostics.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// A [`Clock`] that reports every duration as zero.
///
/// Used when the caller only wants the sorted nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClock;

impl Clock for NoClock {
    type Instant = ();

    fn now(&self) {}

    fn elapsed(&self, _since: &()) -> Duration {
        Duration::ZERO
    }
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortDiagnostics {
    /// Validation, translation and distance sort.
    #[serde(with = "duration_serde")]
    pub setup_duration: Duration,
    /// One entry per planned slice, in processing order.
    pub slices: Vec<SliceDiagnostics>,
    /// Wall-clock duration of the whole sort.
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    pub summary: SortSummary,
}

/// Diagnostics for one slice of the distance-sorted cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceDiagnostics {
    /// First index of the slice in the distance-sorted cloud.
    pub start: usize,
    /// One past the last index.
    pub end: usize,
    /// Spiral window size used for this slice.
    pub spiral_window: usize,
    /// Working-set size at which a non-last slice stops.
    pub half_slice: usize,
    /// Nodes carried over from the previous slice.
    pub carried_in: usize,
    /// Nodes left for the next slice (zero for the last one).
    pub carried_out: usize,
    /// Strides executed.
    pub strides: usize,
    /// Strides that applied the counterclockwise filter.
    pub directional_strides: usize,
    /// Nodes placed while processing this slice.
    pub placed: usize,
    /// Times the counterclockwise filter was empty and all candidates
    /// were used instead.
    pub fallbacks: usize,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// Totals for the entire sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSummary {
    /// Nodes in the cloud, start node included.
    pub node_count: usize,
    pub slice_count: usize,
    pub stride_count: usize,
    pub fallback_count: usize,
    /// Length of the ordered path through every node.
    pub path_length: f64,
    /// Mean distance between consecutive nodes.
    pub mean_step: f64,
}

impl SortDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Spiral Sort Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Nodes: {}  |  Slices: {}  |  Strides: {}",
            self.summary.node_count, self.summary.slice_count, self.summary.stride_count,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms (setup {:.3}ms)",
            duration_ms(self.total_duration),
            duration_ms(self.setup_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<18} {:>7} {:>7} {:>7} {:>7} {:>8} {:>9} {:>10}",
            "Slice", "Window", "Half", "In", "Out", "Strides", "Fallback", "Duration"
        ));
        lines.push("-".repeat(88));

        for slice in &self.slices {
            let range = format!("{}..{}", slice.start, slice.end);
            lines.push(format!(
                "{range:<18} {:>7} {:>7} {:>7} {:>7} {:>8} {:>9} {:>8.3}ms",
                slice.spiral_window,
                slice.half_slice,
                slice.carried_in,
                slice.carried_out,
                slice.strides,
                slice.fallbacks,
                duration_ms(slice.duration),
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Path length: {:.4}  |  Mean step: {:.4}  |  Fallbacks: {}",
            self.summary.path_length, self.summary.mean_step, self.summary.fallback_count,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
