//! Shared types for spiral ordering.

use serde::{Deserialize, Serialize};

/// A 3D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// The origin of the coordinate system.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx.mul_add(dx, dy.mul_add(dy, dz * dz))
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// A point of the cloud with its identifier.
///
/// Serializes flat (`node_id`, `x`, `y`, `z`) so record-oriented formats
/// can use it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within a cloud.
    #[serde(rename = "node_id")]
    pub id: String,
    #[serde(flatten)]
    pub position: Point3,
}

impl Node {
    /// Create a node from an id and coordinates.
    #[must_use]
    pub fn new(id: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: id.into(),
            position: Point3::new(x, y, z),
        }
    }
}

/// Total length of the path visiting `nodes` in order.
#[must_use]
pub fn path_length(nodes: &[Node]) -> f64 {
    nodes
        .windows(2)
        .map(|pair| pair[0].position.distance(pair[1].position))
        .sum()
}

/// Tunable parameters of the spiral ordering.
///
/// The defaults are tuned for clouds of tens of thousands of nodes. The
/// associated `DEFAULT_*` constants let front ends share them without
/// building a config first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    /// Length of the first exponential slice. Slice `k` spans
    /// `[base·(2^k − 1), base·(2^(k+1) − 1))`.
    pub base: usize,

    /// Width of the fixed-size slices that follow the exponential ones.
    pub const_window: usize,

    /// Spiral window size for slice 0.
    pub spiral_window: usize,

    /// Window size added per slice index, since nodes spread out with
    /// distance from the start.
    pub spiral_window_growth: usize,

    /// Nodes popped per window before it is recomputed.
    pub stride: usize,

    /// While at most this many nodes are placed (start node included)
    /// the counterclockwise filter is skipped.
    pub warmup_nodes: usize,
}

impl SpiralConfig {
    pub const DEFAULT_BASE: usize = 2000;
    pub const DEFAULT_CONST_WINDOW: usize = 32000;
    pub const DEFAULT_SPIRAL_WINDOW: usize = 400;
    pub const DEFAULT_SPIRAL_WINDOW_GROWTH: usize = 100;
    pub const DEFAULT_STRIDE: usize = 15;
    pub const DEFAULT_WARMUP_NODES: usize = 1000;

    /// Check the invariants the algorithm relies on.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::InvalidConfig`] naming the first field that is
    /// zero among `base`, `const_window`, `spiral_window` and `stride`.
    pub fn validate(&self) -> Result<(), SortError> {
        let required = [
            ("base", self.base),
            ("const_window", self.const_window),
            ("spiral_window", self.spiral_window),
            ("stride", self.stride),
        ];
        match required.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(SortError::InvalidConfig(format!("{name} must be > 0"))),
            None => Ok(()),
        }
    }

    /// Spiral window size used while processing slice `slice_index`,
    /// saturating at `usize::MAX`.
    #[must_use]
    pub const fn spiral_window_size(&self, slice_index: usize) -> usize {
        self.spiral_window
            .saturating_add(self.spiral_window_growth.saturating_mul(slice_index))
    }
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            const_window: Self::DEFAULT_CONST_WINDOW,
            spiral_window: Self::DEFAULT_SPIRAL_WINDOW,
            spiral_window_growth: Self::DEFAULT_SPIRAL_WINDOW_GROWTH,
            stride: Self::DEFAULT_STRIDE,
            warmup_nodes: Self::DEFAULT_WARMUP_NODES,
        }
    }
}

/// Errors that reject a sort before any node is placed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum SortError {
    /// Two or more nodes share this id.
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    /// The requested start node is not part of the cloud.
    #[error("start node not found in the point cloud: {0}")]
    UnknownStartNode(String),

    /// Configuration is invalid.
    #[error("invalid spiral configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn spiral_window_size_saturates() {
        let config = SpiralConfig {
            spiral_window_growth: usize::MAX,
            ..SpiralConfig::default()
        };
        assert_eq!(config.spiral_window_size(0), SpiralConfig::DEFAULT_SPIRAL_WINDOW);
        assert_eq!(config.spiral_window_size(1), usize::MAX);
        assert_eq!(config.spiral_window_size(3), usize::MAX);
    }

    #[test]
    fn point_distance_3d() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(3.0, 5.0, 9.0);
        assert!((a.distance(b) - 7.0).abs() < 1e-12);
        assert!((a.distance_squared(b) - 49.0).abs() < 1e-12);
    }

    #[test]
    fn point_offset_from() {
        let p = Point3::new(5.0, -1.0, 2.5).offset_from(Point3::new(1.0, 1.0, 0.5));
        assert_eq!(p, Point3::new(4.0, -2.0, 2.0));
    }

    #[test]
    fn path_length_sums_steps() {
        let nodes = [
            Node::new("a", 0.0, 0.0, 0.0),
            Node::new("b", 3.0, 4.0, 0.0),
            Node::new("c", 3.0, 4.0, 2.0),
        ];
        assert!((path_length(&nodes) - 7.0).abs() < 1e-12);
        assert!(path_length(&nodes[..1]).abs() < f64::EPSILON);
        assert!(path_length(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn node_serializes_flat() {
        let node = Node::new("N_07", 1.5, -2.0, 0.25);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"node_id":"N_07","x":1.5,"y":-2.0,"z":0.25}"#);
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn config_defaults() {
        let config = SpiralConfig::default();
        assert_eq!(config.base, 2000);
        assert_eq!(config.const_window, 32000);
        assert_eq!(config.spiral_window, 400);
        assert_eq!(config.spiral_window_growth, 100);
        assert_eq!(config.stride, 15);
        assert_eq!(config.warmup_nodes, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn spiral_window_grows_per_slice() {
        let config = SpiralConfig::default();
        assert_eq!(config.spiral_window_size(0), 400);
        assert_eq!(config.spiral_window_size(1), 500);
        assert_eq!(config.spiral_window_size(6), 1000);
    }

    #[test]
    fn zero_stride_is_rejected() {
        let config = SpiralConfig {
            stride: 0,
            ..SpiralConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SortError::InvalidConfig("stride must be > 0".to_string())),
        );
    }

    #[test]
    fn partial_config_json_fills_defaults() {
        let config: SpiralConfig = serde_json::from_str(r#"{"stride": 20}"#).unwrap();
        assert_eq!(config.stride, 20);
        assert_eq!(config.spiral_window, SpiralConfig::DEFAULT_SPIRAL_WINDOW);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            SortError::DuplicateId("N_00".to_string()).to_string(),
            "duplicate node id: N_00",
        );
        assert_eq!(
            SortError::UnknownStartNode("N_99".to_string()).to_string(),
            "start node not found in the point cloud: N_99",
        );
    }

    #[test]
    fn error_serde_round_trip() {
        let err = SortError::UnknownStartNode("x".to_string());
        let json = serde_json::to_string(&err).unwrap();
        let back: SortError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
