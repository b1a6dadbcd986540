//! Mock point clouds for trying the sort without real data.
//!
//! Candidates are drawn uniformly from the cube `[-0.5, 0.5)^3`; those
//! inside the sphere `x² + y² + z² <= 0.21` are dropped, leaving a hollow
//! shell. Ids keep the candidate index (`N_0000`, `N_0001`, ...), so the
//! surviving ids have gaps.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spiralsort::Node;

/// Squared radius of the excluded inner sphere.
pub const INNER_RADIUS_SQUARED: f64 = 0.21;

/// Default number of candidates drawn.
pub const DEFAULT_NODES: usize = 7000;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 2;

/// Generate a mock cloud from `candidates` uniform draws.
///
/// The same `seed` always yields the same cloud.
#[must_use]
pub fn mock_cloud(candidates: usize, seed: u64) -> Vec<Node> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let width = candidates.to_string().len();

    (0..candidates)
        .filter_map(|i| {
            let x: f64 = rng.gen_range(-0.5..0.5);
            let y: f64 = rng.gen_range(-0.5..0.5);
            let z: f64 = rng.gen_range(-0.5..0.5);
            let d_squared = z.mul_add(z, x.mul_add(x, y * y));
            (d_squared > INNER_RADIUS_SQUARED)
                .then(|| Node::new(format!("N_{i:0width$}"), x, y, z))
        })
        .collect()
}

/// The node with the greatest `z`, a good start node for a mock shell.
///
/// Returns the first such node on ties and `None` for an empty cloud.
#[must_use]
pub fn top_node(cloud: &[Node]) -> Option<&Node> {
    cloud
        .iter()
        .reduce(|top, node| if node.position.z > top.position.z { node } else { top })
}
