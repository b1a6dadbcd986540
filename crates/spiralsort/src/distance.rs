//! Distance and cost evaluation.
//!
//! `cost(node, prev) = |node - start| + |node - prev|`
//!
//! The distance from the start node is computed once per node after the
//! cloud is translated so the start node sits at the origin, and is
//! carried on every [`Candidate`]. Only the distance to the previously
//! placed node is recomputed, once per pop, in a single pass over the
//! candidate slice.

use crate::types::Point3;

/// A not-yet-placed node as seen by the ordering algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Index of the node in the caller's cloud.
    pub index: usize,
    /// Position relative to the start node.
    pub position: Point3,
    /// Cached `|position - start|`.
    pub from_start: f64,
}

/// Euclidean distances of every position from `reference`.
#[must_use]
pub fn distances_from(positions: &[Point3], reference: Point3) -> Vec<f64> {
    positions.iter().map(|p| p.distance(reference)).collect()
}

/// Cost of moving to `candidate` from `prev`.
#[must_use]
pub fn cost(candidate: &Candidate, prev: Point3) -> f64 {
    candidate.from_start + candidate.position.distance(prev)
}

/// Costs of every candidate against the same `prev`.
#[must_use]
pub fn costs(candidates: &[Candidate], prev: Point3) -> Vec<f64> {
    candidates.iter().map(|c| cost(c, prev)).collect()
}

/// Index of the smallest cost. Ties resolve to the earliest index.
#[must_use]
pub fn argmin(costs: &[f64]) -> Option<usize> {
    costs
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &c)| match best {
            Some((_, best_cost)) if c >= best_cost => best,
            _ => Some((i, c)),
        })
        .map(|(i, _)| i)
}

/// Order candidates by ascending cost from `prev`.
///
/// The sort is stable: candidates with equal cost keep their relative
/// order, which makes the result reproducible for a given input order.
#[must_use = "returns the cost-sorted candidates"]
pub fn cost_sort(candidates: Vec<Candidate>, prev: Point3) -> Vec<Candidate> {
    let mut keyed: Vec<(f64, Candidate)> = costs(&candidates, prev)
        .into_iter()
        .zip(candidates)
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: usize, x: f64, y: f64) -> Candidate {
        let position = Point3::new(x, y, 0.0);
        Candidate {
            index,
            position,
            from_start: position.distance(Point3::ORIGIN),
        }
    }

    #[test]
    fn distances_from_reference() {
        let positions = [Point3::new(3.0, 4.0, 0.0), Point3::new(0.0, 0.0, 2.0)];
        let d = distances_from(&positions, Point3::ORIGIN);
        assert!((d[0] - 5.0).abs() < 1e-12);
        assert!((d[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn cost_adds_start_and_prev_distances() {
        let c = candidate(0, 3.0, 4.0);
        let prev = Point3::new(3.0, 0.0, 0.0);
        assert!((cost(&c, prev) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn argmin_prefers_first_of_equal_costs() {
        assert_eq!(argmin(&[3.0, 1.0, 2.0, 1.0]), Some(1));
        assert_eq!(argmin(&[]), None);
    }

    #[test]
    fn cost_sort_is_stable() {
        // (0, 2) and (0, -2) have equal cost from a prev on the x axis.
        let input = vec![
            candidate(0, 5.0, 0.0),
            candidate(1, 0.0, 2.0),
            candidate(2, 0.0, -2.0),
            candidate(3, 1.0, 0.0),
        ];
        let prev = Point3::new(1.0, 0.0, 0.0);
        let sorted: Vec<usize> = cost_sort(input.clone(), prev).iter().map(|c| c.index).collect();
        assert_eq!(sorted, vec![3, 1, 2, 0]);

        let mut swapped = input;
        swapped.swap(1, 2);
        let sorted: Vec<usize> = cost_sort(swapped, prev).iter().map(|c| c.index).collect();
        assert_eq!(sorted, vec![3, 2, 1, 0]);
    }
}
