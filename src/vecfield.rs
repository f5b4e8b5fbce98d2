/*
 * Vector Field Module
 *
 * Pairwise vector math over a whole agent population. The flock forces
 * consume population-level aggregates, so everything here works on flat
 * row-major N x N matrices rather than per-agent loops:
 * - pairwise relative positions and Euclidean distances
 * - neighbor masking against a radius and per-row neighbor counts
 * - the aggregate squared-distance sums feeding the separation force
 *
 * All reciprocal-distance uses are guarded: the distance matrix diagonal
 * is replaced with DISTANCE_EPSILON so a self-distance can never become a
 * zero divisor.
 */

use nannou::prelude::*;

// Substituted for exact-zero denominators (self-distances, empty rows)
pub const DISTANCE_EPSILON: f32 = 1e-5;

// Relative positions: delta[i * n + j] = positions[i] - positions[j]
pub fn pairwise_delta(positions: &[Point2]) -> Vec<Vec2> {
    let n = positions.len();
    let mut delta = vec![Vec2::ZERO; n * n];

    for i in 0..n {
        for j in 0..n {
            delta[i * n + j] = positions[i] - positions[j];
        }
    }

    delta
}

// Euclidean norm of each pairwise delta. Diagonal entries (self-distance,
// exactly zero) are replaced with DISTANCE_EPSILON before anything divides
// by them.
pub fn pairwise_distance(delta: &[Vec2], n: usize) -> Vec<f32> {
    debug_assert_eq!(delta.len(), n * n);
    let mut dist = vec![0.0; n * n];

    for i in 0..n {
        for j in 0..n {
            dist[i * n + j] = if i == j {
                DISTANCE_EPSILON
            } else {
                delta[i * n + j].length()
            };
        }
    }

    dist
}

// True where the pair is strictly closer than `radius`. Self is excluded
// outright; the epsilon diagonal would otherwise always pass the test.
pub fn neighbor_mask(dist: &[f32], n: usize, radius: f32) -> Vec<bool> {
    debug_assert_eq!(dist.len(), n * n);
    let mut mask = vec![false; n * n];

    for i in 0..n {
        for j in 0..n {
            mask[i * n + j] = i != j && dist[i * n + j] < radius;
        }
    }

    mask
}

// Row sums of the neighbor mask. Rows with no neighbors report 1 so a
// later division by the count stays finite.
pub fn neighbor_counts(mask: &[bool], n: usize) -> Vec<usize> {
    debug_assert_eq!(mask.len(), n * n);
    let mut counts = vec![0usize; n];

    for i in 0..n {
        let row = &mask[i * n..(i + 1) * n];
        let count = row.iter().filter(|&&m| m).count();
        counts[i] = count.max(1);
    }

    counts
}

// Column sums of the matrix product D * D, the aggregate squared-distance
// denominator of the separation force. D is symmetric, so
//   colsum(D * D)[i] = sum_j rowsum(D)[j] * D[j * n + i]
// which computes the values of the O(N^3) matrix product in O(N^2).
pub fn squared_distance_column_sums(dist: &[f32], n: usize) -> Vec<f32> {
    debug_assert_eq!(dist.len(), n * n);

    let mut row_sums = vec![0.0f32; n];
    for j in 0..n {
        let row = &dist[j * n..(j + 1) * n];
        row_sums[j] = row.iter().sum();
    }

    let mut col_sums = vec![0.0f32; n];
    for i in 0..n {
        let mut total = 0.0;
        for j in 0..n {
            total += row_sums[j] * dist[j * n + i];
        }
        col_sums[i] = total;
    }

    col_sums
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_positions() -> Vec<Point2> {
        vec![pt2(0.0, 0.0), pt2(10.0, 0.0), pt2(0.0, 10.0), pt2(10.0, 10.0)]
    }

    #[test]
    fn delta_is_antisymmetric_with_zero_diagonal() {
        let positions = square_positions();
        let n = positions.len();
        let delta = pairwise_delta(&positions);

        for i in 0..n {
            assert_eq!(delta[i * n + i], Vec2::ZERO);
            for j in 0..n {
                assert_eq!(delta[i * n + j], -delta[j * n + i]);
            }
        }
        assert_eq!(delta[1], vec2(-10.0, 0.0));
    }

    #[test]
    fn distance_diagonal_is_epsilon() {
        let positions = square_positions();
        let n = positions.len();
        let dist = pairwise_distance(&pairwise_delta(&positions), n);

        for i in 0..n {
            assert_eq!(dist[i * n + i], DISTANCE_EPSILON);
        }
        assert!((dist[1] - 10.0).abs() < 1e-4);
        assert!((dist[3] - (200.0f32).sqrt()).abs() < 1e-3);
    }

    #[test]
    fn coincident_positions_never_produce_zero_distance() {
        let positions = vec![pt2(5.0, 5.0), pt2(5.0, 5.0)];
        let dist = pairwise_distance(&pairwise_delta(&positions), 2);

        // Off-diagonal zero stays zero; only the diagonal gets the epsilon.
        // Callers clamp aggregates, not individual entries.
        assert_eq!(dist[0], DISTANCE_EPSILON);
        assert_eq!(dist[3], DISTANCE_EPSILON);
        assert_eq!(dist[1], 0.0);
    }

    #[test]
    fn mask_boundary_is_strict() {
        let positions = vec![pt2(0.0, 0.0), pt2(100.0, 0.0)];
        let dist = pairwise_distance(&pairwise_delta(&positions), 2);

        // At exactly the radius the pair is excluded
        let at_radius = neighbor_mask(&dist, 2, 100.0);
        assert!(!at_radius[1]);
        assert!(!at_radius[2]);

        // Just inside the radius it is included
        let inside = neighbor_mask(&dist, 2, 100.0 + 1e-3);
        assert!(inside[1]);
        assert!(inside[2]);
    }

    #[test]
    fn mask_excludes_self() {
        let positions = square_positions();
        let n = positions.len();
        let dist = pairwise_distance(&pairwise_delta(&positions), n);
        let mask = neighbor_mask(&dist, n, 1000.0);

        for i in 0..n {
            assert!(!mask[i * n + i]);
        }
    }

    #[test]
    fn empty_neighbor_rows_count_as_one() {
        let positions = vec![pt2(0.0, 0.0), pt2(1000.0, 0.0)];
        let dist = pairwise_distance(&pairwise_delta(&positions), 2);
        let mask = neighbor_mask(&dist, 2, 10.0);
        let counts = neighbor_counts(&mask, 2);

        assert_eq!(counts, vec![1, 1]);
    }

    #[test]
    fn neighbor_counts_match_rows() {
        let positions = vec![pt2(0.0, 0.0), pt2(5.0, 0.0), pt2(500.0, 0.0)];
        let dist = pairwise_distance(&pairwise_delta(&positions), 3);
        let mask = neighbor_mask(&dist, 3, 50.0);
        let counts = neighbor_counts(&mask, 3);

        // First two see each other, the far one sees nobody (reported as 1)
        assert_eq!(counts, vec![1, 1, 1]);

        let wide = neighbor_counts(&neighbor_mask(&dist, 3, 1000.0), 3);
        assert_eq!(wide, vec![2, 2, 2]);
    }

    #[test]
    fn column_sums_match_naive_matrix_product() {
        let positions = square_positions();
        let n = positions.len();
        let dist = pairwise_distance(&pairwise_delta(&positions), n);

        // Naive colsum of D * D for comparison
        let mut expected = vec![0.0f32; n];
        for i in 0..n {
            for k in 0..n {
                let mut entry = 0.0;
                for j in 0..n {
                    entry += dist[k * n + j] * dist[j * n + i];
                }
                expected[i] += entry;
            }
        }

        let fast = squared_distance_column_sums(&dist, n);
        for i in 0..n {
            assert!((fast[i] - expected[i]).abs() < expected[i].abs() * 1e-4 + 1e-4);
        }
    }
}
