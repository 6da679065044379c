use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Arithmetic mean of a set of points, or `None` for an empty set.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Weighted mean of a set of points.
///
/// Returns `None` if the slices differ in length, are empty, or the weights
/// do not sum to a positive number.
pub fn weighted_centroid(points: &[Point3<f64>], weights: &[f64]) -> Option<Point3<f64>> {
    if points.is_empty() || points.len() != weights.len() {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return None;
    }
    let sum = points
        .iter()
        .zip(weights)
        .fold(Vector3::zeros(), |acc, (p, &w)| acc + p.coords * w);
    Some(Point3::from(sum / total))
}

/// Radius of gyration of a point set, in the units of the coordinates.
///
/// With `weights` the mean squared distance is taken around the weighted
/// centroid and weighted accordingly. Zero or one point gives exactly `0.0`,
/// as does a weight vector that does not match the points.
pub fn radius_of_gyration(points: &[Point3<f64>], weights: Option<&[f64]>) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    match weights {
        None => {
            let Some(center) = centroid(points) else {
                return 0.0;
            };
            let sum_sq: f64 = points.iter().map(|p| (p - center).norm_squared()).sum();
            (sum_sq / points.len() as f64).sqrt()
        }
        Some(weights) => {
            let Some(center) = weighted_centroid(points, weights) else {
                return 0.0;
            };
            let total: f64 = weights.iter().sum();
            let sum_sq: f64 = points
                .iter()
                .zip(weights)
                .map(|(p, &w)| w * (p - center).norm_squared())
                .sum();
            (sum_sq / total).sqrt()
        }
    }
}

/// Generates `n` unit vectors spread quasi-uniformly over the sphere using
/// the golden-angle (Fibonacci) spiral.
///
/// The sequence is deterministic. `n == 1` yields the single vector `+y`.
pub fn fibonacci_sphere(n: usize) -> Vec<Vector3<f64>> {
    match n {
        0 => Vec::new(),
        1 => vec![Vector3::y()],
        _ => {
            let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
            (0..n)
                .map(|i| {
                    let y = 1.0 - (i as f64 / (n - 1) as f64) * 2.0;
                    let ring = (1.0 - y * y).max(0.0).sqrt();
                    let theta = golden_angle * i as f64;
                    Vector3::new(theta.cos() * ring, y, theta.sin() * ring)
                })
                .collect()
        }
    }
}

/// Surface area of a sphere of the given radius.
pub fn sphere_area(radius: f64) -> f64 {
    4.0 * PI * radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn centroid_of_empty_set_is_none() {
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn centroid_averages_coordinates() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, -6.0)];
        let c = centroid(&points).unwrap();
        assert!((c - Point3::new(1.0, 2.0, -3.0)).norm() < TOLERANCE);
    }

    #[test]
    fn weighted_centroid_moves_toward_heavier_point() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)];
        let c = weighted_centroid(&points, &[3.0, 1.0]).unwrap();
        assert!((c.x - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn weighted_centroid_rejects_mismatched_or_zero_weights() {
        let points = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(weighted_centroid(&points, &[1.0]).is_none());
        assert!(weighted_centroid(&points, &[0.0, 0.0]).is_none());
    }

    #[test]
    fn gyration_of_zero_or_one_point_is_exactly_zero() {
        assert_eq!(radius_of_gyration(&[], None), 0.0);
        assert_eq!(radius_of_gyration(&[Point3::new(3.0, 1.0, 2.0)], None), 0.0);
        assert_eq!(
            radius_of_gyration(&[Point3::new(3.0, 1.0, 2.0)], Some(&[12.0])),
            0.0
        );
    }

    #[test]
    fn gyration_of_two_points_is_half_their_distance() {
        let points = [Point3::new(-1.5, 0.0, 0.0), Point3::new(1.5, 0.0, 0.0)];
        assert!((radius_of_gyration(&points, None) - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn equal_weights_match_uniform_gyration() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(-3.0, 1.0, 4.0),
        ];
        let uniform = radius_of_gyration(&points, None);
        let weighted = radius_of_gyration(&points, Some(&[2.0, 2.0, 2.0]));
        assert!((uniform - weighted).abs() < TOLERANCE);
    }

    #[test]
    fn fibonacci_sphere_points_are_unit_vectors() {
        let points = fibonacci_sphere(960);
        assert_eq!(points.len(), 960);
        assert!(points.iter().all(|p| (p.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn fibonacci_sphere_is_roughly_balanced() {
        let points = fibonacci_sphere(500);
        let mean = points.iter().fold(Vector3::zeros(), |acc, p| acc + p) / 500.0;
        assert!(mean.norm() < 0.01);
    }

    #[test]
    fn fibonacci_sphere_handles_tiny_counts() {
        assert!(fibonacci_sphere(0).is_empty());
        assert_eq!(fibonacci_sphere(1), vec![Vector3::y()]);
        let two = fibonacci_sphere(2);
        assert!((two[0].y - 1.0).abs() < TOLERANCE);
        assert!((two[1].y + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn sphere_area_matches_formula() {
        assert!((sphere_area(1.0) - 4.0 * PI).abs() < TOLERANCE);
        assert_eq!(sphere_area(0.0), 0.0);
    }
}
