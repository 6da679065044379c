use crate::core::models::atom_set::{AtomSet, IndexSet};
use nalgebra::Point3;
use std::collections::HashMap;
use thiserror::Error;

type CellCoord = (i64, i64, i64);

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SpatialIndexError {
    #[error("Cell size must be a positive finite number (got {0})")]
    InvalidCellSize(f64),
    #[error("Query radius must be a positive finite number (got {0})")]
    InvalidRadius(f64),
    #[error("Query radius {radius} Å exceeds the index cell size {cell_size} Å")]
    RadiusExceedsCellSize { radius: f64, cell_size: f64 },
}

/// A uniform cell list over a fixed set of coordinates.
///
/// Space is divided into cubic cells of side `cell_size`; every point is
/// stored in exactly one cell. A radius query only has to look at the
/// 3×3×3 block of cells around the query point, which is exact as long as
/// the radius does not exceed the cell size. Queries with a larger radius
/// are rejected instead of silently missing neighbors.
///
/// The index is immutable after construction and can be shared between
/// threads.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f64,
    cells: HashMap<CellCoord, Vec<usize>>,
    positions: Vec<Point3<f64>>,
}

impl SpatialIndex {
    /// Builds an index over `positions`; the i-th position gets index `i`.
    ///
    /// Points with non-finite coordinates are kept in the numbering but never
    /// stored in a cell, so no query returns them.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialIndexError::InvalidCellSize`] if `cell_size` is not a
    /// positive finite number.
    pub fn new(
        positions: impl IntoIterator<Item = Point3<f64>>,
        cell_size: f64,
    ) -> Result<Self, SpatialIndexError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialIndexError::InvalidCellSize(cell_size));
        }

        let positions: Vec<Point3<f64>> = positions.into_iter().collect();
        let mut cells: HashMap<CellCoord, Vec<usize>> = HashMap::new();
        for (i, pos) in positions.iter().enumerate() {
            if !is_finite_point(pos) {
                continue;
            }
            cells.entry(cell_of(pos, cell_size)).or_default().push(i);
        }

        Ok(Self {
            cell_size,
            cells,
            positions,
        })
    }

    /// Builds an index over the coordinates of an atom set, numbered by the
    /// atoms' positions in the set.
    pub fn from_atoms(atoms: &AtomSet, cell_size: f64) -> Result<Self, SpatialIndexError> {
        Self::new(atoms.iter().map(|atom| *atom.position()), cell_size)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the indices of all points within `radius` (inclusive) of
    /// `point`, sorted ascending.
    ///
    /// # Errors
    ///
    /// Fails if `radius` is not positive and finite, or if it exceeds the
    /// cell size the index was built with.
    pub fn neighbors(
        &self,
        point: &Point3<f64>,
        radius: f64,
    ) -> Result<Vec<usize>, SpatialIndexError> {
        self.check_radius(radius)?;
        let mut found = Vec::new();
        self.collect_within(point, radius * radius, |i| found.push(i));
        found.sort_unstable();
        Ok(found)
    }

    /// Union of [`neighbors`](Self::neighbors) over several query points.
    ///
    /// An indexed point is included if it is within `radius` of any query
    /// point. An empty query yields an empty set.
    pub fn neighbors_of_many<'a>(
        &self,
        points: impl IntoIterator<Item = &'a Point3<f64>>,
        radius: f64,
    ) -> Result<IndexSet, SpatialIndexError> {
        self.check_radius(radius)?;
        let radius_sq = radius * radius;
        let mut found = IndexSet::new();
        for point in points {
            self.collect_within(point, radius_sq, |i| {
                found.insert(i);
            });
        }
        Ok(found)
    }

    fn check_radius(&self, radius: f64) -> Result<(), SpatialIndexError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SpatialIndexError::InvalidRadius(radius));
        }
        if radius > self.cell_size {
            return Err(SpatialIndexError::RadiusExceedsCellSize {
                radius,
                cell_size: self.cell_size,
            });
        }
        Ok(())
    }

    fn collect_within(&self, point: &Point3<f64>, radius_sq: f64, mut sink: impl FnMut(usize)) {
        if !is_finite_point(point) {
            return;
        }
        let (cx, cy, cz) = cell_of(point, self.cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(members) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &i in members {
                        if (self.positions[i] - point).norm_squared() <= radius_sq {
                            sink(i);
                        }
                    }
                }
            }
        }
    }
}

fn cell_of(point: &Point3<f64>, cell_size: f64) -> CellCoord {
    (
        (point.x / cell_size).floor() as i64,
        (point.y / cell_size).floor() as i64,
        (point.z / cell_size).floor() as i64,
    )
}

fn is_finite_point(point: &Point3<f64>) -> bool {
    point.x.is_finite() && point.y.is_finite() && point.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(points: &[Point3<f64>], query: &Point3<f64>, radius: f64) -> Vec<usize> {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| (*p - query).norm() <= radius)
            .map(|(i, _)| i)
            .collect()
    }

    // Deterministic pseudo-random cloud spanning many cells, including
    // negative coordinates.
    fn point_cloud(n: usize) -> Vec<Point3<f64>> {
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 20_000) as f64 / 1000.0 - 10.0
        };
        (0..n).map(|_| Point3::new(next(), next(), next())).collect()
    }

    #[test]
    fn new_rejects_non_positive_or_non_finite_cell_size() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = SpatialIndex::new(Vec::new(), size);
            assert!(matches!(result, Err(SpatialIndexError::InvalidCellSize(_))));
        }
    }

    #[test]
    fn neighbors_matches_brute_force_search() {
        let points = point_cloud(500);
        let index = SpatialIndex::new(points.clone(), 3.0).unwrap();
        for query in point_cloud(25) {
            for radius in [0.5, 1.7, 3.0] {
                assert_eq!(
                    index.neighbors(&query, radius).unwrap(),
                    brute_force(&points, &query, radius)
                );
            }
        }
    }

    #[test]
    fn neighbors_includes_points_exactly_on_the_radius() {
        let index = SpatialIndex::new(vec![Point3::new(2.0, 0.0, 0.0)], 2.0).unwrap();
        assert_eq!(index.neighbors(&Point3::origin(), 2.0).unwrap(), vec![0]);
    }

    #[test]
    fn neighbors_finds_points_across_cell_boundaries() {
        let points = vec![Point3::new(-0.1, -0.1, -0.1), Point3::new(0.1, 0.1, 0.1)];
        let index = SpatialIndex::new(points, 5.0).unwrap();
        assert_eq!(
            index.neighbors(&Point3::new(0.0, 0.0, 0.0), 1.0).unwrap(),
            vec![0, 1]
        );
    }

    #[test]
    fn neighbors_is_monotonic_in_radius() {
        let points = point_cloud(300);
        let index = SpatialIndex::new(points, 4.0).unwrap();
        let query = Point3::new(0.3, -1.2, 2.5);
        let radii = [0.5, 1.0, 2.0, 3.5, 4.0];
        for pair in radii.windows(2) {
            let small: IndexSet = index.neighbors(&query, pair[0]).unwrap().into_iter().collect();
            let large: IndexSet = index.neighbors(&query, pair[1]).unwrap().into_iter().collect();
            assert!(small.is_subset(&large));
        }
    }

    #[test]
    fn radius_larger_than_cell_size_is_a_contract_error() {
        let index = SpatialIndex::new(point_cloud(10), 2.0).unwrap();
        assert_eq!(
            index.neighbors(&Point3::origin(), 2.5),
            Err(SpatialIndexError::RadiusExceedsCellSize {
                radius: 2.5,
                cell_size: 2.0
            })
        );
        assert!(index.neighbors_of_many([].iter(), 2.5).is_err());
    }

    #[test]
    fn invalid_radius_is_rejected() {
        let index = SpatialIndex::new(point_cloud(10), 2.0).unwrap();
        for radius in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                index.neighbors(&Point3::origin(), radius),
                Err(SpatialIndexError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn neighbors_of_many_is_the_deduplicated_union() {
        let points = point_cloud(400);
        let index = SpatialIndex::new(points.clone(), 2.5).unwrap();
        let queries = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.5, 0.0, 0.0)];

        let union = index.neighbors_of_many(queries.iter(), 2.5).unwrap();

        let mut expected = IndexSet::new();
        for q in &queries {
            expected.extend(brute_force(&points, q, 2.5));
        }
        assert_eq!(union, expected);
    }

    #[test]
    fn neighbors_of_many_with_no_queries_is_empty() {
        let index = SpatialIndex::new(point_cloud(50), 2.0).unwrap();
        let empty: Vec<Point3<f64>> = Vec::new();
        assert!(index.neighbors_of_many(empty.iter(), 2.0).unwrap().is_empty());
    }

    #[test]
    fn non_finite_points_are_never_returned() {
        let points = vec![Point3::new(f64::NAN, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)];
        let index = SpatialIndex::new(points, 1.0).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.cell_count(), 1);
        assert_eq!(index.neighbors(&Point3::origin(), 1.0).unwrap(), vec![1]);
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = SpatialIndex::new(Vec::new(), 1.0).unwrap();
        assert!(index.is_empty());
        assert!(index.neighbors(&Point3::origin(), 1.0).unwrap().is_empty());
    }
}
