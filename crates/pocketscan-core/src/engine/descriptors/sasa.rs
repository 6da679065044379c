use crate::core::models::atom_set::AtomSet;
use crate::core::spatial::index::{SpatialIndex, SpatialIndexError};
use crate::core::utils::geometry::{fibonacci_sphere, sphere_area};
use crate::engine::config::SasaConfig;
use nalgebra::Vector3;

/// Shrake–Rupley solvent-accessible surface area calculator.
///
/// Each atom is inflated by the probe radius and sampled with a fixed set of
/// points on its surface. A point is buried when it falls inside the
/// inflated sphere of any other atom; the accessible area of an atom is its
/// surviving fraction of points times its inflated sphere area.
///
/// The sample directions are generated once per calculator and reused for
/// every atom, so repeated calls are deterministic.
#[derive(Debug, Clone)]
pub struct SasaCalculator {
    probe_radius: f64,
    directions: Vec<Vector3<f64>>,
}

impl SasaCalculator {
    pub fn new(config: &SasaConfig) -> Self {
        Self {
            probe_radius: config.probe_radius,
            directions: fibonacci_sphere(config.sphere_points),
        }
    }

    pub fn probe_radius(&self) -> f64 {
        self.probe_radius
    }

    pub fn sphere_points(&self) -> usize {
        self.directions.len()
    }

    /// Accessible area of every atom, in Å², in atom order.
    pub fn per_atom(&self, atoms: &AtomSet) -> Result<Vec<f64>, SpatialIndexError> {
        if atoms.is_empty() || self.directions.is_empty() {
            return Ok(vec![0.0; atoms.len()]);
        }

        let expanded: Vec<f64> = atoms
            .iter()
            .map(|atom| atom.vdw_radius() + self.probe_radius)
            .collect();
        let max_expanded = expanded.iter().copied().fold(0.0, f64::max);
        let index = SpatialIndex::from_atoms(atoms, 2.0 * max_expanded)?;

        atoms
            .iter()
            .enumerate()
            .map(|(i, atom)| -> Result<f64, SpatialIndexError> {
                let radius = expanded[i];
                let center = atom.position();
                let neighbors: Vec<usize> = index
                    .neighbors(center, radius + max_expanded)?
                    .into_iter()
                    .filter(|&j| j != i)
                    .collect();

                let accessible = self
                    .directions
                    .iter()
                    .filter(|direction| {
                        let point = center + *direction * radius;
                        neighbors.iter().all(|&j| {
                            (point - atoms[j].position()).norm_squared() > expanded[j] * expanded[j]
                        })
                    })
                    .count();

                Ok(accessible as f64 / self.directions.len() as f64 * sphere_area(radius))
            })
            .collect()
    }

    /// Total accessible area of an atom set, in Å².
    pub fn total(&self, atoms: &AtomSet) -> Result<f64, SpatialIndexError> {
        Ok(self.per_atom(atoms)?.iter().sum())
    }
}
