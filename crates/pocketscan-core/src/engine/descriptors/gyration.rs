use crate::core::models::atom_set::AtomSet;
use crate::core::utils::geometry::radius_of_gyration;
use crate::engine::config::GyrationWeighting;

/// Radius of gyration of an atom set in Angstroms.
///
/// Zero or one atom gives exactly `0.0`.
pub fn gyration_radius(atoms: &AtomSet, weighting: GyrationWeighting) -> f64 {
    let positions = atoms.positions();
    match weighting {
        GyrationWeighting::Uniform => radius_of_gyration(&positions, None),
        GyrationWeighting::Mass => {
            let masses: Vec<f64> = atoms.iter().map(|atom| atom.atomic_mass()).collect();
            radius_of_gyration(&positions, Some(&masses))
        }
    }
}
