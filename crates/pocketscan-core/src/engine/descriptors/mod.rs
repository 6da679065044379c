//! Quantitative descriptors of a non-empty pocket.
//!
//! - [`gyration`] - Compactness as the radius of gyration
//! - [`sasa`] - Solvent-accessible surface area (Shrake–Rupley)
//! - [`composition`] - Aromatic residue count and hydrophobic percentage

pub mod composition;
pub mod gyration;
pub mod sasa;

use self::composition::Composition;
use self::gyration::gyration_radius;
use self::sasa::SasaCalculator;
use super::config::AnalysisConfig;
use super::error::EngineError;
use crate::core::models::atom_set::AtomSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptorRecord {
    pub atom_count: usize,
    /// Å
    pub gyration_radius: f64,
    /// Å²
    pub sasa: f64,
    pub aromatic_count: usize,
    /// `None` when no pocket residue is polar or nonpolar.
    pub hydrophobic_perc: Option<f64>,
    pub unique_residue_count: usize,
    pub polar_count: usize,
    pub nonpolar_count: usize,
}

/// Computes all descriptors of a pocket's atoms.
///
/// A calculator is passed in so that its sample sphere can be shared
/// between pockets.
pub fn compute_descriptors(
    atoms: &AtomSet,
    config: &AnalysisConfig,
    sasa: &SasaCalculator,
) -> Result<DescriptorRecord, EngineError> {
    let composition = Composition::of(atoms);
    Ok(DescriptorRecord {
        atom_count: atoms.len(),
        gyration_radius: gyration_radius(atoms, config.gyration),
        sasa: sasa.total(atoms)?,
        aromatic_count: composition.aromatic_count,
        hydrophobic_perc: composition.hydrophobic_perc(),
        unique_residue_count: composition.unique_residue_count,
        polar_count: composition.polar_count,
        nonpolar_count: composition.nonpolar_count,
    })
}
