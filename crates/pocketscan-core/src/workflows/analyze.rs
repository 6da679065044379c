use crate::core::models::atom_set::AtomSet;
use crate::core::models::ligand::{LigandMetadata, LigandRecord};
use crate::core::spatial::index::SpatialIndex;
use crate::engine::config::AnalysisConfig;
use crate::engine::descriptors::sasa::SasaCalculator;
use crate::engine::descriptors::{DescriptorRecord, compute_descriptors};
use crate::engine::error::EngineError;
use crate::engine::pocket::extract_pocket;
use crate::engine::progress::{LigandStatus, Progress, ProgressReporter};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What analysis found for one ligand instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PocketOutcome {
    Bound {
        descriptors: DescriptorRecord,
        #[serde(skip_serializing_if = "Option::is_none")]
        bond_count: Option<usize>,
    },
    /// No polymer atom lies within the search radius.
    Unbound,
    /// The ligand's metadata could not be used.
    Invalid { reason: String },
}

impl PocketOutcome {
    pub fn status(&self) -> LigandStatus {
        match self {
            PocketOutcome::Bound { .. } => LigandStatus::Bound,
            PocketOutcome::Unbound => LigandStatus::Unbound,
            PocketOutcome::Invalid { .. } => LigandStatus::Invalid,
        }
    }

    pub fn descriptors(&self) -> Option<&DescriptorRecord> {
        match self {
            PocketOutcome::Bound { descriptors, .. } => Some(descriptors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LigandReport {
    pub ligand: LigandMetadata,
    pub outcome: PocketOutcome,
}

/// Per-protein result: one entry per ligand instance, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProteinReport {
    pub protein_id: String,
    /// Number of ligand instances analyzed, bound or not.
    pub pocket_count: usize,
    pub bound_count: usize,
    pub pockets: Vec<LigandReport>,
}

/// Runs pocket detection and descriptor calculation for every ligand of one
/// protein.
///
/// The spatial index is built once over `protein` and shared by all ligands.
/// A ligand with unusable metadata is reported as
/// [`PocketOutcome::Invalid`] without affecting the others.
///
/// # Errors
///
/// Fails before any extraction if `config` is invalid.
#[instrument(skip_all, name = "analysis_workflow", fields(protein = protein_id))]
pub fn run(
    protein_id: &str,
    protein: &AtomSet,
    ligands: &[LigandRecord],
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<ProteinReport, EngineError> {
    config.validate()?;

    info!(
        "Building spatial index over {} protein atoms (cell size {:.2} Å).",
        protein.len(),
        config.radius
    );
    let index = SpatialIndex::from_atoms(protein, config.radius)?;
    reporter.report(Progress::IndexBuilt {
        atom_count: protein.len(),
    });

    let sasa = SasaCalculator::new(&config.sasa);
    let context = LigandContext {
        protein,
        index: &index,
        config,
        sasa: &sasa,
        reporter,
    };

    reporter.report(Progress::LigandsStart {
        total: ligands.len() as u64,
    });

    #[cfg(feature = "parallel")]
    let iter = ligands.par_iter().enumerate();
    #[cfg(not(feature = "parallel"))]
    let iter = ligands.iter().enumerate();

    let pockets = iter
        .map(|(i, ligand)| context.analyze(i, ligand))
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::LigandsFinish);

    let bound_count = pockets
        .iter()
        .filter(|p| p.outcome.status() == LigandStatus::Bound)
        .count();
    info!(
        "Analysis complete: {} of {} ligand instance(s) bound.",
        bound_count,
        pockets.len()
    );

    Ok(ProteinReport {
        protein_id: protein_id.to_string(),
        pocket_count: pockets.len(),
        bound_count,
        pockets,
    })
}

struct LigandContext<'a> {
    protein: &'a AtomSet,
    index: &'a SpatialIndex,
    config: &'a AnalysisConfig,
    sasa: &'a SasaCalculator,
    reporter: &'a ProgressReporter<'a>,
}

impl LigandContext<'_> {
    fn analyze(&self, i: usize, ligand: &LigandRecord) -> Result<LigandReport, EngineError> {
        let metadata = ligand.metadata();
        let outcome = match metadata.validate() {
            Err(e) => {
                warn!(ligand = i + 1, "Skipping ligand with invalid metadata: {}", e);
                PocketOutcome::Invalid {
                    reason: e.to_string(),
                }
            }
            Ok(()) => self.analyze_valid(i, ligand)?,
        };

        self.reporter.report(Progress::LigandDone {
            index: i,
            status: outcome.status(),
        });

        Ok(LigandReport {
            ligand: metadata.clone(),
            outcome,
        })
    }

    fn analyze_valid(&self, i: usize, ligand: &LigandRecord) -> Result<PocketOutcome, EngineError> {
        let metadata = ligand.metadata();
        let Some(mut pocket) =
            extract_pocket(self.protein, ligand, self.index, self.config.radius)?
        else {
            debug!(
                ligand = i + 1,
                "{} {}:{} is not bound to the protein.",
                metadata.residue_name,
                metadata.chain_id,
                metadata.residue_number.unwrap_or_default()
            );
            return Ok(PocketOutcome::Unbound);
        };

        if self.config.infer_bonds {
            pocket = pocket.with_inferred_bonds()?;
        }

        let descriptors = compute_descriptors(pocket.atoms(), self.config, self.sasa)?;
        debug!(
            ligand = i + 1,
            atoms = descriptors.atom_count,
            residues = descriptors.unique_residue_count,
            "Pocket found for {}.",
            metadata.residue_name
        );

        Ok(PocketOutcome::Bound {
            descriptors,
            bond_count: pocket.bonds().map(<[_]>::len),
        })
    }
}
