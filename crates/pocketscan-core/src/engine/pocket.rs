use super::bonds::infer_bonds;
use super::error::EngineError;
use crate::core::chemistry::residues::{is_polymer_residue, is_solvent_residue};
use crate::core::models::atom_set::{AtomSet, IndexSet};
use crate::core::models::ligand::LigandRecord;
use crate::core::models::topology::Bond;
use crate::core::spatial::index::SpatialIndex;
use tracing::trace;

/// The protein atoms surrounding one ligand instance.
///
/// A pocket is never empty: a ligand without polymer atoms in range has no
/// pocket at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Pocket {
    indices: Vec<usize>,
    atoms: AtomSet,
    bonds: Option<Vec<Bond>>,
}

impl Pocket {
    /// Indices into the protein atom set, sorted ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn atoms(&self) -> &AtomSet {
        &self.atoms
    }

    /// The inferred bond graph, addressed by position within
    /// [`atoms`](Self::atoms), if bond inference was requested.
    pub fn bonds(&self) -> Option<&[Bond]> {
        self.bonds.as_deref()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Derives and attaches the bond graph of the pocket atoms.
    pub fn with_inferred_bonds(mut self) -> Result<Self, EngineError> {
        self.bonds = Some(infer_bonds(&self.atoms)?);
        Ok(self)
    }
}

/// Finds the polymer atoms of `protein` within `radius` of any atom of
/// `ligand`.
///
/// `index` must have been built over `protein` with a cell size of at least
/// `radius`. Returns `Ok(None)` when no polymer atom is in range, including
/// for a ligand with no atoms.
///
/// # Errors
///
/// Returns [`EngineError::IndexMismatch`] if the index was built over a
/// different number of atoms than `protein` holds, and
/// [`EngineError::SpatialIndex`] if `radius` is not valid for the index.
pub fn extract_pocket(
    protein: &AtomSet,
    ligand: &LigandRecord,
    index: &SpatialIndex,
    radius: f64,
) -> Result<Option<Pocket>, EngineError> {
    if index.len() != protein.len() {
        return Err(EngineError::IndexMismatch {
            index_len: index.len(),
            protein_len: protein.len(),
        });
    }

    let candidates = index.neighbors_of_many(ligand.atoms().iter().map(|a| a.position()), radius)?;
    let pocket_indices: IndexSet = protein.refine(&candidates, |atom| {
        is_polymer_residue(atom.residue_name())
    });

    let rejected = candidates.len() - pocket_indices.len();
    if rejected > 0 {
        let solvent = candidates
            .difference(&pocket_indices)
            .filter(|&&i| is_solvent_residue(protein[i].residue_name()))
            .count();
        trace!(
            ligand = %ligand.metadata().residue_name,
            rejected,
            solvent,
            "Dropped non-polymer atoms from pocket"
        );
    }

    if pocket_indices.is_empty() {
        return Ok(None);
    }

    Ok(Some(Pocket {
        atoms: protein.subset(&pocket_indices),
        indices: pocket_indices.into_iter().collect(),
        bonds: None,
    }))
}
