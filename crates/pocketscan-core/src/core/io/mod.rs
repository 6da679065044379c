//! Provides input functionality for structure files and ligand metadata.
//!
//! Structure readers share the [`traits::StructureFile`] interface and
//! return a flat [`AtomSet`](crate::core::models::atom_set::AtomSet) for the
//! first model. Ligand metadata documents are parsed separately and matched
//! back onto the structure with [`ligands::locate_ligands`].

pub(crate) mod altloc;
pub mod cif;
pub mod ligands;
pub mod pdb;
pub mod traits;
