//! # pocketscan Core Library
//!
//! Ligand binding pocket detection and pocket descriptors for protein
//! structures.
//!
//! Given one protein and its bound small-molecule ligands, the library finds
//! the polymer atoms around each ligand instance and describes the resulting
//! pocket by its size, compactness, solvent-accessible surface and residue
//! chemistry.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Atom`, `AtomSet`,
//!   `LigandRecord`), static residue tables, the cell-list spatial index and
//!   structure file readers.
//!
//! - **[`engine`]: The Logic Core.** Validated configuration, pocket
//!   extraction, bond inference and descriptor calculators.
//!
//! - **[`workflows`]: The Public API.** The per-protein analysis pipeline,
//!   returning a report with one entry per ligand instance.
//!
//! ## Features
//!
//! - `parallel` (default) - analyze ligands concurrently with rayon

pub mod core;
pub mod engine;
pub mod workflows;
