//! # Core Module
//!
//! Stateless building blocks for pocket detection: the structure data model,
//! static chemical knowledge, spatial search and file input.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, atom sets, residue keys, ligand records and bonds
//! - **Chemical Knowledge** ([`chemistry`]) - Residue classification, polymer tables and bond templates
//! - **Spatial Search** ([`spatial`]) - Cell-list index for fixed-radius neighbor queries
//! - **Geometry** ([`utils`]) - Centroids, radius of gyration and sphere sampling
//! - **File I/O** ([`io`]) - mmCIF and PDB readers, ligand metadata parsing and ligand location
//!
//! Nothing in this layer holds configuration or performs network access; the
//! [`engine`](crate::engine) layer threads an explicit configuration through
//! these pieces.

pub mod chemistry;
pub mod io;
pub mod models;
pub mod spatial;
pub mod utils;
