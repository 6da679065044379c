//! # Core Models Module
//!
//! Plain value types describing a parsed structure: atoms, ordered atom sets,
//! residue identities, ligand instances and covalent bonds.
//!
//! ## Key Components
//!
//! - [`element`] - Chemical elements with radii and masses
//! - [`atom`] - A single immutable atom record
//! - [`atom_set`] - Ordered atom collections and index-set selections
//! - [`residue`] - The `(chain id, residue number)` residue key
//! - [`ligand`] - Ligand metadata and ligand instances
//! - [`topology`] - Bonds between atoms of one atom set
//!
//! ## Usage
//!
//! ```ignore
//! use pocketscan::core::models::{atom::Atom, atom_set::AtomSet, element::Element};
//! use nalgebra::Point3;
//!
//! let protein = AtomSet::new(vec![
//!     Atom::new("A", 1, "GLY", "CA", Element::C, Point3::new(0.0, 0.0, 0.0)),
//! ]);
//! let alpha_carbons = protein.select(|atom| atom.name() == "CA");
//! ```

pub mod atom;
pub mod atom_set;
pub mod element;
pub mod ligand;
pub mod residue;
pub mod topology;
