//! # Chemistry Module
//!
//! Static chemical knowledge keyed by residue name.
//!
//! - [`residues`] - Polarity / aromaticity classification and the polymer
//!   reference tables (amino acids, nucleotides, carbohydrates, solvent)
//! - [`templates`] - Heavy-atom bond templates for standard amino acids and
//!   the inter-residue links used during bond inference

pub mod residues;
pub mod templates;
