//! # Workflows Module
//!
//! High-level entry points that tie the [`engine`](crate::engine) and
//! [`core`](crate::core) layers together.
//!
//! - **Analysis Workflow** ([`analyze`]) - Pocket detection and descriptors for every
//!   ligand instance of one protein, producing a serializable [`analyze::ProteinReport`]

pub mod analyze;
