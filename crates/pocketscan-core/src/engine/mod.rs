//! # Engine Module
//!
//! The pocket detection and descriptor engine: everything that turns a
//! protein atom set and one ligand instance into a pocket and its numbers.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Search radius, SASA and gyration settings with validation
//! - **Pocket Extraction** ([`pocket`]) - Neighbor query plus polymer filtering
//! - **Bond Inference** ([`bonds`]) - Template and distance based bond graph for a pocket
//! - **Descriptors** ([`descriptors`]) - Gyration radius, SASA and residue composition
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! All entry points take their configuration explicitly; nothing here keeps
//! global state, so a single [`SpatialIndex`](crate::core::spatial::index::SpatialIndex)
//! can be shared by any number of concurrent extractions.

pub mod bonds;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod pocket;
pub mod progress;
