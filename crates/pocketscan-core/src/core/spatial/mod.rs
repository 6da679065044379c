//! # Spatial Module
//!
//! Fixed-radius neighbor search over atom coordinates.
//!
//! - [`index`] - [`SpatialIndex`](index::SpatialIndex), a uniform cell list
//!   with exact radius queries

pub mod index;
