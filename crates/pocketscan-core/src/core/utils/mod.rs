//! Geometric helpers shared by the descriptor calculators.

pub mod geometry;
