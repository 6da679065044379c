use thiserror::Error;

use super::config::ConfigError;
use crate::core::spatial::index::SpatialIndexError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Spatial index misuse: {source}")]
    SpatialIndex {
        #[from]
        source: SpatialIndexError,
    },

    #[error("Spatial index covers {index_len} atoms but the protein has {protein_len}")]
    IndexMismatch {
        index_len: usize,
        protein_len: usize,
    },
}
