use pocketscan::core::io::cif::CifError;
use pocketscan::core::io::ligands::LigandMetadataError;
use pocketscan::core::io::pdb::PdbError;
use pocketscan::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data management error: {0}")]
    Data(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to write report: {0}")]
    Report(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn structure(path: impl Into<PathBuf>, source: impl Into<StructureReadError>) -> Self {
        let source: StructureReadError = source.into();
        CliError::FileParsing {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn ligand_metadata(path: impl Into<PathBuf>, source: LigandMetadataError) -> Self {
        CliError::FileParsing {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Either structure reader's error, so callers can pick the reader at runtime.
#[derive(Debug, Error)]
pub enum StructureReadError {
    #[error(transparent)]
    Cif(#[from] CifError),
    #[error(transparent)]
    Pdb(#[from] PdbError),
}
