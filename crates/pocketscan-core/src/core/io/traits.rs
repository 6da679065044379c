use crate::core::models::atom_set::AtomSet;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading atomic structure file formats.
///
/// Readers return the atoms of the first model only, with alternate
/// locations collapsed to their first occurrence. Water, ions and ligands
/// are returned alongside the polymer; splitting them apart is the job of
/// [`locate_ligands`](super::ligands::locate_ligands).
pub trait StructureFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<AtomSet, Self::Error>;

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<AtomSet, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads a structure held entirely in memory.
    fn read_from_str(content: &str) -> Result<AtomSet, Self::Error> {
        let mut bytes = content.as_bytes();
        Self::read_from(&mut bytes)
    }
}
