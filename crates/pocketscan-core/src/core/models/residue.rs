use serde::Serialize;
use std::fmt;

/// Canonical identity of a residue within one structure.
///
/// Residue numbering restarts per chain, so the residue number alone is not
/// unique; the pair of chain identifier and residue number is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResidueKey {
    pub chain_id: String,
    pub residue_number: isize,
}

impl ResidueKey {
    pub fn new(chain_id: &str, residue_number: isize) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            residue_number,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.residue_number)
    }
}
