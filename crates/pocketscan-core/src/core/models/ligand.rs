use super::atom_set::AtomSet;
use serde::Serialize;
use thiserror::Error;

/// Descriptive metadata for one ligand instance.
///
/// The chain id, residue number and residue name locate the instance inside
/// the structure; the chemical fields describe the species. Fields are
/// optional or possibly empty because they come from an external metadata
/// source; [`LigandMetadata::validate`] decides whether they are usable.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LigandMetadata {
    pub name: String,
    pub formula: String,
    pub formula_weight: Option<f64>,
    pub chain_id: String,
    pub residue_number: Option<isize>,
    pub residue_name: String,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LigandDataError {
    #[error("Ligand chemical name is missing")]
    MissingName,
    #[error("Ligand formula is missing")]
    MissingFormula,
    #[error("Ligand formula weight is missing")]
    MissingFormulaWeight,
    #[error("Ligand formula weight must be a non-negative finite number (got {0})")]
    InvalidFormulaWeight(f64),
    #[error("Ligand chain identifier is missing")]
    MissingChainId,
    #[error("Ligand residue number is missing or not an integer")]
    MissingResidueNumber,
    #[error("Ligand residue name is missing")]
    MissingResidueName,
}

impl LigandMetadata {
    /// Checks that every field needed to locate and describe the ligand is
    /// present and well-formed.
    pub fn validate(&self) -> Result<(), LigandDataError> {
        if self.name.trim().is_empty() {
            return Err(LigandDataError::MissingName);
        }
        if self.formula.trim().is_empty() {
            return Err(LigandDataError::MissingFormula);
        }
        match self.formula_weight {
            None => return Err(LigandDataError::MissingFormulaWeight),
            Some(w) if !w.is_finite() || w < 0.0 => {
                return Err(LigandDataError::InvalidFormulaWeight(w));
            }
            Some(_) => {}
        }
        if self.chain_id.trim().is_empty() {
            return Err(LigandDataError::MissingChainId);
        }
        if self.residue_number.is_none() {
            return Err(LigandDataError::MissingResidueNumber);
        }
        if self.residue_name.trim().is_empty() {
            return Err(LigandDataError::MissingResidueName);
        }
        Ok(())
    }
}

/// One ligand instance: its metadata plus the atoms it occupies.
///
/// Two copies of the same chemical species bound at different sites are two
/// separate records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LigandRecord {
    metadata: LigandMetadata,
    atoms: AtomSet,
}

impl LigandRecord {
    pub fn new(metadata: LigandMetadata, atoms: AtomSet) -> Self {
        Self { metadata, atoms }
    }

    pub fn metadata(&self) -> &LigandMetadata {
        &self.metadata
    }

    pub fn atoms(&self) -> &AtomSet {
        &self.atoms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_metadata() -> LigandMetadata {
        LigandMetadata {
            name: "PROTOPORPHYRIN IX CONTAINING FE".to_string(),
            formula: "C34 H32 Fe N4 O4".to_string(),
            formula_weight: Some(616.487),
            chain_id: "A".to_string(),
            residue_number: Some(201),
            residue_name: "HEM".to_string(),
        }
    }

    #[test]
    fn validate_accepts_complete_metadata() {
        assert_eq!(valid_metadata().validate(), Ok(()));
    }

    #[test]
    fn validate_reports_missing_fields() {
        let mut m = valid_metadata();
        m.name = "  ".to_string();
        assert_eq!(m.validate(), Err(LigandDataError::MissingName));

        let mut m = valid_metadata();
        m.formula.clear();
        assert_eq!(m.validate(), Err(LigandDataError::MissingFormula));

        let mut m = valid_metadata();
        m.formula_weight = None;
        assert_eq!(m.validate(), Err(LigandDataError::MissingFormulaWeight));

        let mut m = valid_metadata();
        m.chain_id.clear();
        assert_eq!(m.validate(), Err(LigandDataError::MissingChainId));

        let mut m = valid_metadata();
        m.residue_number = None;
        assert_eq!(m.validate(), Err(LigandDataError::MissingResidueNumber));

        let mut m = valid_metadata();
        m.residue_name.clear();
        assert_eq!(m.validate(), Err(LigandDataError::MissingResidueName));
    }

    #[test]
    fn validate_rejects_negative_or_non_finite_weight() {
        let mut m = valid_metadata();
        m.formula_weight = Some(-1.0);
        assert_eq!(m.validate(), Err(LigandDataError::InvalidFormulaWeight(-1.0)));

        m.formula_weight = Some(f64::INFINITY);
        assert!(matches!(
            m.validate(),
            Err(LigandDataError::InvalidFormulaWeight(_))
        ));
    }

    #[test]
    fn record_exposes_metadata_and_atoms() {
        let record = LigandRecord::new(valid_metadata(), AtomSet::default());
        assert_eq!(record.metadata().residue_name, "HEM");
        assert!(record.atoms().is_empty());
    }
}
