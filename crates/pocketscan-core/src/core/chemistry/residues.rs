use phf::{Set, phf_set};

static NONPOLAR_RESIDUES: Set<&'static str> = phf_set! {
    "GLY", "ALA", "VAL", "LEU", "ILE", "MET", "PHE", "TRP", "PRO",
};

static POLAR_RESIDUES: Set<&'static str> = phf_set! {
    "SER", "THR", "ASN", "GLN", "CYS", "TYR", "ASP", "GLU", "LYS", "ARG", "HIS",
};

static AROMATIC_RESIDUES: Set<&'static str> = phf_set! {
    "PHE", "TYR", "TRP", "HIS",
};

// Standard amino acids plus the modified residues most often found inside
// deposited protein chains.
static AMINO_ACID_RESIDUES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "SEC", "PYL", "UNK",
    "MSE", "SEP", "TPO", "PTR", "HYP", "CSO", "CSD", "CME", "CSS", "OCS",
    "MLY", "M3L", "ALY", "KCX", "LLP", "PCA", "MLE", "NLE", "ABA", "AIB",
    "HID", "HIE", "HIP", "HSD", "HSE", "HSP", "CYX", "ASH", "GLH", "LYN",
};

static NUCLEOTIDE_RESIDUES: Set<&'static str> = phf_set! {
    "A", "C", "G", "U", "I", "N",
    "DA", "DC", "DG", "DT", "DI", "DU", "DN",
    "PSU", "5MC", "5MU", "1MA", "2MG", "7MG", "M2G", "OMC", "OMG", "OMU",
    "H2U", "4SU", "5BU", "CBR", "8OG",
};

static CARBOHYDRATE_RESIDUES: Set<&'static str> = phf_set! {
    "NAG", "NDG", "BMA", "MAN", "GLC", "BGC", "GAL", "GLA", "FUC", "FUL",
    "SIA", "XYP", "XYS", "FRU", "GCS", "A2G", "NGA", "RAM", "ARA", "GCU",
    "BDP", "IDS", "SGN", "TRE", "SUC", "MAL", "LAT", "BOG",
};

static SOLVENT_RESIDUES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "DOD", "H2O", "SOL", "TIP", "TIP3", "SPC", "OH2",
};

/// Side-chain polarity of a standard amino acid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Nonpolar,
    Polar,
}

/// The categories a residue name falls into.
///
/// `polarity` is `None` for anything outside the two reference sets
/// (modified residues, nucleotides, sugars); `aromatic` is an independent
/// tag that can combine with either polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResidueClass {
    pub polarity: Option<Polarity>,
    pub aromatic: bool,
}

impl ResidueClass {
    pub fn is_nonpolar(&self) -> bool {
        self.polarity == Some(Polarity::Nonpolar)
    }

    pub fn is_polar(&self) -> bool {
        self.polarity == Some(Polarity::Polar)
    }
}

/// Classifies a residue name into polarity and aromaticity.
pub fn classify_residue(residue_name: &str) -> ResidueClass {
    let name = residue_name.trim();
    let polarity = if NONPOLAR_RESIDUES.contains(name) {
        Some(Polarity::Nonpolar)
    } else if POLAR_RESIDUES.contains(name) {
        Some(Polarity::Polar)
    } else {
        None
    };
    ResidueClass {
        polarity,
        aromatic: AROMATIC_RESIDUES.contains(name),
    }
}

/// The kind of biopolymer a residue can be part of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolymerType {
    AminoAcid,
    Nucleotide,
    Carbohydrate,
}

/// Looks up which polymer class, if any, a residue name belongs to.
pub fn polymer_type(residue_name: &str) -> Option<PolymerType> {
    let name = residue_name.trim();
    if AMINO_ACID_RESIDUES.contains(name) {
        Some(PolymerType::AminoAcid)
    } else if NUCLEOTIDE_RESIDUES.contains(name) {
        Some(PolymerType::Nucleotide)
    } else if CARBOHYDRATE_RESIDUES.contains(name) {
        Some(PolymerType::Carbohydrate)
    } else {
        None
    }
}

pub fn is_polymer_residue(residue_name: &str) -> bool {
    polymer_type(residue_name).is_some()
}

pub fn is_solvent_residue(residue_name: &str) -> bool {
    SOLVENT_RESIDUES.contains(residue_name.trim())
}
