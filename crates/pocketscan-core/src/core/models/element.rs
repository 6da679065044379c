use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical elements that occur in biomolecular structures.
///
/// The per-element constants are the ones used by the descriptor code: Bondi
/// van der Waals radii for surface area, standard atomic masses for
/// mass-weighted gyration, and single-bond covalent radii (Cordero et al.)
/// for bond inference. Anything not listed maps to [`Element::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum Element {
    H,
    B,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    Si,
    P,
    S,
    Cl,
    K,
    Ca,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Se,
    Br,
    Cd,
    I,
    Hg,
    #[default]
    Unknown,
}

const UNKNOWN_VDW_RADIUS: f64 = 1.80;
const UNKNOWN_COVALENT_RADIUS: f64 = 1.50;
const UNKNOWN_ATOMIC_MASS: f64 = 12.011;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized element symbol: '{0}'")]
pub struct ParseElementError(pub String);

impl Element {
    /// Van der Waals radius in Angstroms.
    pub fn vdw_radius(self) -> f64 {
        match self {
            Element::H => 1.20,
            Element::B => 1.92,
            Element::C => 1.70,
            Element::N => 1.55,
            Element::O => 1.52,
            Element::F => 1.47,
            Element::Na => 2.27,
            Element::Mg => 1.73,
            Element::Si => 2.10,
            Element::P => 1.80,
            Element::S => 1.80,
            Element::Cl => 1.75,
            Element::K => 2.75,
            Element::Ca => 2.31,
            Element::Mn => 2.05,
            Element::Fe => 2.04,
            Element::Co => 2.00,
            Element::Ni => 1.63,
            Element::Cu => 1.40,
            Element::Zn => 1.39,
            Element::Se => 1.90,
            Element::Br => 1.85,
            Element::Cd => 1.58,
            Element::I => 1.98,
            Element::Hg => 1.55,
            Element::Unknown => UNKNOWN_VDW_RADIUS,
        }
    }

    /// Single-bond covalent radius in Angstroms.
    pub fn covalent_radius(self) -> f64 {
        match self {
            Element::H => 0.31,
            Element::B => 0.84,
            Element::C => 0.76,
            Element::N => 0.71,
            Element::O => 0.66,
            Element::F => 0.57,
            Element::Na => 1.66,
            Element::Mg => 1.41,
            Element::Si => 1.11,
            Element::P => 1.07,
            Element::S => 1.05,
            Element::Cl => 1.02,
            Element::K => 2.03,
            Element::Ca => 1.76,
            Element::Mn => 1.39,
            Element::Fe => 1.32,
            Element::Co => 1.26,
            Element::Ni => 1.24,
            Element::Cu => 1.32,
            Element::Zn => 1.22,
            Element::Se => 1.20,
            Element::Br => 1.20,
            Element::Cd => 1.44,
            Element::I => 1.39,
            Element::Hg => 1.32,
            Element::Unknown => UNKNOWN_COVALENT_RADIUS,
        }
    }

    /// Standard atomic mass in unified atomic mass units.
    pub fn atomic_mass(self) -> f64 {
        match self {
            Element::H => 1.008,
            Element::B => 10.81,
            Element::C => 12.011,
            Element::N => 14.007,
            Element::O => 15.999,
            Element::F => 18.998,
            Element::Na => 22.990,
            Element::Mg => 24.305,
            Element::Si => 28.085,
            Element::P => 30.974,
            Element::S => 32.06,
            Element::Cl => 35.45,
            Element::K => 39.098,
            Element::Ca => 40.078,
            Element::Mn => 54.938,
            Element::Fe => 55.845,
            Element::Co => 58.933,
            Element::Ni => 58.693,
            Element::Cu => 63.546,
            Element::Zn => 65.38,
            Element::Se => 78.971,
            Element::Br => 79.904,
            Element::Cd => 112.414,
            Element::I => 126.904,
            Element::Hg => 200.592,
            Element::Unknown => UNKNOWN_ATOMIC_MASS,
        }
    }

    pub fn is_hydrogen(self) -> bool {
        self == Element::H
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Element::H => "H",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::Cd => "Cd",
            Element::I => "I",
            Element::Hg => "Hg",
            Element::Unknown => "X",
        }
    }

    /// Guesses the element from a PDB-style atom name when the structure
    /// file carries no explicit element column.
    ///
    /// Leading digits are skipped (`"1HB"` is a hydrogen) and only the first
    /// letter is used, so two-letter elements cannot be recovered this way.
    pub fn infer_from_atom_name(atom_name: &str) -> Self {
        atom_name
            .trim()
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| match c.to_ascii_uppercase() {
                'H' | 'D' => Element::H,
                'C' => Element::C,
                'N' => Element::N,
                'O' => Element::O,
                'S' => Element::S,
                'P' => Element::P,
                _ => Element::Unknown,
            })
            .unwrap_or(Element::Unknown)
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    /// Parses an element symbol case-insensitively (`"FE"`, `"Fe"` and `"fe"`
    /// are all iron). Deuterium is folded into hydrogen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" | "D" => Ok(Element::H),
            "B" => Ok(Element::B),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "F" => Ok(Element::F),
            "NA" => Ok(Element::Na),
            "MG" => Ok(Element::Mg),
            "SI" => Ok(Element::Si),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "CL" => Ok(Element::Cl),
            "K" => Ok(Element::K),
            "CA" => Ok(Element::Ca),
            "MN" => Ok(Element::Mn),
            "FE" => Ok(Element::Fe),
            "CO" => Ok(Element::Co),
            "NI" => Ok(Element::Ni),
            "CU" => Ok(Element::Cu),
            "ZN" => Ok(Element::Zn),
            "SE" => Ok(Element::Se),
            "BR" => Ok(Element::Br),
            "CD" => Ok(Element::Cd),
            "I" => Ok(Element::I),
            "HG" => Ok(Element::Hg),
            _ => Err(ParseElementError(s.to_string())),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
