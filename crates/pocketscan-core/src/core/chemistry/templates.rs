use crate::core::models::topology::BondOrder;
use phf::{Map, phf_map};

/// A bond between two named atoms of the same residue.
pub type TemplateBond = (&'static str, &'static str, BondOrder);

const S: BondOrder = BondOrder::Single;
const D: BondOrder = BondOrder::Double;
const AR: BondOrder = BondOrder::Aromatic;

static BACKBONE_BONDS: &[TemplateBond] = &[
    ("N", "CA", S),
    ("CA", "C", S),
    ("C", "O", D),
    ("C", "OXT", S),
];

// Heavy-atom side-chain connectivity, including the CA-CB link.
static SIDECHAIN_BONDS: Map<&'static str, &'static [TemplateBond]> = phf_map! {
    "GLY" => &[],
    "ALA" => &[("CA", "CB", S)],
    "ARG" => &[
        ("CA", "CB", S), ("CB", "CG", S), ("CG", "CD", S), ("CD", "NE", S),
        ("NE", "CZ", S), ("CZ", "NH1", S), ("CZ", "NH2", D),
    ],
    "ASN" => &[("CA", "CB", S), ("CB", "CG", S), ("CG", "OD1", D), ("CG", "ND2", S)],
    "ASP" => &[("CA", "CB", S), ("CB", "CG", S), ("CG", "OD1", D), ("CG", "OD2", S)],
    "CYS" => &[("CA", "CB", S), ("CB", "SG", S)],
    "GLN" => &[
        ("CA", "CB", S), ("CB", "CG", S), ("CG", "CD", S), ("CD", "OE1", D), ("CD", "NE2", S),
    ],
    "GLU" => &[
        ("CA", "CB", S), ("CB", "CG", S), ("CG", "CD", S), ("CD", "OE1", D), ("CD", "OE2", S),
    ],
    "HIS" => &[
        ("CA", "CB", S), ("CB", "CG", S), ("CG", "ND1", AR), ("CG", "CD2", AR),
        ("ND1", "CE1", AR), ("CE1", "NE2", AR), ("NE2", "CD2", AR),
    ],
    "ILE" => &[("CA", "CB", S), ("CB", "CG1", S), ("CB", "CG2", S), ("CG1", "CD1", S)],
    "LEU" => &[("CA", "CB", S), ("CB", "CG", S), ("CG", "CD1", S), ("CG", "CD2", S)],
    "LYS" => &[
        ("CA", "CB", S), ("CB", "CG", S), ("CG", "CD", S), ("CD", "CE", S), ("CE", "NZ", S),
    ],
    "MET" => &[("CA", "CB", S), ("CB", "CG", S), ("CG", "SD", S), ("SD", "CE", S)],
    "MSE" => &[("CA", "CB", S), ("CB", "CG", S), ("CG", "SE", S), ("SE", "CE", S)],
    "PHE" => &[
        ("CA", "CB", S), ("CB", "CG", S), ("CG", "CD1", AR), ("CG", "CD2", AR),
        ("CD1", "CE1", AR), ("CD2", "CE2", AR), ("CE1", "CZ", AR), ("CE2", "CZ", AR),
    ],
    "PRO" => &[("CA", "CB", S), ("CB", "CG", S), ("CG", "CD", S), ("CD", "N", S)],
    "SER" => &[("CA", "CB", S), ("CB", "OG", S)],
    "THR" => &[("CA", "CB", S), ("CB", "OG1", S), ("CB", "CG2", S)],
    "TRP" => &[
        ("CA", "CB", S), ("CB", "CG", S), ("CG", "CD1", AR), ("CG", "CD2", AR),
        ("CD1", "NE1", AR), ("NE1", "CE2", AR), ("CD2", "CE2", AR), ("CD2", "CE3", AR),
        ("CE2", "CZ2", AR), ("CE3", "CZ3", AR), ("CZ2", "CH2", AR), ("CZ3", "CH2", AR),
    ],
    "TYR" => &[
        ("CA", "CB", S), ("CB", "CG", S), ("CG", "CD1", AR), ("CG", "CD2", AR),
        ("CD1", "CE1", AR), ("CD2", "CE2", AR), ("CE1", "CZ", AR), ("CE2", "CZ", AR),
        ("CZ", "OH", S),
    ],
    "VAL" => &[("CA", "CB", S), ("CB", "CG1", S), ("CB", "CG2", S)],
};

/// Returns the full heavy-atom template (backbone followed by side chain)
/// for a residue, or `None` if the residue has no template.
pub fn residue_template(residue_name: &str) -> Option<impl Iterator<Item = &'static TemplateBond>> {
    SIDECHAIN_BONDS
        .get(residue_name.trim())
        .map(|sidechain| BACKBONE_BONDS.iter().chain(sidechain.iter()))
}

/// An inter-residue link: the named atom of one residue bonded to the named
/// atom of another residue.
pub struct ResidueLink {
    pub from_atom: &'static str,
    pub to_atom: &'static str,
    pub order: BondOrder,
    /// Both residues must be on the same chain.
    pub same_chain: bool,
}

pub static RESIDUE_LINKS: &[ResidueLink] = &[
    // Peptide bond.
    ResidueLink {
        from_atom: "C",
        to_atom: "N",
        order: S,
        same_chain: true,
    },
    // Phosphodiester backbone.
    ResidueLink {
        from_atom: "O3'",
        to_atom: "P",
        order: S,
        same_chain: true,
    },
    // Disulfide bridge.
    ResidueLink {
        from_atom: "SG",
        to_atom: "SG",
        order: S,
        same_chain: false,
    },
];
