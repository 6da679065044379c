use crate::core::chemistry::templates::{RESIDUE_LINKS, residue_template};
use crate::core::models::atom::Atom;
use crate::core::models::atom_set::AtomSet;
use crate::core::models::topology::{Bond, BondOrder};
use crate::core::spatial::index::{SpatialIndex, SpatialIndexError};
use std::collections::HashMap;
use tracing::trace;

/// Tolerance added to the covalent-radius sum when accepting a bond.
pub const BOND_TOLERANCE: f64 = 0.45;
/// Pairs closer than this are overlapping atoms, not bonds.
pub const MIN_BOND_DISTANCE: f64 = 0.4;
/// Upper bound on any covalent bond length considered.
pub const MAX_BOND_LENGTH: f64 = 2.6;

fn within_bonding_distance(a: &Atom, b: &Atom) -> bool {
    let distance = (a.position() - b.position()).norm();
    let limit = a.element().covalent_radius() + b.element().covalent_radius() + BOND_TOLERANCE;
    distance > MIN_BOND_DISTANCE && distance <= limit
}

struct ResidueAtoms<'a> {
    residue_name: &'a str,
    members: Vec<usize>,
    by_name: HashMap<&'a str, usize>,
}

fn group_by_residue(atoms: &AtomSet) -> Vec<ResidueAtoms<'_>> {
    let mut slots: HashMap<(&str, isize, &str), usize> = HashMap::new();
    let mut residues: Vec<ResidueAtoms<'_>> = Vec::new();
    for (i, atom) in atoms.iter().enumerate() {
        let key = (atom.chain_id(), atom.residue_number(), atom.residue_name());
        let slot = *slots.entry(key).or_insert_with(|| {
            residues.push(ResidueAtoms {
                residue_name: atom.residue_name(),
                members: Vec::new(),
                by_name: HashMap::new(),
            });
            residues.len() - 1
        });
        let residue = &mut residues[slot];
        residue.members.push(i);
        residue.by_name.entry(atom.name()).or_insert(i);
    }
    residues
}

/// Derives the covalent bond graph of an atom set.
///
/// Standard amino acids use their heavy-atom templates; every template bond
/// is still distance-checked, so missing or displaced atoms do not produce
/// bonds. Other residues fall back to covalent-radius distance inference
/// (hydrogen pairs excluded). Peptide, phosphodiester and disulfide links
/// between residues are added when the two atoms are within bonding
/// distance.
///
/// Bonds are returned sorted by atom index, without duplicates.
pub fn infer_bonds(atoms: &AtomSet) -> Result<Vec<Bond>, SpatialIndexError> {
    let mut bonds = Vec::new();

    for residue in group_by_residue(atoms) {
        match residue_template(residue.residue_name) {
            Some(template) => {
                for &(name_a, name_b, order) in template {
                    let (Some(&a), Some(&b)) =
                        (residue.by_name.get(name_a), residue.by_name.get(name_b))
                    else {
                        continue;
                    };
                    if within_bonding_distance(&atoms[a], &atoms[b]) {
                        bonds.push(Bond::new(a, b, order));
                    }
                }
            }
            None => {
                for (k, &a) in residue.members.iter().enumerate() {
                    for &b in &residue.members[k + 1..] {
                        if atoms[a].element().is_hydrogen() && atoms[b].element().is_hydrogen() {
                            continue;
                        }
                        if within_bonding_distance(&atoms[a], &atoms[b]) {
                            bonds.push(Bond::new(a, b, BondOrder::Single));
                        }
                    }
                }
            }
        }
    }

    let index = SpatialIndex::from_atoms(atoms, MAX_BOND_LENGTH)?;
    for link in RESIDUE_LINKS {
        for (i, atom) in atoms.iter().enumerate() {
            if atom.name() != link.from_atom {
                continue;
            }
            for j in index.neighbors(atom.position(), MAX_BOND_LENGTH)? {
                let other = &atoms[j];
                if other.name() != link.to_atom || other.residue_key() == atom.residue_key() {
                    continue;
                }
                if link.same_chain && other.chain_id() != atom.chain_id() {
                    continue;
                }
                if within_bonding_distance(atom, other) {
                    bonds.push(Bond::new(i, j, link.order));
                }
            }
        }
    }

    bonds.sort_by_key(|bond| (bond.atom1, bond.atom2));
    bonds.dedup_by_key(|bond| (bond.atom1, bond.atom2));
    trace!(atoms = atoms.len(), bonds = bonds.len(), "Inferred bond graph");
    Ok(bonds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use nalgebra::Point3;

    fn atom(resnum: isize, resname: &str, name: &str, element: Element, x: f64, y: f64) -> Atom {
        Atom::new("A", resnum, resname, name, element, Point3::new(x, y, 0.0))
    }

    fn has_bond(bonds: &[Bond], a: usize, b: usize) -> bool {
        bonds.iter().any(|bond| bond.contains(a) && bond.contains(b))
    }

    // Two glycines joined by a peptide bond, roughly planar.
    fn glycine_dipeptide() -> AtomSet {
        AtomSet::new(vec![
            atom(1, "GLY", "N", Element::N, 0.0, 0.0),
            atom(1, "GLY", "CA", Element::C, 1.46, 0.0),
            atom(1, "GLY", "C", Element::C, 2.0, 1.42),
            atom(1, "GLY", "O", Element::O, 1.3, 2.4),
            atom(2, "GLY", "N", Element::N, 3.32, 1.5),
            atom(2, "GLY", "CA", Element::C, 4.0, 2.8),
        ])
    }

    #[test]
    fn template_and_peptide_bonds_are_found() {
        let bonds = infer_bonds(&glycine_dipeptide()).unwrap();

        assert!(has_bond(&bonds, 0, 1));
        assert!(has_bond(&bonds, 1, 2));
        assert!(has_bond(&bonds, 2, 3));
        assert!(has_bond(&bonds, 2, 4));
        assert!(has_bond(&bonds, 4, 5));
        assert!(!has_bond(&bonds, 0, 4));
        assert_eq!(bonds.len(), 5);
    }

    #[test]
    fn carbonyl_is_a_double_bond() {
        let bonds = infer_bonds(&glycine_dipeptide()).unwrap();
        let carbonyl = bonds.iter().find(|b| b.atom1 == 2 && b.atom2 == 3).unwrap();
        assert_eq!(carbonyl.order, BondOrder::Double);
    }

    #[test]
    fn displaced_template_atoms_are_not_bonded() {
        let atoms = AtomSet::new(vec![
            atom(1, "ALA", "CA", Element::C, 0.0, 0.0),
            atom(1, "ALA", "CB", Element::C, 4.0, 0.0),
        ]);
        assert!(infer_bonds(&atoms).unwrap().is_empty());
    }

    #[test]
    fn residues_without_template_use_distance_inference() {
        let atoms = AtomSet::new(vec![
            atom(1, "NAG", "C1", Element::C, 0.0, 0.0),
            atom(1, "NAG", "C2", Element::C, 1.52, 0.0),
            atom(1, "NAG", "O5", Element::O, -0.8, 1.1),
            atom(1, "NAG", "H1", Element::H, 0.0, -1.0),
            atom(1, "NAG", "H2", Element::H, 0.5, -1.2),
        ]);
        let bonds = infer_bonds(&atoms).unwrap();
        assert!(has_bond(&bonds, 0, 1));
        assert!(has_bond(&bonds, 0, 2));
        assert!(has_bond(&bonds, 0, 3));
        assert!(!has_bond(&bonds, 3, 4));
    }

    #[test]
    fn disulfide_bridges_cross_chains() {
        let atoms = AtomSet::new(vec![
            Atom::new("A", 10, "CYS", "SG", Element::S, Point3::new(0.0, 0.0, 0.0)),
            Atom::new("B", 50, "CYS", "SG", Element::S, Point3::new(2.05, 0.0, 0.0)),
        ]);
        let bonds = infer_bonds(&atoms).unwrap();
        assert_eq!(bonds, vec![Bond::new(0, 1, BondOrder::Single)]);
    }

    #[test]
    fn peptide_links_require_the_same_chain() {
        let atoms = AtomSet::new(vec![
            Atom::new("A", 1, "GLY", "C", Element::C, Point3::new(0.0, 0.0, 0.0)),
            Atom::new("B", 1, "GLY", "N", Element::N, Point3::new(1.33, 0.0, 0.0)),
        ]);
        assert!(infer_bonds(&atoms).unwrap().is_empty());
    }

    #[test]
    fn empty_set_has_no_bonds() {
        assert!(infer_bonds(&AtomSet::default()).unwrap().is_empty());
    }
}
