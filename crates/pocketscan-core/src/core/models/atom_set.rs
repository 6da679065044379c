use super::atom::Atom;
use super::residue::ResidueKey;
use nalgebra::Point3;
use std::collections::{BTreeSet, HashSet};

/// A set of atom indices into an [`AtomSet`].
///
/// Ordered so that anything materialized from it iterates in source order.
pub type IndexSet = BTreeSet<usize>;

/// An ordered, immutable collection of atoms.
///
/// An `AtomSet` stands for a whole protein, a single ligand instance, or a
/// pocket. Selections are expressed as predicates that return an
/// [`IndexSet`]; selections compose through ordinary set union and
/// intersection and are materialized with [`AtomSet::subset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomSet {
    atoms: Vec<Atom>,
}

impl AtomSet {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|atom| *atom.position()).collect()
    }

    /// Returns the indices of all atoms matching `predicate`.
    pub fn select(&self, predicate: impl Fn(&Atom) -> bool) -> IndexSet {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| predicate(atom))
            .map(|(i, _)| i)
            .collect()
    }

    /// Narrows an existing selection to the atoms that also match `predicate`.
    ///
    /// Equivalent to intersecting `candidates` with `self.select(predicate)`,
    /// but only evaluates the predicate on the candidates.
    pub fn refine(&self, candidates: &IndexSet, predicate: impl Fn(&Atom) -> bool) -> IndexSet {
        candidates
            .iter()
            .copied()
            .filter(|&i| self.atoms.get(i).is_some_and(&predicate))
            .collect()
    }

    /// Materializes the atoms at `indices` into a new set, in index order.
    ///
    /// Indices past the end of the set are ignored.
    pub fn subset(&self, indices: &IndexSet) -> AtomSet {
        indices
            .iter()
            .filter_map(|&i| self.atoms.get(i).cloned())
            .collect()
    }

    /// Returns a new set without the atoms at `indices`.
    pub fn without(&self, indices: &IndexSet) -> AtomSet {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, atom)| atom.clone())
            .collect()
    }

    /// Lists each distinct residue once, in order of first appearance,
    /// together with its residue name.
    pub fn unique_residues(&self) -> Vec<(ResidueKey, &str)> {
        let mut seen = HashSet::new();
        self.atoms
            .iter()
            .filter_map(|atom| {
                let key = atom.residue_key();
                if seen.insert(key.clone()) {
                    Some((key, atom.residue_name()))
                } else {
                    None
                }
            })
            .collect()
    }
}

impl FromIterator<Atom> for AtomSet {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AtomSet {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl std::ops::Index<usize> for AtomSet {
    type Output = Atom;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;

    fn atom(chain: &str, resnum: isize, resname: &str, name: &str, x: f64) -> Atom {
        Atom::new(chain, resnum, resname, name, Element::C, Point3::new(x, 0.0, 0.0))
    }

    fn sample_set() -> AtomSet {
        AtomSet::new(vec![
            atom("A", 1, "ALA", "N", 0.0),
            atom("A", 1, "ALA", "CA", 1.0),
            atom("A", 2, "PHE", "CA", 2.0),
            atom("B", 1, "GLY", "CA", 3.0),
            atom("A", 100, "HOH", "O", 4.0),
        ])
    }

    #[test]
    fn select_returns_matching_indices_in_order() {
        let set = sample_set();
        let ca = set.select(|a| a.name() == "CA");
        assert_eq!(ca.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn selections_compose_through_set_operations() {
        let set = sample_set();
        let chain_a = set.select(|a| a.chain_id() == "A");
        let ca = set.select(|a| a.name() == "CA");

        let both: IndexSet = chain_a.intersection(&ca).copied().collect();
        let either: IndexSet = chain_a.union(&ca).copied().collect();

        assert_eq!(both.into_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(either.len(), 5);
    }

    #[test]
    fn refine_matches_intersection_with_select() {
        let set = sample_set();
        let candidates: IndexSet = [0, 2, 4].into_iter().collect();
        let refined = set.refine(&candidates, |a| a.residue_name() != "HOH");
        let expected: IndexSet = candidates
            .intersection(&set.select(|a| a.residue_name() != "HOH"))
            .copied()
            .collect();
        assert_eq!(refined, expected);
    }

    #[test]
    fn subset_preserves_index_order_and_ignores_out_of_range() {
        let set = sample_set();
        let indices: IndexSet = [3, 0, 42].into_iter().collect();
        let subset = set.subset(&indices);
        assert_eq!(subset.len(), 2);
        assert_eq!(subset[0].name(), "N");
        assert_eq!(subset[1].residue_name(), "GLY");
    }

    #[test]
    fn without_removes_the_given_indices() {
        let set = sample_set();
        let removed = set.without(&[4].into_iter().collect());
        assert_eq!(removed.len(), 4);
        assert!(removed.iter().all(|a| a.residue_name() != "HOH"));
    }

    #[test]
    fn unique_residues_distinguishes_chains() {
        let set = sample_set();
        let residues = set.unique_residues();
        assert_eq!(
            residues,
            vec![
                (ResidueKey::new("A", 1), "ALA"),
                (ResidueKey::new("A", 2), "PHE"),
                (ResidueKey::new("B", 1), "GLY"),
                (ResidueKey::new("A", 100), "HOH"),
            ]
        );
    }

    #[test]
    fn empty_set_behaves() {
        let set = AtomSet::default();
        assert!(set.is_empty());
        assert!(set.positions().is_empty());
        assert!(set.unique_residues().is_empty());
        assert!(set.select(|_| true).is_empty());
    }
}
