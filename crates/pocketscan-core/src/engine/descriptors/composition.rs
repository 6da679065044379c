use crate::core::chemistry::residues::classify_residue;
use crate::core::models::atom_set::AtomSet;

/// Residue-level chemistry of a pocket, counted over distinct residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Composition {
    pub unique_residue_count: usize,
    pub polar_count: usize,
    pub nonpolar_count: usize,
    pub aromatic_count: usize,
}

impl Composition {
    /// Classifies every distinct `(chain id, residue number)` of `atoms` once.
    pub fn of(atoms: &AtomSet) -> Self {
        atoms
            .unique_residues()
            .into_iter()
            .fold(Self::default(), |mut acc, (_, residue_name)| {
                let class = classify_residue(residue_name);
                acc.unique_residue_count += 1;
                acc.polar_count += usize::from(class.is_polar());
                acc.nonpolar_count += usize::from(class.is_nonpolar());
                acc.aromatic_count += usize::from(class.aromatic);
                acc
            })
    }

    /// Percentage of nonpolar residues among residues with a known polarity.
    ///
    /// `None` when the pocket has neither polar nor nonpolar residues.
    pub fn hydrophobic_perc(&self) -> Option<f64> {
        let classified = self.polar_count + self.nonpolar_count;
        (classified > 0).then(|| 100.0 * self.nonpolar_count as f64 / classified as f64)
    }
}
