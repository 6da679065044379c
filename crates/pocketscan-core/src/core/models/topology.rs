#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Aromatic,
}

/// A covalent bond between two atoms of the same [`AtomSet`](super::atom_set::AtomSet),
/// addressed by index. The lower index is always stored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(a: usize, b: usize, order: BondOrder) -> Self {
        Self {
            atom1: a.min(b),
            atom2: a.max(b),
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bond_orders_its_endpoints() {
        let bond = Bond::new(7, 3, BondOrder::Double);
        assert_eq!(bond.atom1, 3);
        assert_eq!(bond.atom2, 7);
        assert_eq!(bond.order, BondOrder::Double);
        assert_eq!(bond, Bond::new(3, 7, BondOrder::Double));
    }

    #[test]
    fn contains_checks_both_endpoints() {
        let bond = Bond::new(1, 2, BondOrder::Single);
        assert!(bond.contains(1));
        assert!(bond.contains(2));
        assert!(!bond.contains(3));
    }

    #[test]
    fn default_bond_order_is_single() {
        assert_eq!(BondOrder::default(), BondOrder::Single);
    }
}
