use super::element::Element;
use super::residue::ResidueKey;
use nalgebra::Point3;

/// A single atom of a parsed structure.
///
/// Atoms are plain value records: they are built once by a structure reader
/// and never mutated afterwards. All fields are reached through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    name: String,
    element: Element,
    residue_name: String,
    residue_number: isize,
    chain_id: String,
    position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// Names are trimmed; residue names are upper-cased so that they can be
    /// looked up directly in the residue reference tables.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The author chain identifier (e.g. "A").
    /// * `residue_number` - The author residue sequence number.
    /// * `residue_name` - The three-letter (or shorter) component id.
    /// * `name` - The atom name (e.g. "CA").
    /// * `element` - The chemical element.
    /// * `position` - Cartesian coordinates in Angstroms.
    pub fn new(
        chain_id: &str,
        residue_number: isize,
        residue_name: &str,
        name: &str,
        element: Element,
        position: Point3<f64>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            element,
            residue_name: residue_name.trim().to_ascii_uppercase(),
            residue_number,
            chain_id: chain_id.trim().to_string(),
            position,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn residue_name(&self) -> &str {
        &self.residue_name
    }

    pub fn residue_number(&self) -> isize {
        self.residue_number
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey::new(&self.chain_id, self.residue_number)
    }

    /// Van der Waals radius derived from the element, in Angstroms.
    pub fn vdw_radius(&self) -> f64 {
        self.element.vdw_radius()
    }

    pub fn atomic_mass(&self) -> f64 {
        self.element.atomic_mass()
    }

    /// Returns `true` if this atom belongs to the residue identified by the
    /// given chain, number and name.
    pub fn is_in_residue(&self, chain_id: &str, residue_number: isize, residue_name: &str) -> bool {
        self.residue_number == residue_number
            && self.chain_id == chain_id
            && self.residue_name == residue_name
    }
}
