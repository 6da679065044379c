use std::collections::HashSet;

/// Keeps the first occurrence of every atom site.
///
/// Structures with alternate conformations list the same atom once per
/// location; only the first one is kept so that each atom appears exactly
/// once in the resulting atom set.
#[derive(Debug, Default)]
pub(crate) struct FirstOccurrence {
    seen: HashSet<(String, isize, String, String, String)>,
}

impl FirstOccurrence {
    /// Returns `true` the first time an atom site is offered.
    pub(crate) fn accept(
        &mut self,
        chain_id: &str,
        residue_number: isize,
        insertion_code: &str,
        residue_name: &str,
        atom_name: &str,
    ) -> bool {
        self.seen.insert((
            chain_id.to_string(),
            residue_number,
            insertion_code.to_string(),
            residue_name.to_string(),
            atom_name.to_string(),
        ))
    }
}
