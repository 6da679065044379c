use crate::core::models::atom_set::{AtomSet, IndexSet};
use crate::core::models::ligand::{LigandMetadata, LigandRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LigandMetadataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed ligand metadata document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Metadata service reported an error: {0}")]
    Service(String),
    #[error("Metadata document has no entry")]
    MissingEntry,
}

// Mirrors the RCSB GraphQL response for the `nonpolymer_entities` query.
// Every level is optional so that partially filled documents still parse;
// missing leaf values surface later through `LigandMetadata::validate`.

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    entry: Option<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    nonpolymer_entities: Option<Vec<NonpolymerEntity>>,
}

#[derive(Debug, Deserialize)]
struct NonpolymerEntity {
    nonpolymer_comp: Option<NonpolymerComp>,
    nonpolymer_entity_instances: Option<Vec<EntityInstance>>,
}

#[derive(Debug, Deserialize)]
struct NonpolymerComp {
    chem_comp: Option<ChemComp>,
}

#[derive(Debug, Default, Deserialize)]
struct ChemComp {
    name: Option<String>,
    formula: Option<String>,
    formula_weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EntityInstance {
    rcsb_nonpolymer_entity_instance_container_identifiers: Option<InstanceIdentifiers>,
}

#[derive(Debug, Deserialize)]
struct InstanceIdentifiers {
    auth_asym_id: Option<String>,
    auth_seq_id: Option<SequenceId>,
    comp_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SequenceId {
    Number(i64),
    Text(String),
}

impl SequenceId {
    fn to_residue_number(&self) -> Option<isize> {
        match self {
            SequenceId::Number(n) => isize::try_from(*n).ok(),
            SequenceId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Parses a ligand metadata document into one [`LigandMetadata`] per ligand
/// instance.
///
/// Each non-polymer entity contributes its chemical description to every one
/// of its instances. An entry with no non-polymer entities yields an empty
/// list.
///
/// # Errors
///
/// Fails if the document is not valid JSON of the expected shape, if the
/// service reported errors, or if the entry itself is missing.
pub fn parse_ligand_metadata(json: &str) -> Result<Vec<LigandMetadata>, LigandMetadataError> {
    let response: GraphQlResponse = serde_json::from_str(json)?;
    collect_metadata(response)
}

/// Reads a ligand metadata document from any reader.
pub fn read_ligand_metadata_from(
    reader: impl Read,
) -> Result<Vec<LigandMetadata>, LigandMetadataError> {
    let response: GraphQlResponse = serde_json::from_reader(reader)?;
    collect_metadata(response)
}

/// Reads a ligand metadata document from a file path.
pub fn read_ligand_metadata<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<LigandMetadata>, LigandMetadataError> {
    let file = File::open(path)?;
    read_ligand_metadata_from(BufReader::new(file))
}

fn collect_metadata(response: GraphQlResponse) -> Result<Vec<LigandMetadata>, LigandMetadataError> {
    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(LigandMetadataError::Service(messages.join("; ")));
    }

    let entry = response
        .data
        .and_then(|d| d.entry)
        .ok_or(LigandMetadataError::MissingEntry)?;

    let mut ligands = Vec::new();
    for entity in entry.nonpolymer_entities.unwrap_or_default() {
        let comp = entity
            .nonpolymer_comp
            .and_then(|c| c.chem_comp)
            .unwrap_or_default();

        for instance in entity.nonpolymer_entity_instances.unwrap_or_default() {
            let ids = instance.rcsb_nonpolymer_entity_instance_container_identifiers;
            let (chain_id, residue_number, residue_name) = match ids {
                Some(ids) => (
                    ids.auth_asym_id.unwrap_or_default(),
                    ids.auth_seq_id.as_ref().and_then(SequenceId::to_residue_number),
                    ids.comp_id.unwrap_or_default(),
                ),
                None => (String::new(), None, String::new()),
            };
            ligands.push(LigandMetadata {
                name: comp.name.clone().unwrap_or_default(),
                formula: comp.formula.clone().unwrap_or_default(),
                formula_weight: comp.formula_weight,
                chain_id: chain_id.trim().to_string(),
                residue_number,
                residue_name: residue_name.trim().to_ascii_uppercase(),
            });
        }
    }
    Ok(ligands)
}

/// A structure split into its protein part and its ligand instances.
#[derive(Debug, Clone, Default)]
pub struct LocatedStructure {
    pub protein: AtomSet,
    pub ligands: Vec<LigandRecord>,
}

/// Splits a parsed structure into a protein atom set and one
/// [`LigandRecord`] per metadata entry.
///
/// A ligand's atoms are all atoms whose chain id, residue number and residue
/// name equal the metadata's. Those atoms are removed from the protein, so
/// the two are disjoint. Metadata that matches no atoms yields a record with
/// an empty atom set; the record is kept so that it is still reported.
pub fn locate_ligands(structure: &AtomSet, metadata: Vec<LigandMetadata>) -> LocatedStructure {
    let mut by_residue: HashMap<(&str, isize, &str), IndexSet> = HashMap::new();
    for (i, atom) in structure.iter().enumerate() {
        by_residue
            .entry((atom.chain_id(), atom.residue_number(), atom.residue_name()))
            .or_default()
            .insert(i);
    }

    let mut ligand_indices = IndexSet::new();
    let ligands: Vec<LigandRecord> = metadata
        .into_iter()
        .map(|meta| {
            let indices = meta
                .residue_number
                .and_then(|num| {
                    by_residue.get(&(meta.chain_id.as_str(), num, meta.residue_name.as_str()))
                })
                .cloned()
                .unwrap_or_default();
            if indices.is_empty() {
                debug!(
                    chain = %meta.chain_id,
                    residue = %meta.residue_name,
                    "Ligand instance has no atoms in the structure"
                );
            }
            ligand_indices.extend(indices.iter().copied());
            LigandRecord::new(meta, structure.subset(&indices))
        })
        .collect();

    LocatedStructure {
        protein: structure.without(&ligand_indices),
        ligands,
    }
}
