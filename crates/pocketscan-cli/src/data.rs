use crate::error::{CliError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const STRUCTURE_URL: &str = "https://files.rcsb.org/download";
const GRAPHQL_URL: &str = "https://data.rcsb.org/graphql";

/// Local paths of one cached PDB entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntry {
    pub id: String,
    pub structure: PathBuf,
    pub ligands: PathBuf,
}

/// Owns the on-disk cache of downloaded structures and ligand metadata.
///
/// Entries live under `{base}/{ID}/{ID}.cif` and `{base}/{ID}/{ID}_ligands.json`.
#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    /// Uses `custom_path` when given, otherwise the platform data directory.
    pub fn new(custom_path: Option<PathBuf>) -> Result<Self> {
        let path = match custom_path {
            Some(path) => path,
            None => Self::default_data_path()?,
        };
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn entry(&self, id: &str) -> Result<CachedEntry> {
        let id = normalize_id(id)?;
        let dir = self.base_path.join(&id);
        Ok(CachedEntry {
            structure: dir.join(format!("{id}.cif")),
            ligands: dir.join(format!("{id}_ligands.json")),
            id,
        })
    }

    /// Makes sure both files of an entry are cached, downloading whichever is
    /// missing. With `force`, both are downloaded again.
    pub async fn fetch(
        &self,
        client: &reqwest::Client,
        id: &str,
        force: bool,
    ) -> Result<CachedEntry> {
        let entry = self.entry(id)?;
        if let Some(parent) = entry.structure.parent() {
            fs::create_dir_all(parent)?;
        }

        if force || !entry.structure.exists() {
            let url = format!("{STRUCTURE_URL}/{}.cif", entry.id);
            info!("Downloading structure {} from {}", entry.id, url);
            let body = client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            write_atomically(&entry.structure, &body)?;
        } else {
            debug!("Using cached structure {:?}", &entry.structure);
        }

        if force || !entry.ligands.exists() {
            info!("Querying ligand metadata for {}", entry.id);
            let body = client
                .post(GRAPHQL_URL)
                .json(&serde_json::json!({ "query": ligand_query(&entry.id) }))
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            write_atomically(&entry.ligands, &body)?;
        } else {
            debug!("Using cached ligand metadata {:?}", &entry.ligands);
        }

        Ok(entry)
    }

    fn default_data_path() -> Result<PathBuf> {
        ProjectDirs::from("org", "pocketscan", "pocketscan")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}

/// Upper-cases a PDB identifier and rejects anything that cannot name a
/// cache directory.
pub fn normalize_id(id: &str) -> Result<String> {
    let id = id.trim().to_ascii_uppercase();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CliError::Argument(format!("Invalid PDB identifier: '{id}'")));
    }
    Ok(id)
}

fn ligand_query(id: &str) -> String {
    format!(
        r#"{{
  entry(entry_id: "{id}") {{
    nonpolymer_entities {{
      nonpolymer_entity_instances {{
        rcsb_nonpolymer_entity_instance_container_identifiers {{
          auth_seq_id
          comp_id
          auth_asym_id
        }}
      }}
      nonpolymer_comp {{
        chem_comp {{
          formula_weight
          name
          formula
        }}
      }}
    }}
  }}
}}"#
    )
}

fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let partial = path.with_extension("part");
    fs::write(&partial, content)?;
    fs::rename(&partial, path)?;
    Ok(())
}
