use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileGyrationConfig {
    #[serde(rename = "mass-weighted")]
    pub mass_weighted: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSasaConfig {
    #[serde(rename = "probe-radius")]
    pub probe_radius: Option<f64>,
    #[serde(rename = "sphere-points")]
    pub sphere_points: Option<usize>,
}

/// The TOML configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub radius: Option<f64>,
    #[serde(rename = "infer-bonds")]
    pub infer_bonds: Option<bool>,
    #[serde(rename = "data-dir")]
    pub data_dir: Option<PathBuf>,
    pub gyration: Option<FileGyrationConfig>,
    pub sasa: Option<FileSasaConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file_is_parsed() {
        let config = FileConfig::from_toml(
            r#"
            radius = 6.0
            infer-bonds = true
            data-dir = "cache"

            [gyration]
            mass-weighted = true

            [sasa]
            probe-radius = 1.2
            sphere-points = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.radius, Some(6.0));
        assert_eq!(config.infer_bonds, Some(true));
        assert_eq!(config.data_dir, Some(PathBuf::from("cache")));
        assert_eq!(config.gyration.unwrap().mass_weighted, Some(true));
        let sasa = config.sasa.unwrap();
        assert_eq!(sasa.probe_radius, Some(1.2));
        assert_eq!(sasa.sphere_points, Some(500));
    }

    #[test]
    fn empty_file_leaves_everything_unset() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("radius = 5.0\ncutoff = 4.0").is_err());
        assert!(FileConfig::from_toml("[sasa]\nprobe = 1.4").is_err());
    }

    #[test]
    fn from_file_reports_the_offending_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "radius = \"wide\"").unwrap();

        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { path: p, .. } if p == path));
    }
}
