use super::AppConfig;
use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use pocketscan::engine::config::{AnalysisConfigBuilder, GyrationWeighting};

/// Merges the optional config file with command-line overrides.
///
/// Precedence is flag, then file, then built-in default. Boolean flags can
/// only switch a feature on; to force one off, leave the flag out and set it
/// to `false` in the file.
pub fn build_config(args: &AnalyzeArgs) -> Result<AppConfig> {
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    merge(args, file_config)
}

fn merge(args: &AnalyzeArgs, file_config: FileConfig) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let gyration_file = file_config.gyration.unwrap_or_default();
    let sasa_file = file_config.sasa.unwrap_or_default();

    let radius = args
        .radius
        .or(file_config.radius)
        .unwrap_or(defaults.radius);
    let infer_bonds =
        args.infer_bonds || file_config.infer_bonds.unwrap_or(defaults.infer_bonds);
    let mass_weighted =
        args.mass_weighted || gyration_file.mass_weighted.unwrap_or(defaults.mass_weighted);
    let probe_radius = args
        .probe_radius
        .or(sasa_file.probe_radius)
        .unwrap_or(defaults.probe_radius);
    let sphere_points = args
        .sphere_points
        .or(sasa_file.sphere_points)
        .unwrap_or(defaults.sphere_points);

    let analysis = AnalysisConfigBuilder::new()
        .radius(radius)
        .infer_bonds(infer_bonds)
        .gyration(if mass_weighted {
            GyrationWeighting::Mass
        } else {
            GyrationWeighting::Uniform
        })
        .probe_radius(probe_radius)
        .sphere_points(sphere_points)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        analysis,
        data_dir: args.data_dir.clone().or(file_config.data_dir),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    fn analyze_args(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["pocketscan", "analyze", "1a28"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Analyze(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let config = merge(&analyze_args(&[]), FileConfig::default()).unwrap();
        assert_eq!(config.analysis.radius, 5.0);
        assert!(!config.analysis.infer_bonds);
        assert_eq!(config.analysis.gyration, GyrationWeighting::Uniform);
        assert_eq!(config.analysis.sasa.probe_radius, 1.4);
        assert_eq!(config.analysis.sasa.sphere_points, 960);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn file_values_override_defaults_and_flags_override_file() {
        let file = FileConfig::from_toml(
            "radius = 7.0\ndata-dir = \"cache\"\n[sasa]\nprobe-radius = 1.0\nsphere-points = 100\n[gyration]\nmass-weighted = true",
        )
        .unwrap();
        let args = analyze_args(&["--radius", "4.0", "--data-dir", "elsewhere"]);
        let config = merge(&args, file).unwrap();

        assert_eq!(config.analysis.radius, 4.0);
        assert_eq!(config.analysis.sasa.probe_radius, 1.0);
        assert_eq!(config.analysis.sasa.sphere_points, 100);
        assert_eq!(config.analysis.gyration, GyrationWeighting::Mass);
        assert_eq!(config.data_dir, Some(PathBuf::from("elsewhere")));
    }

    #[test]
    fn boolean_flags_switch_features_on() {
        let config = merge(
            &analyze_args(&["--infer-bonds", "--mass-weighted"]),
            FileConfig::default(),
        )
        .unwrap();
        assert!(config.analysis.infer_bonds);
        assert_eq!(config.analysis.gyration, GyrationWeighting::Mass);
    }

    #[test]
    fn invalid_radius_is_a_config_error() {
        let result = merge(&analyze_args(&["--radius", "0"]), FileConfig::default());
        assert!(matches!(result, Err(CliError::Config(_))));

        let file = FileConfig::from_toml("[sasa]\nsphere-points = 0").unwrap();
        assert!(matches!(
            merge(&analyze_args(&[]), file),
            Err(CliError::Config(_))
        ));
    }
}
