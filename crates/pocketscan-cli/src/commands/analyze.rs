use crate::cli::AnalyzeArgs;
use crate::config::build_config;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::report::write_reports;
use crate::utils::progress::CliProgressHandler;
use pocketscan::{
    core::io::{
        cif::CifFile,
        ligands::{locate_ligands, read_ligand_metadata},
        pdb::PdbFile,
        traits::StructureFile,
    },
    core::models::atom_set::AtomSet,
    engine::{config::AnalysisConfig, progress::ProgressReporter},
    workflows::{self, analyze::ProteinReport},
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{info, warn};

pub async fn run(args: AnalyzeArgs) -> Result<()> {
    let config = build_config(&args)?;
    let progress = CliProgressHandler::new();
    let mut reports = Vec::new();

    if let (Some(structure), Some(ligands)) = (&args.structure, &args.ligands) {
        let id = protein_id_from_path(structure);
        let report = tokio::task::block_in_place(|| {
            analyze_files(&id, structure, ligands, &config.analysis, &progress)
        })?;
        reports.push(report);
    } else {
        let manager = DataManager::new(config.data_dir.clone())?;
        let client = reqwest::Client::new();

        for id in &args.ids {
            progress.start_phase(format!("Fetching {}...", id.to_ascii_uppercase()));
            let entry = manager
                .fetch(&client, id, args.force)
                .await
                .inspect_err(|_| progress.finish())?;

            let report = tokio::task::block_in_place(|| {
                analyze_files(
                    &entry.id,
                    &entry.structure,
                    &entry.ligands,
                    &config.analysis,
                    &progress,
                )
            })?;
            reports.push(report);
        }
    }
    progress.finish();

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_reports(&reports, args.format, &mut writer)?;
            println!("Report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_reports(&reports, args.format, &mut stdout.lock())?;
        }
    }

    Ok(())
}

fn analyze_files(
    id: &str,
    structure_path: &Path,
    ligands_path: &Path,
    config: &AnalysisConfig,
    progress: &CliProgressHandler,
) -> Result<ProteinReport> {
    progress.start_phase(format!("Reading {id}..."));
    info!("Loading structure from {:?}", structure_path);
    let atoms = read_structure(structure_path)?;
    if atoms.is_empty() {
        warn!("Structure {:?} contains no atoms.", structure_path);
    }

    let metadata = read_ligand_metadata(ligands_path)
        .map_err(|e| CliError::ligand_metadata(ligands_path, e))?;
    let located = locate_ligands(&atoms, metadata);
    info!(
        "{}: {} protein atoms, {} ligand instance(s).",
        id,
        located.protein.len(),
        located.ligands.len()
    );

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let report = workflows::analyze::run(
        id,
        &located.protein,
        &located.ligands,
        config,
        &reporter,
    )?;
    info!(
        "{}: {} of {} ligand(s) bound.",
        id, report.bound_count, report.pocket_count
    );
    Ok(report)
}

/// Picks the reader from the file extension; anything other than
/// `.pdb`/`.ent` is read as mmCIF.
fn read_structure(path: &Path) -> Result<AtomSet> {
    let is_pdb = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdb") || ext.eq_ignore_ascii_case("ent"));

    if is_pdb {
        PdbFile::read_from_path(path).map_err(|e| CliError::structure(path, e))
    } else {
        CifFile::read_from_path(path).map_err(|e| CliError::structure(path, e))
    }
}

fn protein_id_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| "STRUCTURE".to_string(), str::to_ascii_uppercase)
}
