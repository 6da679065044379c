use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "PocketScan CLI - Detects ligand binding pockets in protein structures and computes their descriptors.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the binding pocket of every ligand in one or more structures and report its descriptors.
    Analyze(AnalyzeArgs),
    /// Download structures and ligand metadata into the local cache without analyzing them.
    Fetch(FetchArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    // --- Input ---
    /// PDB identifiers to analyze (e.g., 1A28). Files are downloaded on first use.
    #[arg(value_name = "PDB_ID", required_unless_present = "structure")]
    pub ids: Vec<String>,

    /// Analyze a local structure file (mmCIF or PDB) instead of a PDB entry.
    #[arg(long, value_name = "PATH", conflicts_with = "ids", requires = "ligands")]
    pub structure: Option<PathBuf>,

    /// Ligand metadata document (RCSB GraphQL JSON) for the local structure.
    #[arg(long, value_name = "PATH", requires = "structure")]
    pub ligands: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Analysis Overrides ---
    /// Override the pocket search radius in Angstroms.
    #[arg(short, long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Override the solvent probe radius used for SASA, in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub probe_radius: Option<f64>,

    /// Override the number of sample points per atom used for SASA.
    #[arg(long, value_name = "INT")]
    pub sphere_points: Option<usize>,

    /// Weight the radius of gyration by atomic mass.
    #[arg(long)]
    pub mass_weighted: bool,

    /// Infer covalent bonds for each pocket and report their count.
    #[arg(long)]
    pub infer_bonds: bool,

    // --- Output ---
    /// Report format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write the report to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Cache ---
    /// Directory used to cache downloaded files.
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Download files again even if they are already cached.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `fetch` subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// PDB identifiers to download.
    #[arg(value_name = "PDB_ID", required = true)]
    pub ids: Vec<String>,

    /// Directory used to cache downloaded files.
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Download files again even if they are already cached.
    #[arg(long)]
    pub force: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}
