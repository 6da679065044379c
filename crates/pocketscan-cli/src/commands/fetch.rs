use crate::cli::FetchArgs;
use crate::data::DataManager;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::info;

pub async fn run(args: FetchArgs) -> Result<()> {
    let manager = DataManager::new(args.data_dir)?;
    info!("Caching {} entries under {:?}", args.ids.len(), manager.data_path());

    let client = reqwest::Client::new();
    let progress = CliProgressHandler::new();

    for id in &args.ids {
        progress.start_phase(format!("Fetching {}...", id.to_ascii_uppercase()));
        let entry = manager
            .fetch(&client, id, args.force)
            .await
            .inspect_err(|_| progress.finish())?;
        progress.finish();
        println!("✓ {}: {}", entry.id, entry.structure.display());
        println!("  {}", entry.ligands.display());
    }

    Ok(())
}
