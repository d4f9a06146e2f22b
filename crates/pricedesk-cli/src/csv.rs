//! CSV import/export passthrough commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use pricedesk_client::ServerApiClient;

#[derive(Debug, Subcommand)]
pub enum CsvCommands {
    /// Upload a CSV file of price changes
    Upload { file: PathBuf },
    /// Download the current CSV export
    Download {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show the backend's CSV processing status
    Status,
}

pub(crate) async fn run_csv_upload(api: &ServerApiClient, file: &Path) -> anyhow::Result<()> {
    let contents = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map_or_else(|| "upload.csv".to_string(), |n| n.to_string_lossy().into_owned());

    let status = api.upload_csv(&file_name, contents).await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

pub(crate) async fn run_csv_download(
    api: &ServerApiClient,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let bytes = api.download_csv().await?;
    match output {
        Some(path) => {
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "csv export written");
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&bytes)?;
        }
    }
    Ok(())
}

pub(crate) async fn run_csv_status(api: &ServerApiClient) -> anyhow::Result<()> {
    let status = api.get_csv_status().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
