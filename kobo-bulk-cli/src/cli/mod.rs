//! Command-line interface and pipeline driver.
//!
//! The pipeline is one linear pass: load config, read all workbooks,
//! join, then encode and upload each record in parent-file order. All
//! file reads happen before the first network call, so a bad path fails
//! the run while nothing has been submitted yet.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use crate::api::KoboClient;
use crate::config::Config;
use crate::excel::{Table, read_table};
use crate::join::join_records;
use crate::report;
use crate::submission::encode_submission;

#[derive(Debug, Parser)]
#[command(
    name = "kobo-bulk",
    version,
    about = "Upload Excel rows to KoBoToolbox as XML submissions"
)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Encode submissions and print them instead of uploading
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the whole pipeline to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;

    let parent = read_table(&config.parent_data_path, "parent")?;
    info!(
        "loaded {} parent rows from {}",
        parent.len(),
        config.parent_data_path.display()
    );

    let mut children: Vec<Table> = Vec::new();
    for source in &config.child_data_paths {
        // A missing child file downgrades to a warning; the parents it
        // would have fed still go out, just without those members
        if !source.path.is_file() {
            warn!("{} does not exist!", source.name);
            continue;
        }
        let table = read_table(&source.path, &source.name)?;
        info!("loaded {} child rows from {}", table.len(), source.name);
        children.push(table);
    }

    let joined = join_records(
        &parent,
        &children,
        &config.parent_id_column,
        &config.child_id_column,
    )?;

    if cli.dry_run {
        for record in &joined {
            println!("{}", encode_submission(record, &config.project_uuid, &config.form)?);
        }
        return Ok(());
    }

    let client = KoboClient::new(config.submission_endpoint(), &config.api_token);
    let total = joined.len();
    for (i, record) in joined.iter().enumerate() {
        let xml = encode_submission(record, &config.project_uuid, &config.form)?;
        match client.submit(xml).await {
            Ok(outcome) => report::outcome(i + 1, total, &outcome),
            Err(error) => report::failure(i + 1, total, &error),
        }
    }

    Ok(())
}
