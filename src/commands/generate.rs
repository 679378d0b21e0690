use std::path::{Path, PathBuf};

use anyhow::Result;
use codolio_core::pipeline::{self, OutputFile};
use codolio_core::{CodolioConfig, ContestRecord, OutputMode, feed};
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};
use crate::utils::tui::create_spinner;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub mode: Option<OutputMode>,
    pub output_dir: Option<PathBuf>,
    pub platforms: Vec<String>,
    pub endpoint: Option<String>,
}

impl Overrides {
    pub fn apply(self, config: &mut CodolioConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if !self.platforms.is_empty() {
            config.platforms = self.platforms;
        }
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
    }
}

#[derive(Debug, Default)]
pub struct RunOptions {
    /// Saved feed to read instead of fetching.
    pub input: Option<PathBuf>,
    pub dry_run: bool,
}

pub async fn run(config_path: Option<&Path>, overrides: Overrides, options: RunOptions) -> Result<()> {
    let mut config = CodolioConfig::load(config_path)?;
    overrides.apply(&mut config);
    config.validate()?;

    let client = reqwest::Client::new();
    let files = generate(&client, &config, &options).await?;

    for file in &files {
        println!("{}", file.render());
    }

    let total: usize = files.iter().map(|f| f.event_count).sum();
    let summary = format!(
        "{} {}, {} {}",
        files.len(),
        pluralize("calendar", files.len()),
        total,
        pluralize("event", total)
    );

    if options.dry_run {
        println!("\nDry run: {} built, nothing written", summary);
    } else {
        println!(
            "\n{} {} to {}",
            "Wrote".green(),
            summary,
            config.output_path().display()
        );
    }

    Ok(())
}

/// Load the feed, build every calendar and write them unless this is a dry
/// run. Nothing is written when loading the feed fails.
pub async fn generate(
    client: &reqwest::Client,
    config: &CodolioConfig,
    options: &RunOptions,
) -> Result<Vec<OutputFile>> {
    let records = load_records(client, config, options).await?;
    let files = pipeline::plan(config, &records)?;

    if !options.dry_run {
        pipeline::write_outputs(&config.output_path(), &files)?;
    }

    Ok(files)
}

async fn load_records(
    client: &reqwest::Client,
    config: &CodolioConfig,
    options: &RunOptions,
) -> Result<Vec<ContestRecord>> {
    if let Some(path) = &options.input {
        return Ok(feed::read_contests(path)?);
    }

    let spinner = create_spinner("Fetching contests");
    let result = feed::fetch_contests(client, &config.endpoint).await;
    spinner.finish_and_clear();

    Ok(result?)
}
