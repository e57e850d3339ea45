use anyhow::{anyhow, Result};
use clap::{Arg, Command};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

use vimeo_transcript::{BatchExtractor, Config, TranscriptExtractor};

/// Input record accepted via `--input`: a single URL or a list, mutually
/// exclusive.
#[derive(Debug, Deserialize)]
struct InputRecord {
    video_url: Option<String>,
    video_urls: Option<Vec<String>>,
}

impl InputRecord {
    fn into_urls(self) -> Result<Vec<String>> {
        match (self.video_url, self.video_urls) {
            (Some(url), None) => Ok(vec![url]),
            (None, Some(urls)) if !urls.is_empty() => Ok(urls),
            (None, Some(_)) => Err(anyhow!("Input record has an empty video_urls list")),
            (Some(_), Some(_)) => Err(anyhow!(
                "Input record sets both video_url and video_urls; they are mutually exclusive"
            )),
            (None, None) => Err(anyhow!("Input record sets neither video_url nor video_urls")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("vimeo_transcript=info,warn")
        .init();

    let matches = Command::new("Vimeo Transcript Extractor")
        .version("0.1.0")
        .author("TigreRoll")
        .about("Discovers and extracts caption tracks from Vimeo videos")
        .arg(
            Arg::new("urls")
                .value_name("URL")
                .help("Vimeo video URLs to extract")
                .num_args(0..)
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("JSON input file with video_url or video_urls")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write result records to FILE instead of stdout")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
        )
        .arg(
            Arg::new("workers")
                .short('w')
                .long("workers")
                .value_name("NUM")
                .help("Maximum concurrent extractions")
        )
        .arg(
            Arg::new("no-browser")
                .long("no-browser")
                .help("Never use the browser automation strategy")
                .action(clap::ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
        )
        .get_matches();

    if matches.get_flag("verbose") {
        info!("Verbose logging enabled");
    }

    // Load configuration
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::load(PathBuf::from(path))?,
        None => Config::default(),
    };

    if let Some(workers) = matches.get_one::<String>("workers") {
        config.batch.max_concurrent = workers.parse()?;
    }
    if matches.get_flag("no-browser") {
        config.strategies.browser = false;
    }

    // Collect input URLs: positionals or --input file, not both
    let positional: Vec<String> = matches
        .get_many::<String>("urls")
        .map(|urls| urls.cloned().collect())
        .unwrap_or_default();

    let urls = match matches.get_one::<String>("input") {
        Some(path) if positional.is_empty() => {
            let content = tokio::fs::read_to_string(path).await?;
            let record: InputRecord = serde_json::from_str(&content)?;
            record.into_urls()?
        }
        Some(_) => return Err(anyhow!("Pass URLs either as arguments or via --input, not both")),
        None if !positional.is_empty() => positional,
        None => return Err(anyhow!("No video URLs provided")),
    };

    info!("🚀 Vimeo Transcript Extractor starting...");
    info!("📹 {} video URL(s) to process", urls.len());
    info!("🔧 Workers: {}", config.batch.max_concurrent);

    // No browser session is wired into the CLI build; the strategy only
    // runs when an embedding program supplies one.
    let extractor = TranscriptExtractor::new(&config, None);
    info!("🧭 Strategy chain: {}", extractor.strategy_names().join(" → "));
    let batch = BatchExtractor::new(extractor, &config);
    let records = batch.extract_all(&urls).await;

    let successful = records.iter().filter(|r| r.is_success()).count();
    if successful < records.len() {
        warn!("⚠️ {} of {} extractions failed", records.len() - successful, records.len());
    }

    let json_data = serde_json::to_string_pretty(&records)?;
    match matches.get_one::<String>("output") {
        Some(path) => {
            tokio::fs::write(path, &json_data).await?;
            info!("📝 Wrote {} records to {}", records.len(), path);
        }
        None => println!("{}", json_data),
    }

    Ok(())
}
