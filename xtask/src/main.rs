// ABOUTME: xtask binary for build automation and dev utilities
// ABOUTME: Provides commands to probe the blog-search API and validate prompt catalogs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for postgen")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live query against the blog-search API and pretty-print the response
    ProbeSearch {
        /// Search keyword
        #[arg(default_value = "제주도 여행")]
        keyword: String,

        /// Number of results to fetch
        #[arg(long, default_value = "1")]
        display: u32,
    },
    /// Validate the shape of a prompt catalog JSON file
    CheckCatalog {
        /// Path to the catalog file
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ProbeSearch { keyword, display } => {
            println!("Querying blog search for '{}'...", keyword);
            probe_search(&keyword, display)?;
        }
        Commands::CheckCatalog { path } => {
            check_catalog(&path)?;
            println!("Catalog OK: {}", path.display());
        }
    }

    Ok(())
}

fn probe_search(keyword: &str, display: u32) -> Result<()> {
    let client_id = std::env::var("NAVER_CLIENT_ID")
        .context("NAVER_CLIENT_ID environment variable must be set")?;
    let client_secret = std::env::var("NAVER_CLIENT_SECRET")
        .context("NAVER_CLIENT_SECRET environment variable must be set")?;

    let display = display.to_string();
    let client = reqwest::blocking::Client::new();
    let response = client
        .get("https://openapi.naver.com/v1/search/blog")
        .header("X-Naver-Client-Id", client_id)
        .header("X-Naver-Client-Secret", client_secret)
        .query(&[
            ("query", keyword),
            ("display", display.as_str()),
            ("start", "1"),
            ("sort", "sim"),
        ])
        .send()
        .context("Blog-search request failed")?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .context("Blog-search response was not JSON")?;

    if !status.is_success() {
        anyhow::bail!("Blog-search API returned {}: {}", status, body);
    }

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn check_catalog(path: &PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).context("Catalog is not valid JSON")?;

    let object = value
        .as_object()
        .context("Catalog root must be a JSON object")?;

    for key in ["first_sys_prompt", "second_sys_prompt"] {
        if let Some(entry) = object.get(key) {
            entry
                .get("content")
                .and_then(|content| content.as_str())
                .with_context(|| format!("{} must carry a string 'content' field", key))?;
        }
    }

    if let Some(formats) = object.get("formats") {
        let map = formats
            .as_object()
            .context("'formats' must be a JSON object")?;
        for (name, description) in map {
            if !description.is_string() {
                anyhow::bail!("format '{}' must map to a string description", name);
            }
        }
        println!("{} format(s) defined", map.len());
    }

    Ok(())
}
