// ABOUTME: Main entry point for the postgen CLI application
// ABOUTME: Wires configuration, prompt catalog, API clients, and command dispatch

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use secrecy::SecretString;
use std::env;
use std::path::PathBuf;

use postgen_cli::catalog::{DEFAULT_FORMAT, PromptCatalog, Tone};
use postgen_cli::cli::{Cli, Commands};
use postgen_cli::config::Config;
use postgen_cli::output::{JsonFormatter, OutputFormat, TableFormatter};
use postgen_cli::pipeline::{self, GenerateRequest, Pipeline};
use postgen_cli::progress::CliOutput;
use postgen_cli::renderer;
use postgen_sdk::{BlogSearchClient, ChatClient, SearchParams, SearchSort};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Determine if color should be used
    let use_color = !cli.no_color
        && env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb";
    let out = CliOutput::with_color(use_color);

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    let catalog = match config.catalog_path.as_deref() {
        Some(path) => PromptCatalog::load_from_file(path)?,
        None => PromptCatalog::builtin(),
    };

    match cli.command {
        Commands::Generate {
            topic,
            tone,
            format,
            languages,
            images,
            example,
            example_file,
            output_dir,
            dry_run,
        } => {
            let api_key = require_env(
                "OPENAI_API_KEY",
                "Please set your OpenAI API key:\nexport OPENAI_API_KEY=sk-xxxxx\n\nGet your API key from: https://platform.openai.com/api-keys",
            );
            let (client_id, client_secret) = require_search_credentials();

            let chat_config = config.chat.clone().unwrap_or_default();
            let chat = ChatClient::builder()
                .api_key(SecretString::from(api_key))
                .verbose(cli.verbose)
                .base_url(chat_config.api_url.clone())
                .model(chat_config.model.clone())
                .temperature(chat_config.temperature)
                .max_tokens(chat_config.max_tokens)
                .build()?;

            let search_config = config.search.clone().unwrap_or_default();
            let search = BlogSearchClient::builder()
                .client_id(client_id)
                .client_secret(SecretString::from(client_secret))
                .verbose(cli.verbose)
                .base_url(search_config.api_url.clone())
                .build()?;

            let example_text = match (example, example_file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => Some(std::fs::read_to_string(&path).with_context(
                    || format!("Failed to read example text file: {}", path.display()),
                )?),
                (None, None) => None,
            };

            let tone = Tone::from_choice(
                tone.as_deref()
                    .or(config.default_tone.as_deref())
                    .unwrap_or("casual"),
            );
            let format_key = format
                .or_else(|| config.default_format.clone())
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string());
            let languages = if languages.is_empty() {
                config
                    .languages
                    .clone()
                    .unwrap_or_else(|| vec!["한국어".to_string()])
            } else {
                languages
            };

            let request = GenerateRequest {
                topic,
                tone,
                format_key,
                languages,
                example_text,
                images,
            };

            let outcome = Pipeline::new(&chat, &search, &catalog, &out)
                .run(&request)
                .await?;

            if dry_run {
                for post in &outcome.posts {
                    println!("=== {} ===", post.language);
                    println!("{}", post.text);
                    println!();
                }
            } else {
                let dir = output_dir
                    .or_else(|| config.output_dir.clone().map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from("."));
                pipeline::write_docx_outputs(&outcome, &dir, &out)?;
            }
        }
        Commands::Render {
            input,
            images,
            output,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read post text file: {}", input.display()))?;
            let (pool, _names) = pipeline::load_image_pool(&images, &out)?;

            let document = renderer::render(&text, &pool);
            let path = output.unwrap_or_else(|| input.with_extension("docx"));
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            document
                .write_docx(file)
                .with_context(|| format!("Failed to serialize document: {}", path.display()))?;
            out.success(&format!("Wrote {}", path.display()));
        }
        Commands::Search {
            keyword,
            display,
            sort,
            json,
            pretty,
        } => {
            let (client_id, client_secret) = require_search_credentials();

            let search_config = config.search.clone().unwrap_or_default();
            let client = BlogSearchClient::builder()
                .client_id(client_id)
                .client_secret(SecretString::from(client_secret))
                .verbose(cli.verbose)
                .base_url(search_config.api_url.clone())
                .build()?;

            let sort = sort
                .or(search_config.sort)
                .as_deref()
                .unwrap_or("sim")
                .parse::<SearchSort>()?;
            let params = SearchParams {
                display,
                sort,
                ..Default::default()
            };

            let response = client.search(&keyword, &params).await?;
            if response.items.is_empty() && !json {
                println!("No results found.");
            } else {
                let output = if json {
                    JsonFormatter::new(pretty).format_results(&response.items)?
                } else {
                    TableFormatter::new(use_color).format_results(&response.items)?
                };
                println!("{}", output);
            }
        }
        Commands::Formats { json, pretty } => {
            let output = if json {
                JsonFormatter::new(pretty).format_formats(catalog.formats())?
            } else {
                TableFormatter::new(use_color).format_formats(catalog.formats())?
            };
            println!("{}", output);
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "postgen", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn require_env(name: &str, hint: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            eprintln!("Error: No {} environment variable found", name);
            eprintln!();
            eprintln!("{}", hint);
            std::process::exit(1);
        }
    }
}

fn require_search_credentials() -> (String, String) {
    let hint = "Please set your blog-search credentials:\nexport NAVER_CLIENT_ID=xxxxx\nexport NAVER_CLIENT_SECRET=xxxxx\n\nRegister an application at: https://developers.naver.com/apps";
    let client_id = require_env("NAVER_CLIENT_ID", hint);
    let client_secret = require_env("NAVER_CLIENT_SECRET", hint);
    (client_id, client_secret)
}
