// ABOUTME: CLI argument definitions for the postgen application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postgen")]
#[command(about = "Generate blog posts from a topic, reference search, and images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Use a specific config file instead of the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a post end to end and export it as Word documents
    Generate {
        /// What the post should be about
        topic: String,

        /// Writing tone: formal, casual, humorous, informative (or 1-4)
        #[arg(long)]
        tone: Option<String>,

        /// Post format from the prompt catalog (e.g., naver_blog)
        #[arg(long)]
        format: Option<String>,

        /// Output language; repeat to add translation targets (first one is drafted)
        #[arg(long = "language", short = 'l', value_name = "LANGUAGE")]
        languages: Vec<String>,

        /// Image file to embed; repeatable
        #[arg(long = "image", short = 'i', value_name = "FILE")]
        images: Vec<PathBuf>,

        /// Example of the author's writing style
        #[arg(long, value_name = "TEXT", conflicts_with = "example_file")]
        example: Option<String>,

        /// Read the writing-style example from a text file
        #[arg(long, value_name = "FILE")]
        example_file: Option<PathBuf>,

        /// Directory for the generated .docx files
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Print the generated posts instead of writing .docx files
        #[arg(long)]
        dry_run: bool,
    },
    /// Render existing post text with image placeholders to a .docx file
    Render {
        /// Post text file (markdown-like, with image placeholders)
        input: PathBuf,

        /// Image file referenced by the post; repeatable
        #[arg(long = "image", short = 'i', value_name = "FILE")]
        images: Vec<PathBuf>,

        /// Output path (defaults to the input path with a .docx extension)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Search the blog API for reference material
    Search {
        /// Search keyword
        keyword: String,

        /// Number of results to fetch
        #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
        display: u32,

        /// Sort order: sim (relevance) or date
        #[arg(long)]
        sort: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// List the post formats available in the prompt catalog
    Formats {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_parses_repeatable_flags() {
        let cli = Cli::parse_from([
            "postgen",
            "generate",
            "맥북 비교 글",
            "--tone",
            "2",
            "-l",
            "한국어",
            "-l",
            "English",
            "-i",
            "cat.png",
            "-i",
            "dog.jpg",
        ]);

        match cli.command {
            Commands::Generate {
                topic,
                tone,
                languages,
                images,
                ..
            } => {
                assert_eq!(topic, "맥북 비교 글");
                assert_eq!(tone.as_deref(), Some("2"));
                assert_eq!(languages, vec!["한국어", "English"]);
                assert_eq!(images.len(), 2);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_search_display_range() {
        assert!(Cli::try_parse_from(["postgen", "search", "kw", "--display", "0"]).is_err());
        assert!(Cli::try_parse_from(["postgen", "search", "kw", "--display", "101"]).is_err());
        assert!(Cli::try_parse_from(["postgen", "search", "kw", "--display", "100"]).is_ok());
    }

    #[test]
    fn test_pretty_requires_json() {
        assert!(Cli::try_parse_from(["postgen", "search", "kw", "--pretty"]).is_err());
        assert!(Cli::try_parse_from(["postgen", "search", "kw", "--json", "--pretty"]).is_ok());
    }
}
