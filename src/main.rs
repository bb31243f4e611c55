// ABOUTME: Main entry point for the deckgen program.
// ABOUTME: Provides CLI interface for generating PPTX files from slide-record JSON.

use clap::{Args, Parser, Subcommand};
use deckgen::theme::ThemePreset;
use deckgen::{Config, DocumentAssembler};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PPTX presentation from a JSON file of slide records
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Path to the slide-records JSON file (an array of records)
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the output PPTX file
    #[arg(short, long, default_value = deckgen::DEFAULT_DOWNLOAD_NAME)]
    output: PathBuf,

    /// Document title written into the package metadata
    #[arg(long)]
    title: Option<String>,

    /// Theme preset: 'elegant' or 'flat'
    #[arg(long)]
    theme: Option<String>,

    /// Per-image fetch timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Generate(args)) => {
            println!("Executing generate command...");
            run_generate(args)
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_generate(args: &GenerateArgs) -> deckgen::Result<()> {
    let mut config = Config::from_env();
    if let Some(timeout_ms) = args.timeout_ms {
        config.fetch_timeout_ms = timeout_ms;
    }

    let theme = match &args.theme {
        Some(name) => Some(
            name.parse::<ThemePreset>()
                .map_err(deckgen::DeckError::ConfigError)?,
        ),
        None => None,
    };

    deckgen::utils::validate_file_exists(&args.input)?;
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            deckgen::utils::validate_directory_writable(parent)?;
        }
    }
    let json = fs::read_to_string(&args.input)?;
    let records = deckgen::parse_records(&json)?;

    let options = config.get_assembler_options(args.title.clone(), theme);
    let resolver = config.build_image_resolver()?;
    let assembler = DocumentAssembler::new(options, resolver);
    assembler.assemble_to_file(&records, &args.output)?;

    println!("PPTX generated successfully: {:?}", args.output);
    Ok(())
}
