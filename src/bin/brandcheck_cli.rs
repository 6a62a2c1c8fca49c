//! BrandCheck CLI - JSON bridge interface
//!
//! Commands: rules, analyze
//! Outputs JSON to stdout
//! Returns non-zero when any check fails

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use brandcheck_core::{AnalysisPipeline, AnalyzeRequest, AssetInput, RuleSet};

#[derive(Parser)]
#[command(name = "brandcheck-cli")]
#[command(about = "BrandCheck CLI - Brand Compliance Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the brand rules document
    #[arg(short, long, default_value = "brand-rules.json")]
    rules: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the loaded, validated rule set
    Rules,

    /// Analyze an asset against the rules
    Analyze {
        /// Path to the asset file
        #[arg(short, long, conflicts_with = "payload")]
        file: Option<PathBuf>,

        /// JSON payload (AnalyzeRequest) with base64-encoded bytes
        #[arg(short, long)]
        payload: Option<String>,

        /// Declared asset type (icon | illustration | pdf)
        #[arg(short = 't', long)]
        asset_type: Option<String>,

        /// Declared content type
        #[arg(short, long)]
        content_type: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let rules = match RuleSet::load_from_file(&cli.rules) {
        Ok(r) => r,
        Err(e) => {
            eprintln!(r#"{{"error": "Failed to load rules: {}"}}"#, e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = match AnalysisPipeline::new(rules) {
        Ok(p) => p,
        Err(e) => {
            eprintln!(r#"{{"error": "{}"}}"#, e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Rules => {
            println!("{}", serde_json::to_string_pretty(pipeline.rules()).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Analyze {
            file,
            payload,
            asset_type,
            content_type,
        } => {
            let input = match build_input(file, payload, asset_type, content_type) {
                Ok(i) => i,
                Err(message) => {
                    println!(r#"{{"error": "{}"}}"#, message);
                    return ExitCode::FAILURE;
                }
            };

            // Transport contract: the core never sees empty payloads.
            if input.bytes.is_empty() {
                println!(r#"{{"error": "No file content supplied"}}"#);
                return ExitCode::FAILURE;
            }

            match pipeline.analyze(&input) {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report).unwrap());
                    if report.all_passed() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(2) // One or more checks failed
                    }
                }
                Err(e) => {
                    println!(r#"{{"error": "{}"}}"#, e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn build_input(
    file: Option<PathBuf>,
    payload: Option<String>,
    asset_type: Option<String>,
    content_type: Option<String>,
) -> Result<AssetInput, String> {
    match (file, payload) {
        (Some(path), None) => {
            let bytes = std::fs::read(&path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let mut input = AssetInput::new(bytes, filename);
            input.asset_type = asset_type;
            input.content_type = content_type;
            Ok(input)
        }
        (None, Some(json)) => {
            let request = AnalyzeRequest::from_json(&json).map_err(|e| e.to_string())?;
            let mut input = request.into_input().map_err(|e| e.to_string())?;
            // Flags win over payload fields when both are present.
            if asset_type.is_some() {
                input.asset_type = asset_type;
            }
            if content_type.is_some() {
                input.content_type = content_type;
            }
            Ok(input)
        }
        _ => Err("Provide exactly one of --file or --payload".to_string()),
    }
}
