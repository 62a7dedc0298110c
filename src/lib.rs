//! Marginalia: annotation coordinate, persistence, and migration engine.
//!
//! Marginalia keeps annotations (highlights, pins, freeform drawings,
//! notes) correct across heterogeneous document types by converting
//! geometry between coordinate spaces, persisting a versioned polymorphic
//! container, migrating the legacy single-target schema, and burning
//! annotations permanently into PDF bytes for sharing.
//!
//! # Modules
//!
//! - [`model`]: annotation entities, targets, and typed geometry
//! - [`coords`]: pure transforms between the four coordinate spaces
//! - [`validation`]: structural validation and error reporting
//! - [`store`]: versioned JSON container codec and file-id derivation
//! - [`migrate`]: legacy version-1 to version-2 migration
//! - [`shapes`]: percentage-space freeform overlay persistence
//! - [`burn`]: burn-in export into PDF page content
//! - [`ai`]: location-tagged text export for language models
//! - [`error`]: error types for marginalia operations

pub mod ai;
pub mod burn;
pub mod coords;
pub mod error;
pub mod migrate;
pub mod model;
pub mod shapes;
pub mod store;
pub mod validation;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::MarginaliaError;

/// The marginalia CLI application.
#[derive(Parser)]
#[command(name = "marginalia")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate an annotation file for errors and warnings.
    Validate(ValidateArgs),

    /// Migrate a legacy (version 1) annotation file to the current schema.
    Migrate(MigrateArgs),

    /// Burn annotations permanently into a PDF's page content.
    Burn(BurnArgs),

    /// Export annotations as location-tagged text for AI consumption.
    Export(ExportArgs),

    /// Derive the deterministic storage key for a document path.
    FileId(FileIdArgs),
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Annotation file to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the migrate subcommand.
#[derive(clap::Args)]
struct MigrateArgs {
    /// Legacy annotation file to migrate.
    input: PathBuf,

    /// Where to write the migrated file (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Arguments for the burn subcommand.
#[derive(clap::Args)]
struct BurnArgs {
    /// Source PDF document.
    pdf: PathBuf,

    /// Annotation file (current schema) to burn in.
    annotations: PathBuf,

    /// Where to write the annotated PDF.
    #[arg(short, long)]
    output: PathBuf,
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// Annotation file to export.
    input: PathBuf,

    /// Only annotations on this 1-indexed PDF page.
    #[arg(long)]
    page: Option<u32>,

    /// Only annotations carrying a comment.
    #[arg(long)]
    with_comments: bool,
}

/// Arguments for the file-id subcommand.
#[derive(clap::Args)]
struct FileIdArgs {
    /// Document path to derive a storage key from.
    path: String,
}

/// Run the marginalia CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), MarginaliaError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Migrate(args)) => run_migrate(args),
        Some(Commands::Burn(args)) => run_burn(args),
        Some(Commands::Export(args)) => run_export(args),
        Some(Commands::FileId(args)) => run_file_id(args),
        None => {
            println!("marginalia {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Annotation coordinate, persistence, and migration engine.");
            println!();
            println!("Run 'marginalia --help' for usage information.");
            Ok(())
        }
    }
}

/// Loads and decodes an annotation file, failing on rejection.
fn load_annotation_file(path: &PathBuf) -> Result<model::AnnotationFile, MarginaliaError> {
    let outcome = store::io::read_annotation_file(path)?;
    match outcome.file {
        Some(file) => Ok(file),
        None => {
            for issue in &outcome.issues {
                eprintln!("  {}", issue);
            }
            Err(MarginaliaError::DecodeFailed(outcome.issues.len()))
        }
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), MarginaliaError> {
    let json = fs::read_to_string(&args.input)?;

    // Parse without the decode gate so structurally sound files with
    // validation errors still get a full report instead of a bare
    // rejection.
    let file: model::AnnotationFile = serde_json::from_str(&json)
        .map_err(|source| MarginaliaError::AnnotationJsonParse {
            path: args.input.clone(),
            source,
        })?;
    let report = validation::validate_file(&file);

    match args.output.as_str() {
        "json" => {
            // Simple JSON output for programmatic use
            println!("{{");
            println!("  \"error_count\": {},", report.error_count());
            println!("  \"warning_count\": {},", report.warning_count());
            println!("  \"issues\": [");
            for (i, issue) in report.issues.iter().enumerate() {
                let comma = if i < report.issues.len() - 1 { "," } else { "" };
                println!("    {{");
                println!("      \"severity\": \"{:?}\",", issue.severity);
                println!("      \"code\": \"{:?}\",", issue.code);
                println!(
                    "      \"message\": \"{}\",",
                    issue.message.replace('"', "\\\"")
                );
                println!("      \"context\": \"{}\"", issue.context);
                println!("    }}{}", comma);
            }
            println!("  ]");
            println!("}}");
        }
        "text" => {
            print!("{}", report);
        }
        other => return Err(MarginaliaError::UnsupportedFormat(other.to_string())),
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(MarginaliaError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the migrate subcommand.
fn run_migrate(args: MigrateArgs) -> Result<(), MarginaliaError> {
    let json = fs::read_to_string(&args.input)?;
    let migrated = migrate::try_migrate_legacy_json(&json).ok_or(MarginaliaError::NotLegacy)?;

    match args.output {
        Some(path) => {
            store::io::write_annotation_file(&path, &migrated)?;
            println!(
                "Migrated {} annotation(s) to {}",
                migrated.annotations.len(),
                path.display()
            );
        }
        None => println!("{}", store::encode_annotation_file(&migrated)?),
    }
    Ok(())
}

/// Execute the burn subcommand.
fn run_burn(args: BurnArgs) -> Result<(), MarginaliaError> {
    let pdf_bytes = fs::read(&args.pdf)?;
    let file = load_annotation_file(&args.annotations)?;

    let outcome = burn::burn_annotations(&pdf_bytes, &file.annotations)?;
    fs::write(&args.output, &outcome.bytes)?;
    print!("{}", outcome.report);
    Ok(())
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs) -> Result<(), MarginaliaError> {
    let file = load_annotation_file(&args.input)?;

    let items: Vec<model::AnnotationItem> = file
        .annotations
        .into_iter()
        .filter(|item| args.page.map_or(true, |p| ai::on_page(item, p)))
        .filter(|item| !args.with_comments || ai::has_comment(item))
        .collect();

    let text = ai::export_annotations(&items);
    if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}

/// Execute the file-id subcommand.
fn run_file_id(args: FileIdArgs) -> Result<(), MarginaliaError> {
    println!("{}", store::derive_file_id(&args.path)?);
    Ok(())
}
