//! survey-import CLI - parse survey files and preview the import result

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use survey_import::{ImportResult, ImportStatus, SourceFormat, decode_upload, parse_str};

/// Bulk survey-question import preview.
///
/// Parses JSON/CSV/TSV files into validated question records and reports
/// what would be imported: accepted questions, column mappings, invalid
/// rows, and warnings.
#[derive(Parser, Debug)]
#[command(name = "survey-import")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s) to parse
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Declared file format (default: inferred from the extension)
    #[arg(short = 'f', long)]
    format: Option<FileFormat>,

    /// Output format: text (default) or json
    #[arg(short = 'o', long, default_value = "text")]
    output: OutputFormat,

    /// Preview service URL; falls back to local parsing on any failure
    #[cfg(feature = "http")]
    #[arg(long)]
    remote_url: Option<String>,

    /// List every parsed question and rejected row
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum FileFormat {
    Json,
    Csv,
    Tsv,
}

impl From<FileFormat> for SourceFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Json => SourceFormat::Json,
            FileFormat::Csv => SourceFormat::Csv,
            FileFormat::Tsv => SourceFormat::Tsv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut exit_code = ExitCode::SUCCESS;

    for file in &args.files {
        match import_file(file, &args) {
            Ok(ImportStatus::Previewable) => {}
            Ok(ImportStatus::Fatal) => exit_code = ExitCode::FAILURE,
            Err(e) => {
                eprintln!("Error processing {}: {}", file.display(), e);
                exit_code = ExitCode::FAILURE;
            }
        }
    }

    exit_code
}

fn import_file(path: &PathBuf, args: &Args) -> Result<ImportStatus, Box<dyn std::error::Error>> {
    let format: SourceFormat = match args.format {
        Some(format) => format.into(),
        None => path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(SourceFormat::from_extension)
            .ok_or_else(|| {
                format!(
                    "cannot infer format of {}; pass --format",
                    path.display()
                )
            })?,
    };

    let data = std::fs::read(path)?;
    let (text, encoding) = decode_upload(&data);
    if encoding.was_transcoded() {
        log::info!("{}: transcoded to UTF-8", path.display());
    }

    #[cfg(feature = "http")]
    let result = match &args.remote_url {
        Some(url) => {
            use survey_import::{Producer, parse_with_fallback};
            let (result, producer) = parse_with_fallback(url, &text, format);
            log::info!(
                "{}",
                match producer {
                    Producer::Server => "validated by server",
                    Producer::Local => "parsed locally",
                }
            );
            result
        }
        None => parse_str(&text, format),
    };
    #[cfg(not(feature = "http"))]
    let result = parse_str(&text, format);

    match args.output {
        OutputFormat::Text => print_text_output(path, &result, args.verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(result.status())
}

fn print_text_output(path: &PathBuf, result: &ImportResult, verbose: bool) {
    println!("File: {}", path.display());
    println!(
        "  Status: {}",
        match result.status() {
            ImportStatus::Previewable => "previewable",
            ImportStatus::Fatal => "fatal",
        }
    );

    for error in &result.errors {
        println!("  Error: {error}");
    }
    if let Some(title) = &result.title {
        println!("  Title: {title}");
    }
    if let Some(description) = &result.description {
        println!("  Description: {description}");
    }

    println!("  Questions: {}", result.questions.len());
    println!("  Invalid rows: {}", result.invalid_rows.len());

    if !result.column_mappings.is_empty() {
        println!("  Columns:");
        for mapping in &result.column_mappings {
            match mapping.target_field {
                Some(field) => println!(
                    "    {}: \"{}\" -> {} ({})",
                    mapping.header_index, mapping.header_text, field, mapping.confidence
                ),
                None => println!(
                    "    {}: \"{}\" -> (unmapped)",
                    mapping.header_index, mapping.header_text
                ),
            }
        }
    }

    for warning in &result.warnings {
        println!("  Warning: {warning}");
    }

    if verbose {
        for question in &result.questions {
            let required = if question.required { " (required)" } else { "" };
            println!(
                "    {}: [{}] {}{}",
                question.id, question.question_type, question.text, required
            );
            if !question.options.is_empty() {
                println!("      options: {}", question.options.join(" | "));
            }
        }
        for row in &result.invalid_rows {
            println!("    row {}: {}", row.row_index, row.reason);
        }
    }

    println!();
}
