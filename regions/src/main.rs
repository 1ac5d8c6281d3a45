//! regions2json CLI - convert voivodeship settlement listings to JSON
//!
//! ```bash
//! regions2json                              # dane.csv -> out.json
//! regions2json convert input.csv -o out.json --pretty
//! regions2json convert input.csv --stdout --encoding auto
//! regions2json summary input.csv            # per-region counts, writes nothing
//! regions2json validate out.json            # check a document against the schema
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see every region header.

use clap::{Args, Parser, Subcommand};
use regions::{
    check_document, convert_file, read_json, render, summarize, validate_document,
    write_document, ConvertError, ConvertOptions, EncodingChoice, RegionsDocument,
    DEFAULT_DELIMITER,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "regions2json")]
#[command(about = "Convert region/settlement CSV listings to nested JSON", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Used when no subcommand is given
    #[command(flatten)]
    convert: ConvertArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV file to a JSON document (default)
    Convert(ConvertArgs),

    /// Print settlement counts per region without writing anything
    Summary(InputArgs),

    /// Validate a JSON document against the embedded schema
    Validate {
        /// JSON document to check
        #[arg(default_value = "out.json")]
        document: PathBuf,
    },
}

#[derive(Args, Clone)]
struct InputArgs {
    /// Input CSV file
    #[arg(default_value = "dane.csv", env = "REGIONS_INPUT")]
    input: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    /// Input encoding: utf-8, auto, or a label such as windows-1250
    #[arg(short, long, default_value = "utf-8", env = "REGIONS_ENCODING")]
    encoding: EncodingChoice,
}

#[derive(Args, Clone)]
struct ConvertArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON file
    #[arg(short, long, default_value = "out.json", env = "REGIONS_OUTPUT")]
    output: PathBuf,

    /// Print the document to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,

    /// Indent the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Skip schema validation of the document before writing
    #[arg(long)]
    no_validate: bool,
}

impl InputArgs {
    fn options(&self, pretty: bool) -> ConvertOptions {
        ConvertOptions {
            delimiter: self.delimiter,
            encoding: self.encoding.clone(),
            pretty,
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert(args)) => cmd_convert(&args),
        Some(Commands::Summary(args)) => cmd_summary(&args),
        Some(Commands::Validate { document }) => cmd_validate(&document),
        None => cmd_convert(&cli.convert),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(args: &ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.input.options(args.pretty);
    let result = convert_file(&args.input.input, &options)?;

    if !args.no_validate {
        check_document(&result.document)?;
    }

    if args.stdout {
        println!("{}", render(&result.document, options.pretty)?);
    } else {
        write_document(&result.document, &args.output, options.pretty)?;
    }

    tracing::info!(
        regions = result.document.len(),
        settlements = result.document.settlement_count(),
        reopened = result.stats.reopened_regions,
        "conversion done"
    );
    Ok(())
}

fn cmd_summary(args: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = convert_file(&args.input, &args.options(false))?;

    let rows = summarize(&result.document);
    let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    for row in &rows {
        println!("{:<width$}  {:>6}", row.name, row.settlements, width = width);
    }
    println!(
        "{} regions, {} settlements",
        result.document.len(),
        result.document.settlement_count()
    );
    Ok(())
}

fn cmd_validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(document = %path.display(), "validating");
    let value = read_json(path)?;

    if let Err(errors) = validate_document(&value) {
        for err in errors.iter().take(10) {
            eprintln!("   - {}", err);
        }
        return Err(ConvertError::InvalidDocument(errors).into());
    }

    let document: RegionsDocument = serde_json::from_value(value)?;
    println!(
        "{}: valid ({} regions, {} settlements)",
        path.display(),
        document.len(),
        document.settlement_count()
    );
    Ok(())
}
