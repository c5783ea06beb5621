use std::fs::File;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser as ClapParser;
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

use rfc_http_validate::{
    ConfigError, ConsoleReporter, FieldTypeRegistry, Recorder, RegistryBuilder, Reporter, Session,
    extract_file, format_json,
};

/// Check the HTTP message examples in RFC source documents.
///
/// Finds `http-message` sections in xml2rfc (.xml) and Markdown (.md)
/// documents, checks their start lines and field syntax, and parses the
/// values of known Structured Fields.
#[derive(ClapParser)]
#[command(name = "rfc-http-validate", version, about, long_about = None)]
struct Cli {
    /// Documents to validate (.xml or .md).
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// JSON file that maps field names to structured types
    /// ("item", "list" or "dict").
    #[arg(short, long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Field name to consider as a Structured Item.
    #[arg(short, long = "item", value_name = "FIELD")]
    item: Vec<String>,

    /// Field name to consider as a Structured List.
    #[arg(short, long = "list", value_name = "FIELD")]
    list: Vec<String>,

    /// Field name to consider as a Structured Dictionary.
    #[arg(short, long = "dict", value_name = "FIELD")]
    dict: Vec<String>,

    /// Only output errors.
    #[arg(short, long)]
    quiet: bool,

    /// Output format.
    #[arg(short, long, default_value = "human", value_enum)]
    format: OutputFormat,

    /// When to colour human output.
    #[arg(long, default_value = "auto", value_enum)]
    color: ColorMode,

    /// Log more detail to stderr (repeat for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// One line per event
    Human,
    /// A single JSON document with every event
    Json,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = match cli.color {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    };

    let outcome = match cli.format {
        OutputFormat::Human => {
            let mut reporter = ConsoleReporter::stdio(color, cli.quiet);
            finish(run(&cli, &mut reporter), &mut reporter)
        }
        OutputFormat::Json => {
            let mut recorder = Recorder::new();
            let outcome = finish(run(&cli, &mut recorder), &mut recorder);
            let errors = outcome.unwrap_or_else(|fatal_errors| fatal_errors);
            println!("{}", format_json(&recorder, errors, true));
            outcome
        }
    };

    match outcome {
        Ok(0) => {}
        _ => process::exit(1),
    }
}

/// Build the registry and validate every file.
///
/// Returns the error total, or the message of the fatal condition that
/// stopped the run together with the errors counted before it.
fn run(cli: &Cli, reporter: &mut dyn Reporter) -> Result<usize, (String, usize)> {
    let registry = load_registry(cli).map_err(|e| (e.to_string(), 0))?;
    tracing::debug!(fields = registry.len(), "field type registry ready");

    let mut session = Session::new(&registry, reporter);
    for path in &cli.files {
        extract_file(path, &mut session).map_err(|e| (e.to_string(), session.error_count()))?;
    }
    Ok(session.error_count())
}

/// Report a fatal condition; `Err` carries the errors counted before it.
fn finish(
    outcome: Result<usize, (String, usize)>,
    reporter: &mut dyn Reporter,
) -> Result<usize, usize> {
    outcome.map_err(|(message, errors)| {
        reporter.fatal_error(&message);
        errors
    })
}

/// Baseline table, then the JSON map, then single-field overrides.
fn load_registry(cli: &Cli) -> Result<FieldTypeRegistry, ConfigError> {
    let mut builder = RegistryBuilder::new();
    if let Some(path) = &cli.map {
        builder = builder.load_json(open(path)?)?;
    }
    for name in &cli.item {
        builder = builder.item(name);
    }
    for name in &cli.list {
        builder = builder.list(name);
    }
    for name in &cli.dict {
        builder = builder.dictionary(name);
    }
    Ok(builder.build())
}

fn open(path: &Path) -> Result<std::io::BufReader<File>, ConfigError> {
    Ok(std::io::BufReader::new(File::open(path)?))
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
