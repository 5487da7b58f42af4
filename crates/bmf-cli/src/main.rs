use bmf_core::{Filters, Format};
use clap::{ArgAction, Parser, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bmf",
    about = "Narrow a release build matrix (YAML on stdin) to one target platform",
    version
)]
struct Cli {
    /// goos filter for builds (empty = no filter)
    #[arg(long, default_value = "")]
    goos: String,
    /// goarch filter for builds (empty = no filter)
    #[arg(long, default_value = "")]
    goarch: String,
    /// Read the document from this file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,
    /// Log more to stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Json => Format::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let filters = Filters::new(cli.goos, cli.goarch);
    debug!(?filters, "starting");

    let format = Format::from(cli.format);
    let res = run(&filters, cli.input.as_deref(), cli.out.as_deref(), format);
    match res {
        Ok(report) => info!(
            builds_kept = report.builds_kept,
            builds_dropped = report.builds_dropped,
            archives_kept = report.archives_kept,
            archives_dropped = report.archives_dropped,
            "filtered build matrix"
        ),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(if e.is_input() { 2 } else { 4 });
        }
    }
}

fn run(
    filters: &Filters,
    input: Option<&Path>,
    out: Option<&Path>,
    format: Format,
) -> bmf_core::Result<bmf_core::FilterReport> {
    let mut root = match input {
        Some(p) => bmf_core::read_document_file(p)?,
        None => bmf_core::decode(io::stdin().lock())?,
    };
    let report = bmf_core::apply(filters, &mut root);
    match out {
        Some(p) => bmf_core::write_document_file(p, &root, format)?,
        None => bmf_core::encode(io::stdout().lock(), &root, format)?,
    }
    Ok(report)
}

// Logs go to stderr; stdout carries only the document.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
