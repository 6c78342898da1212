use std::path::PathBuf;

use aamc_merge::config::{CycleSource, Manifest};
use aamc_merge::pipeline::{self, OutputFormat};
use aamc_merge::{Result, TableError};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| TableError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Merge(args) => execute_merge(args),
    }
}

fn execute_merge(args: MergeArgs) -> Result<()> {
    let mut manifest = match &args.manifest {
        Some(path) if !path.exists() => return Err(TableError::MissingInput(path.clone())),
        Some(path) => Manifest::load(path)?,
        None => Manifest::default(),
    };
    if let Some(dir) = args.a1_dir {
        manifest.a1 = Some(CycleSource::Directory { dir });
    }
    if let Some(dir) = args.b8_dir {
        manifest.b8 = Some(CycleSource::Directory { dir });
    }

    let written = pipeline::run(&manifest, &args.output, args.format.into())?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge yearly AAMC admissions tables into long-format files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the configured A-1, B-8 and A-10 spreadsheets.
    Merge(MergeArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// JSON manifest listing the input spreadsheets.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Directory of A-1 workbooks, one per year (overrides the manifest).
    #[arg(long)]
    a1_dir: Option<PathBuf>,

    /// Directory of B-8 workbooks, one per year (overrides the manifest).
    #[arg(long)]
    b8_dir: Option<PathBuf>,

    /// Directory the merged tables are written to.
    #[arg(long)]
    output: PathBuf,

    /// Output representation.
    #[arg(long, value_enum, default_value_t = FormatKind::Csv)]
    format: FormatKind,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatKind {
    Csv,
    Xlsx,
}

impl From<FormatKind> for OutputFormat {
    fn from(kind: FormatKind) -> Self {
        match kind {
            FormatKind::Csv => OutputFormat::Csv,
            FormatKind::Xlsx => OutputFormat::Xlsx,
        }
    }
}
