//! grade - command line tools for the color grading engine.
//!
//! Inspect `.cube` LUTs, export adjustment records as portable LUTs, and
//! print the default adjustment record.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use grade_model::AdjustmentRecord;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "grade")]
#[command(author, version, about = "Color grading LUT tools")]
#[command(long_about = "
Tools around the grading engine's LUT codec.

Examples:
  grade lut-info look.cube                 # Show cube size and value range
  grade lut-export -o warm.cube -a warm.yaml --size 17
  grade defaults                           # Print the neutral record as YAML
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a .cube LUT file
    #[command(visible_alias = "i")]
    LutInfo(LutInfoArgs),

    /// Bake adjustments into a .cube LUT file
    #[command(visible_alias = "x")]
    LutExport(LutExportArgs),

    /// Print the default adjustment record as YAML
    Defaults,
}

#[derive(Args)]
struct LutInfoArgs {
    /// Path to the .cube file
    path: PathBuf,
}

#[derive(Args)]
struct LutExportArgs {
    /// Output .cube path
    #[arg(short, long)]
    output: PathBuf,

    /// Adjustments file (YAML); omit for a neutral identity LUT
    #[arg(short, long)]
    adjustments: Option<PathBuf>,

    /// Cube size (16 or 17)
    #[arg(short, long, default_value = "16")]
    size: usize,

    /// TITLE written into the header
    #[arg(short, long, default_value = "gradekit export")]
    title: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::LutInfo(args) => lut_info(&args),
        Commands::LutExport(args) => lut_export(&args),
        Commands::Defaults => defaults(),
    }
}

fn lut_info(args: &LutInfoArgs) -> Result<()> {
    let lut = grade_lut::cube::read_path(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for row in lut.rows() {
        for &v in row {
            min = min.min(v);
            max = max.max(v);
        }
    }

    println!("{}", args.path.display());
    println!("  size:  {0}x{0}x{0}", lut.size());
    println!("  rows:  {}", lut.rows().len());
    println!("  range: [{min:.6}, {max:.6}]");
    Ok(())
}

fn lut_export(args: &LutExportArgs) -> Result<()> {
    let record = match &args.adjustments {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str::<AdjustmentRecord>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
                .clamped()
        }
        None => AdjustmentRecord::default(),
    };

    let lut = grade_lut::bake(&record, args.size).context("baking LUT")?;
    grade_lut::cube::write_path(&args.output, &lut, &args.title)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(path = %args.output.display(), size = args.size, "LUT exported");
    println!("wrote {} ({} rows)", args.output.display(), lut.rows().len());
    Ok(())
}

fn defaults() -> Result<()> {
    let yaml = serde_yaml::to_string(&AdjustmentRecord::default())?;
    print!("{yaml}");
    Ok(())
}
