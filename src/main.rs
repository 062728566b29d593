// pinmap: GC heap page reconstruction and pinned slot map

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pinmap::analysis::analyze_file;
use pinmap::memory::constants::{DEFAULT_OUTPUT, PAGE_ALIGN_LOG, POINTER_WIDTH, SLOT_SIZE};
use pinmap::memory::Geometry;

/// Rebuild heap pages from an object dump and map pinned slots
#[derive(Parser)]
#[command(name = "pinmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Heap dump, one JSON object per line
    input: PathBuf,

    /// Where to write the slot map image
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Pointer width of the dumping platform, in bytes
    #[arg(long, default_value_t = POINTER_WIDTH)]
    pointer_width: u64,

    /// Pages are aligned to 2^PAGE_SHIFT bytes (at most 2^24)
    #[arg(long, default_value_t = PAGE_ALIGN_LOG)]
    page_shift: u32,

    /// Size of one object slot, in bytes
    #[arg(long, default_value_t = SLOT_SIZE)]
    slot_size: u64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Browse the pages interactively after writing the image
    #[arg(long)]
    tui: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let geometry = Geometry::new(cli.pointer_width, cli.page_shift, cli.slot_size)?;
    info!(
        "geometry: {}-byte pointers, 2^{} byte pages, {}-byte slots, {} slots per page at most",
        geometry.pointer_width(),
        geometry.align_log(),
        geometry.slot_size(),
        geometry.max_capacity()
    );

    let analysis = analyze_file(&cli.input, geometry)
        .with_context(|| format!("failed to analyze {}", cli.input.display()))?;

    if analysis.grid.is_empty() {
        warn!("no heap objects found, skipping {}", cli.output.display());
    } else {
        analysis.grid.save_png(&cli.output)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis.summary)?);
    } else {
        println!("{}", analysis.summary);
        if cli.verbose > 0 {
            print!("{}", analysis.summary.kind_table());
        }
    }

    if cli.tui {
        pinmap::ui::browse(&analysis.heap, analysis.summary)?;
    }

    Ok(())
}
