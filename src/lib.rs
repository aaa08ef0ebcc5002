pub use self::builder::{
    Acceptance, BuildStats, NeighbourSearch, Palette, PaletteBuilder, PaletteConfig,
    PaletteEntry, generate_palette, generate_palette_with_stats,
};
pub use self::convert::{HslSample, hsl_to_lab, hsl_to_srgb};
pub use self::distance::{Cie94Weights, delta_e94, delta_e94_batch, delta_e94_with};
pub use self::error::{Error, Result};
pub use self::sampler::{Candidate, SamplingGrid, TraversalOrder};
pub use self::spatial::{BinKey, SpatialBinIndex};
pub use self::swatch::{Swatch, SwatchOptions, display_order, layout_swatch};

use std::path::PathBuf;

use clap::Parser;
use palette::Srgb;
use tracing_subscriber::EnvFilter;
use wild::ArgsOs;

use generator::PaletteGenerator;

mod arg_validators;
pub mod builder;
pub mod color_ops;
pub mod convert;
pub mod distance;
mod error;
pub mod export;
mod generator;
pub mod sampler;
pub mod spatial;
pub mod swatch;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Minimum CIE94 distance between accepted colors
    #[arg(short, long, default_value_t = 2.0, value_parser = arg_validators::validate_threshold)]
    threshold: f64,
    /// Fixed HSL lightness of every candidate
    #[arg(short, long, default_value_t = 0.5, value_parser = arg_validators::validate_unit_interval)]
    lightness: f64,
    /// Minimum saturation of the candidate grid
    #[arg(short('m'), long, default_value_t = 0.0, value_parser = arg_validators::validate_unit_interval)]
    sat_min: f64,
    /// Number of hue steps
    #[arg(short('H'), long, default_value_t = 256)]
    h_steps: usize,
    /// Number of saturation steps
    #[arg(short('S'), long, default_value_t = 256)]
    s_steps: usize,
    /// Candidate order: sat_desc, hue_then_sat or random (anything else keeps grid order)
    #[arg(short, long, default_value = "sat_desc")]
    order: String,
    /// Seed for random order, omit for a different permutation every run
    #[arg(long)]
    seed: Option<u64>,
    /// Compare every candidate against all accepted colors instead of nearby bins
    #[arg(long, default_value_t = false)]
    exhaustive: bool,
    /// Swatch columns
    #[arg(short, long, default_value_t = 64)]
    cols: usize,
    /// Swatch cell size (pixels)
    #[arg(short('C'), long, default_value_t = 8)]
    cell: usize,
    /// Keep acceptance order in the swatch instead of sorting by hue and chroma
    #[arg(long, default_value_t = false)]
    no_sort: bool,
    /// Fill color for unused swatch cells
    #[arg(short, long, default_value = "#FFFFFF", value_parser = arg_validators::validate_fill_color)]
    fill_color: Srgb<f64>,
    /// Write swatch image to this file (.bmp, .png, ...)
    #[arg(short('O'), long)]
    output: Option<PathBuf>,
    /// Output image pixel density in inches (PNG only)
    #[arg(short, long)]
    dpi: Option<u32>,
    /// Print every accepted color as hex and Lab
    #[arg(long, default_value_t = false)]
    list: bool,
    /// Verbose messages
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

pub fn run(args: ArgsOs) -> Result<()> {
    let args = Args::parse_from(args);
    init_logging(args.verbose);
    let generator = PaletteGenerator::new(&args);
    generator.process()
}

fn init_logging(verbose: bool) {
    let filter = match verbose {
        true => EnvFilter::new("distinct_palette=debug"),
        false => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "distinct_palette=warn".into()),
    };
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
