use std::path::PathBuf;
use std::time::Instant;

use crate::builder::{NeighbourSearch, PaletteConfig, generate_palette};
use crate::color_ops;
use crate::convert::hsl_to_srgb;
use crate::distance::Cie94Weights;
use crate::export;
use crate::sampler::TraversalOrder;
use crate::swatch::{SwatchOptions, layout_swatch};
use crate::{Args, Result};

/// One command line invocation: generate the palette, report it, and optionally export it
pub struct PaletteGenerator {
    config: PaletteConfig,
    swatch: SwatchOptions,
    output: Option<PathBuf>,
    dpi: Option<u32>,
    list: bool,
}

impl PaletteGenerator {
    pub fn new(args: &Args) -> Self {
        let order = TraversalOrder::parse(&args.order, args.seed);
        let search = match args.exhaustive {
            true => NeighbourSearch::Exhaustive,
            false => NeighbourSearch::Binned,
        };
        Self {
            config: PaletteConfig {
                threshold: args.threshold,
                lightness: args.lightness,
                order,
                h_steps: args.h_steps,
                s_steps: args.s_steps,
                sat_min: args.sat_min,
                weights: Cie94Weights::default(),
                search,
            },
            swatch: SwatchOptions {
                cols: args.cols,
                cell: args.cell,
                sort_for_display: !args.no_sort,
                fill: args.fill_color,
            },
            output: args.output.to_owned(),
            dpi: args.dpi,
            list: args.list,
        }
    }

    pub fn process(self) -> Result<()> {
        let started = Instant::now();
        let palette = generate_palette(&self.config)?;
        let elapsed = started.elapsed();

        let PaletteConfig {
            threshold,
            lightness,
            order,
            h_steps,
            s_steps,
            sat_min,
            ..
        } = self.config;
        println!("Kept colors: {}", palette.len());
        println!(
            "Params: threshold={threshold}, lightness={lightness}, order={order}, H={h_steps}, S={s_steps}, sat_min={sat_min}"
        );
        if sat_min <= 0.0 {
            let gray = hsl_to_srgb(0.0, 0.0, lightness);
            println!(
                "Note: sat_min=0 allows true grays (S=0), e.g. {} at lightness {lightness}",
                color_ops::srgb_to_hex(&gray)
            );
        }
        println!("Compute time: {:.2}s", elapsed.as_secs_f64());

        if self.list {
            print!("{}", export::hex_listing(&palette));
        }

        if let Some(output) = &self.output {
            let swatch = layout_swatch(&palette, &self.swatch)?;
            tracing::debug!(
                width = swatch.width(),
                height = swatch.height(),
                sorted = self.swatch.sort_for_display,
                "swatch laid out"
            );
            export::save_swatch(&swatch, output, self.dpi)?;
        }
        Ok(())
    }
}
