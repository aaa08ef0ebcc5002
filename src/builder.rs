//! Greedy palette construction
//!
//! Candidates are visited once in traversal order. A candidate is rejected when any accepted
//! color it is compared against is closer than the threshold, with the existing color as the
//! reference argument of ΔE94. Otherwise it is appended to the palette and indexed. By default
//! only the 3x3x3 bin neighbourhood of the candidate is compared.

use palette::white_point::D65;
use palette::{Lab, Srgb};

use crate::distance::{Cie94Weights, delta_e94_batch};
use crate::sampler::{SamplingGrid, TraversalOrder};
use crate::spatial::SpatialBinIndex;
use crate::{Error, Result};

/// Parameters of a single palette generation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteConfig {
    pub threshold: f64,
    pub lightness: f64,
    pub order: TraversalOrder,
    pub h_steps: usize,
    pub s_steps: usize,
    pub sat_min: f64,
    pub weights: Cie94Weights,
    pub search: NeighbourSearch,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            lightness: 0.5,
            order: TraversalOrder::SatDesc,
            h_steps: 256,
            s_steps: 256,
            sat_min: 0.0,
            weights: Cie94Weights::default(),
            search: NeighbourSearch::Binned,
        }
    }
}

impl PaletteConfig {
    /// Reject configurations that cannot produce a meaningful palette
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;
        if self.h_steps == 0 || self.s_steps == 0 {
            return Err(Error::InvalidSteps {
                h_steps: self.h_steps,
                s_steps: self.s_steps,
            });
        }
        Ok(())
    }

    pub fn grid(&self) -> SamplingGrid {
        SamplingGrid {
            h_steps: self.h_steps,
            s_steps: self.s_steps,
            sat_min: self.sat_min,
            lightness: self.lightness,
        }
    }
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(Error::InvalidThreshold(threshold));
    }
    Ok(())
}

/// Which accepted colors a candidate is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighbourSearch {
    /// Only colors in the 3x3x3 bin neighbourhood of the candidate
    #[default]
    Binned,
    /// Every accepted color. Guarantees pairwise separation at O(n^2) cost.
    Exhaustive,
}

/// An accepted color: `srgb` for display, `lab` for every distance comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub srgb: Srgb<f64>,
    pub lab: Lab<D65, f64>,
}

/// Accepted colors in acceptance order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn srgb(&self) -> impl Iterator<Item = Srgb<f64>> + '_ {
        self.entries.iter().map(|entry| entry.srgb)
    }

    pub fn lab(&self) -> impl Iterator<Item = Lab<D65, f64>> + '_ {
        self.entries.iter().map(|entry| entry.lab)
    }

    /// Split into parallel sRGB and Lab lists
    pub fn into_parts(self) -> (Vec<Srgb<f64>>, Vec<Lab<D65, f64>>) {
        self.entries
            .into_iter()
            .map(|entry| (entry.srgb, entry.lab))
            .unzip()
    }
}

/// Counters collected while building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub accepted: usize,
    pub rejected: usize,
    pub comparisons: usize,
    pub occupied_bins: usize,
}

/// Outcome of offering one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    Accepted(usize),
    Rejected,
}

/// Owns the growing palette and its bin index for one run
#[derive(Debug, Clone)]
pub struct PaletteBuilder {
    threshold: f64,
    weights: Cie94Weights,
    search: NeighbourSearch,
    palette: Palette,
    index: SpatialBinIndex,
    stats: BuildStats,
}

impl PaletteBuilder {
    pub fn new(threshold: f64, weights: Cie94Weights) -> Result<Self> {
        validate_threshold(threshold)?;
        Ok(Self {
            threshold,
            weights,
            search: NeighbourSearch::Binned,
            palette: Palette::default(),
            index: SpatialBinIndex::new(threshold),
            stats: BuildStats::default(),
        })
    }

    pub fn with_search(mut self, search: NeighbourSearch) -> Self {
        self.search = search;
        self
    }

    /// Accept the color unless an accepted neighbour is closer than the threshold
    pub fn offer(&mut self, srgb: Srgb<f64>, lab: Lab<D65, f64>) -> Acceptance {
        let neighbours = match self.search {
            NeighbourSearch::Binned => self.index.query(&lab),
            NeighbourSearch::Exhaustive => (0..self.palette.len()).collect(),
        };
        self.stats.comparisons += neighbours.len();
        let existing = neighbours.iter().map(|&i| &self.palette.entries[i].lab);
        let too_close = delta_e94_batch(existing, &lab, &self.weights).any(|d| d < self.threshold);
        if too_close {
            self.stats.rejected += 1;
            return Acceptance::Rejected;
        }
        let id = self.palette.entries.len();
        self.palette.entries.push(PaletteEntry { srgb, lab });
        self.index.insert(id, &lab);
        self.stats.accepted += 1;
        Acceptance::Accepted(id)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn stats(&self) -> BuildStats {
        BuildStats {
            occupied_bins: self.index.occupied_bins(),
            ..self.stats
        }
    }

    pub fn finish(self) -> (Palette, BuildStats) {
        let stats = self.stats();
        (self.palette, stats)
    }
}

/// Run the whole pipeline: sample the grid, order it, and greedily accept distinct colors
pub fn generate_palette(config: &PaletteConfig) -> Result<Palette> {
    generate_palette_with_stats(config).map(|(palette, _)| palette)
}

pub fn generate_palette_with_stats(config: &PaletteConfig) -> Result<(Palette, BuildStats)> {
    config.validate()?;
    let candidates = config.grid().ordered_candidates(config.order);
    tracing::debug!(
        threshold = config.threshold,
        lightness = config.lightness,
        order = %config.order,
        search = ?config.search,
        h_steps = config.h_steps,
        s_steps = config.s_steps,
        sat_min = config.sat_min,
        candidates = candidates.len(),
        "generating palette"
    );
    let mut builder =
        PaletteBuilder::new(config.threshold, config.weights)?.with_search(config.search);
    for candidate in &candidates {
        builder.offer(candidate.hsl.to_srgb(), candidate.hsl.to_lab());
    }
    let (palette, stats) = builder.finish();
    tracing::debug!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        comparisons = stats.comparisons,
        occupied_bins = stats.occupied_bins,
        "palette built"
    );
    Ok((palette, stats))
}
