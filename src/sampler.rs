//! Candidate grid over hue and saturation at a single lightness, plus the order it is visited in
use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::convert::HslSample;

/// Dense (hue, saturation) sampling of the HSL wheel at a fixed lightness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingGrid {
    pub h_steps: usize,
    pub s_steps: usize,
    pub sat_min: f64,
    pub lightness: f64,
}

/// One grid sample, tagged with its position in grid order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub hsl: HslSample,
    pub grid_index: usize,
}

impl SamplingGrid {
    pub fn len(&self) -> usize {
        self.h_steps * self.s_steps
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hue values `i / h_steps`, `i` in `0..h_steps`
    pub fn hues(&self) -> Vec<f64> {
        (0..self.h_steps)
            .map(|i| i as f64 / self.h_steps as f64)
            .collect()
    }

    /// `s_steps` evenly spaced saturations from `sat_min` to 1.0 inclusive
    pub fn saturations(&self) -> Vec<f64> {
        match self.s_steps {
            0 => vec![],
            1 => vec![self.sat_min],
            n => {
                let step = (1.0 - self.sat_min) / (n - 1) as f64;
                (0..n)
                    .map(|j| {
                        if j == n - 1 {
                            1.0
                        } else {
                            self.sat_min + j as f64 * step
                        }
                    })
                    .collect()
            }
        }
    }

    /// All samples in grid order: saturation rows, hue varying fastest within a row
    pub fn candidates(&self) -> Vec<Candidate> {
        let hues = self.hues();
        let saturations = self.saturations();
        let mut candidates = Vec::with_capacity(self.len());
        for &s in &saturations {
            for &h in &hues {
                candidates.push(Candidate {
                    hsl: HslSample::new(h, s, self.lightness),
                    grid_index: candidates.len(),
                });
            }
        }
        candidates
    }

    /// Grid samples arranged in the traversal order the builder consumes them in
    pub fn ordered_candidates(&self, order: TraversalOrder) -> Vec<Candidate> {
        let mut candidates = self.candidates();
        order.arrange(&mut candidates);
        candidates
    }
}

/// Order in which grid candidates are offered to the greedy builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Most saturated first, grid order among equal saturations
    #[default]
    SatDesc,
    /// Hue ascending, then saturation ascending
    HueThenSat,
    /// Shuffled; reproducible only when seeded
    Random { seed: Option<u64> },
    /// Grid order untouched. Unknown order names end up here.
    Grid,
}

impl TraversalOrder {
    /// Resolve an order name. Names other than `sat_desc`, `hue_then_sat` and `random` keep the
    /// grid order rather than failing.
    pub fn parse(name: &str, seed: Option<u64>) -> Self {
        match name {
            "sat_desc" => Self::SatDesc,
            "hue_then_sat" => Self::HueThenSat,
            "random" => Self::Random { seed },
            other => {
                tracing::warn!(order = other, "unknown traversal order, keeping grid order");
                Self::Grid
            }
        }
    }

    /// Reorder candidates in place
    pub fn arrange(&self, candidates: &mut [Candidate]) {
        match self {
            // Stable sorts keep grid order among ties
            Self::SatDesc => candidates.sort_by(|a, b| b.hsl.s.total_cmp(&a.hsl.s)),
            Self::HueThenSat => candidates.sort_by(|a, b| {
                a.hsl
                    .h
                    .total_cmp(&b.hsl.h)
                    .then(a.hsl.s.total_cmp(&b.hsl.s))
            }),
            Self::Random { seed: Some(seed) } => {
                candidates.shuffle(&mut StdRng::seed_from_u64(*seed));
            }
            Self::Random { seed: None } => {
                candidates.shuffle(&mut StdRng::from_entropy());
            }
            Self::Grid => {}
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SatDesc => write!(f, "sat_desc"),
            Self::HueThenSat => write!(f, "hue_then_sat"),
            Self::Random { seed: Some(seed) } => write!(f, "random (seed {seed})"),
            Self::Random { seed: None } => write!(f, "random"),
            Self::Grid => write!(f, "grid"),
        }
    }
}
