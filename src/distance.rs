//! CIE94 (ΔE94) color difference over Lab
//!
//! The weighting functions use the chroma of the first argument only, so the metric is not
//! symmetric: `delta_e94(a, b)` and `delta_e94(b, a)` differ whenever the chromas differ.

use palette::Lab;
use palette::white_point::D65;

/// Parametric factors and weighting constants of the CIE94 formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cie94Weights {
    pub k_l: f64,
    pub k_c: f64,
    pub k_h: f64,
    pub k1: f64,
    pub k2: f64,
}

impl Default for Cie94Weights {
    /// Graphic arts constants
    fn default() -> Self {
        Self {
            k_l: 1.0,
            k_c: 1.0,
            k_h: 1.0,
            k1: 0.045,
            k2: 0.015,
        }
    }
}

/// Chroma in the a-b plane
pub fn chroma(lab: &Lab<D65, f64>) -> f64 {
    (lab.a * lab.a + lab.b * lab.b).sqrt()
}

/// ΔE94 with graphic arts weights, `reference` supplies the chroma for the weighting functions
pub fn delta_e94(reference: &Lab<D65, f64>, sample: &Lab<D65, f64>) -> f64 {
    delta_e94_with(reference, sample, &Cie94Weights::default())
}

pub fn delta_e94_with(
    reference: &Lab<D65, f64>,
    sample: &Lab<D65, f64>,
    weights: &Cie94Weights,
) -> f64 {
    let c1 = chroma(reference);
    let c2 = chroma(sample);
    let dl = reference.l - sample.l;
    let dc = c1 - c2;
    let da = reference.a - sample.a;
    let db = reference.b - sample.b;
    // Cancellation can push this slightly below zero
    let dh = (da * da + db * db - dc * dc).max(0.0).sqrt();

    let sl = 1.0;
    let sc = 1.0 + weights.k1 * c1;
    let sh = 1.0 + weights.k2 * c1;

    let term_l = dl / (weights.k_l * sl);
    let term_c = dc / (weights.k_c * sc);
    let term_h = dh / (weights.k_h * sh);
    (term_l * term_l + term_c * term_c + term_h * term_h).sqrt()
}

/// Distances from each of `references` to a single `sample`, in input order
pub fn delta_e94_batch<'a, I>(
    references: I,
    sample: &'a Lab<D65, f64>,
    weights: &'a Cie94Weights,
) -> impl Iterator<Item = f64> + 'a
where
    I: IntoIterator<Item = &'a Lab<D65, f64>>,
    I::IntoIter: 'a,
{
    references
        .into_iter()
        .map(move |reference| delta_e94_with(reference, sample, weights))
}
