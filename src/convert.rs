//! Color space conversion chain: HSL -> sRGB -> linear RGB -> CIE XYZ -> CIE L*a*b*
//!
//! All functions are pure and total over the reals. Nothing is clamped here, values outside the
//! nominal ranges are extrapolated; clamping only happens when a swatch is quantised for export.

use palette::white_point::D65;
use palette::{Lab, LinSrgb, Srgb, Xyz};

/// D65 reference white used to normalize XYZ before the Lab transform
pub const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

/// sRGB (D65) linear RGB to XYZ matrix, row major
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// Knee of the Lab companding function
const LAB_DELTA: f64 = 6.0 / 29.0;

/// A point on the HSL wheel, every component in [0, 1] with hue wrapping modulo 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslSample {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslSample {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_srgb(&self) -> Srgb<f64> {
        hsl_to_srgb(self.h, self.s, self.l)
    }

    pub fn to_lab(&self) -> Lab<D65, f64> {
        hsl_to_lab(self.h, self.s, self.l)
    }
}

/// Convert HSL to gamma encoded sRGB
pub fn hsl_to_srgb(h: f64, s: f64, l: f64) -> Srgb<f64> {
    // Achromatic, hue is irrelevant
    if s == 0.0 {
        return Srgb::new(l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Srgb::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Decode a single gamma encoded sRGB channel
pub fn srgb_channel_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Decode gamma from all three sRGB channels
pub fn srgb_to_linear(color: Srgb<f64>) -> LinSrgb<f64> {
    LinSrgb::new(
        srgb_channel_to_linear(color.red),
        srgb_channel_to_linear(color.green),
        srgb_channel_to_linear(color.blue),
    )
}

pub fn linear_srgb_to_xyz(color: LinSrgb<f64>) -> Xyz<D65, f64> {
    let rgb = [color.red, color.green, color.blue];
    let [x, y, z] = RGB_TO_XYZ.map(|row| row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]);
    Xyz::new(x, y, z)
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_DELTA * LAB_DELTA * LAB_DELTA {
        t.cbrt()
    } else {
        t / (3.0 * LAB_DELTA * LAB_DELTA) + 4.0 / 29.0
    }
}

pub fn xyz_to_lab(color: Xyz<D65, f64>) -> Lab<D65, f64> {
    let fx = lab_f(color.x / D65_WHITE[0]);
    let fy = lab_f(color.y / D65_WHITE[1]);
    let fz = lab_f(color.z / D65_WHITE[2]);
    Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Map gamma encoded sRGB all the way to Lab
pub fn srgb_to_lab(color: Srgb<f64>) -> Lab<D65, f64> {
    xyz_to_lab(linear_srgb_to_xyz(srgb_to_linear(color)))
}

/// Full pipeline from an HSL sample to Lab
pub fn hsl_to_lab(h: f64, s: f64, l: f64) -> Lab<D65, f64> {
    srgb_to_lab(hsl_to_srgb(h, s, l))
}
