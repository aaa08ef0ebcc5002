use color::{AlphaColor, ParseError};
use image::Rgb;
use itertools::Itertools;
use palette::Srgb;

/// Parse a CSS color string, like #RRGGBB or "white", into an sRGB color
pub fn parse_color(color: &str) -> Result<Srgb<f64>, ParseError> {
    let color = color::parse_color(color)?;
    let color: AlphaColor<color::Srgb> = color.to_alpha_color();
    let [r, g, b, _a] = color.to_rgba8().to_u8_array();
    Ok(Srgb::new(r, g, b).into_format())
}

/// Quantise a single channel to 8 bits, clamping out of gamut values first
pub fn quantize_channel(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert from palette::Srgb color to 8-bit image::Rgb color
pub fn srgb_to_image_rgb(color: &Srgb<f64>) -> Rgb<u8> {
    Rgb([
        quantize_channel(color.red),
        quantize_channel(color.green),
        quantize_channel(color.blue),
    ])
}

/// Format color as hex #RRGGBB
pub fn srgb_to_hex(color: &Srgb<f64>) -> String {
    format!(
        "#{}",
        srgb_to_image_rgb(color)
            .0
            .iter()
            .map(|c| format!("{:02X}", c))
            .join("")
    )
}
