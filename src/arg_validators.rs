use palette::Srgb;

use crate::color_ops;

pub(crate) fn validate_threshold(value: &str) -> Result<f64, String> {
    let num = parse_number(value)?;
    if num <= 0.0 {
        return Err("Number must be greater than 0".to_string());
    }
    Ok(num)
}

/// Lightness and saturation live on the unit interval
pub(crate) fn validate_unit_interval(value: &str) -> Result<f64, String> {
    let num = parse_number(value)?;
    if !(0.0..=1.0).contains(&num) {
        return Err("Number must be between 0 and 1".to_string());
    }
    Ok(num)
}

pub(crate) fn validate_fill_color(value: &str) -> Result<Srgb<f64>, String> {
    color_ops::parse_color(value).map_err(|e| e.to_string())
}

fn parse_number(value: &str) -> Result<f64, String> {
    let num = value
        .parse::<f64>()
        .map_err(|_| "Not a valid floating point number".to_string())?;
    if !num.is_finite() {
        return Err("Number must be finite".to_string());
    }
    Ok(num)
}
