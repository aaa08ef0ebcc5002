use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::ImageFormat;

use crate::builder::Palette;
use crate::color_ops;
use crate::swatch::Swatch;
use crate::{Error, Result};

/// Save swatch to an image file, the extension picks the format
///
/// PNG goes through our own encoder so the pixel density header can be written.
/// Everything else (BMP, TIFF, ...) is handed to the image crate.
pub fn save_swatch(swatch: &Swatch, path: &Path, dpi: Option<u32>) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| Error::UnsupportedExportFormat(path.to_owned()))?;
    let image = swatch.to_rgb8();
    match format {
        ImageFormat::Png => {
            let file = File::create(path)?;
            let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            // https://www.w3.org/TR/2003/REC-PNG-20031110/#11pHYs
            if let Some(dpi) = dpi {
                encoder.set_pixel_dims(Some(png::PixelDimensions {
                    xppu: pixels_per_meter(dpi),
                    yppu: pixels_per_meter(dpi),
                    unit: png::Unit::Meter,
                }));
            }
            encoder.write_header()?.write_image_data(image.as_raw())?;
        }
        format => image.save_with_format(path, format)?,
    }
    println!("{}: saved", path.display());
    Ok(())
}

fn pixels_per_meter(dpi: u32) -> u32 {
    // 1 meter = 39.37 inches
    (dpi as f32 * 39.37) as u32
}

/// One `#RRGGBB L a b` line per color, in acceptance order
pub fn hex_listing(palette: &Palette) -> String {
    let mut listing = String::new();
    for entry in palette.entries() {
        let _ = writeln!(
            listing,
            "{} {:8.4} {:9.4} {:9.4}",
            color_ops::srgb_to_hex(&entry.srgb),
            entry.lab.l,
            entry.lab.a,
            entry.lab.b
        );
    }
    listing
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::builder::{PaletteConfig, generate_palette};
    use crate::swatch::{SwatchOptions, layout_swatch};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("distinct-palette-{}-{name}", std::process::id()))
    }

    fn small_swatch() -> (Palette, Swatch) {
        let config = PaletteConfig {
            threshold: 10.0,
            h_steps: 16,
            s_steps: 4,
            ..Default::default()
        };
        let palette = generate_palette(&config).unwrap();
        let options = SwatchOptions {
            cols: 8,
            cell: 2,
            ..Default::default()
        };
        let swatch = layout_swatch(&palette, &options).unwrap();
        (palette, swatch)
    }

    #[test]
    fn bmp_round_trips_through_image_crate() {
        let (_, swatch) = small_swatch();
        let path = temp_path("swatch.bmp");
        save_swatch(&swatch, &path, None).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, swatch.to_rgb8());
    }

    #[test]
    fn png_keeps_pixels() {
        let (_, swatch) = small_swatch();
        let path = temp_path("swatch.png");
        save_swatch(&swatch, &path, Some(150)).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.dimensions(), (16, swatch.height() as u32));
        assert_eq!(loaded, swatch.to_rgb8());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let (_, swatch) = small_swatch();
        let result = save_swatch(&swatch, &temp_path("swatch.nope"), None);
        assert!(matches!(result, Err(Error::UnsupportedExportFormat(_))));
    }

    #[test]
    fn listing_has_one_line_per_color() {
        let (palette, _) = small_swatch();
        let listing = hex_listing(&palette);
        assert_eq!(listing.lines().count(), palette.len());
        assert!(listing.lines().all(|line| line.starts_with('#')));
        assert!(listing.starts_with("#FF0000"));
    }

    #[test]
    fn density_in_meters() {
        assert_eq!(pixels_per_meter(150), 5905);
    }
}
