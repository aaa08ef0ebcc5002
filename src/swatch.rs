//! Arrange a palette into a rectangular swatch image for display and export
use image::{ImageBuffer, Rgb};
use itertools::Itertools;
use palette::Srgb;

use crate::builder::{Palette, PaletteEntry};
use crate::color_ops;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchOptions {
    /// Logical cells per row
    pub cols: usize,
    /// Edge length in pixels of each logical cell
    pub cell: usize,
    /// Order by hue angle then chroma instead of acceptance order
    pub sort_for_display: bool,
    /// Color of the unused cells after the last palette entry
    pub fill: Srgb<f64>,
}

impl Default for SwatchOptions {
    fn default() -> Self {
        Self {
            cols: 64,
            cell: 8,
            sort_for_display: true,
            fill: Srgb::new(1.0, 1.0, 1.0),
        }
    }
}

/// Row-major grid of sRGB pixels, already magnified by the cell size
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    rows: usize,
    cols: usize,
    cell: usize,
    pixels: Vec<Srgb<f64>>,
}

impl Swatch {
    /// Logical rows and columns, before magnification
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn width(&self) -> usize {
        self.cols * self.cell
    }

    pub fn height(&self) -> usize {
        self.rows * self.cell
    }

    pub fn pixels(&self) -> &[Srgb<f64>] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Srgb<f64> {
        self.pixels[y * self.width() + x]
    }

    /// Color of a logical cell
    pub fn cell_color(&self, row: usize, col: usize) -> Srgb<f64> {
        self.pixel(col * self.cell, row * self.cell)
    }

    /// Logical cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Srgb<f64>> + '_ {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| self.cell_color(row, col))
    }

    /// 8 bits per channel image, channels clamped to [0, 1] and rounded
    pub fn to_rgb8(&self) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
        ImageBuffer::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            color_ops::srgb_to_image_rgb(&self.pixel(x as usize, y as usize))
        })
    }
}

/// Entries sorted by hue angle in the a-b plane, then chroma. The palette itself is untouched.
pub fn display_order(palette: &Palette) -> Vec<PaletteEntry> {
    palette
        .entries()
        .iter()
        .copied()
        .sorted_by(|x, y| {
            let (hue_x, chroma_x) = hue_and_chroma(x);
            let (hue_y, chroma_y) = hue_and_chroma(y);
            hue_x.total_cmp(&hue_y).then(chroma_x.total_cmp(&chroma_y))
        })
        .collect()
}

fn hue_and_chroma(entry: &PaletteEntry) -> (f64, f64) {
    let lab = entry.lab;
    (lab.b.atan2(lab.a), (lab.a * lab.a + lab.b * lab.b).sqrt())
}

/// Lay the palette out into `ceil(n / cols)` rows of `cols` cells, padding with the fill color
pub fn layout_swatch(palette: &Palette, options: &SwatchOptions) -> Result<Swatch> {
    let SwatchOptions {
        cols,
        cell,
        sort_for_display,
        fill,
    } = *options;
    if cols == 0 || cell == 0 {
        return Err(Error::InvalidSwatchShape { cols, cell });
    }

    let colors: Vec<Srgb<f64>> = if sort_for_display {
        display_order(palette).iter().map(|entry| entry.srgb).collect()
    } else {
        palette.srgb().collect()
    };
    let rows = colors.len().div_ceil(cols);

    let width = cols * cell;
    let mut pixels = Vec::with_capacity(rows * cell * width);
    for row in 0..rows {
        let row_cells = (0..cols)
            .map(|col| colors.get(row * cols + col).copied().unwrap_or(fill))
            .collect_vec();
        // Nearest neighbour magnification: each cell becomes a cell x cell block
        let scanline = row_cells
            .iter()
            .flat_map(|&color| std::iter::repeat_n(color, cell))
            .collect_vec();
        for _ in 0..cell {
            pixels.extend_from_slice(&scanline);
        }
    }

    Ok(Swatch {
        rows,
        cols,
        cell,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use palette::Lab;

    use super::*;
    use crate::builder::PaletteBuilder;
    use crate::convert::HslSample;
    use crate::distance::Cie94Weights;

    fn palette_of(samples: &[HslSample]) -> Palette {
        let mut builder = PaletteBuilder::new(1.0, Cie94Weights::default()).unwrap();
        for sample in samples {
            builder.offer(sample.to_srgb(), sample.to_lab());
        }
        builder.finish().0
    }

    fn hue_ring(n: usize) -> Palette {
        let samples = (0..n)
            .map(|i| HslSample::new(i as f64 / n as f64, 1.0, 0.5))
            .collect_vec();
        palette_of(&samples)
    }

    #[test]
    fn pads_last_row_with_fill() {
        let palette = hue_ring(10);
        assert_eq!(palette.len(), 10);
        let options = SwatchOptions {
            cols: 4,
            cell: 1,
            sort_for_display: false,
            ..Default::default()
        };
        let swatch = layout_swatch(&palette, &options).unwrap();
        assert_eq!(swatch.shape(), (3, 4));
        let cells = swatch.cells().collect_vec();
        assert_eq!(&cells[..10], palette.srgb().collect_vec().as_slice());
        assert!(cells[10..].iter().all(|&c| c == Srgb::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn magnifies_cells_into_blocks() {
        let palette = hue_ring(3);
        let options = SwatchOptions {
            cols: 2,
            cell: 3,
            sort_for_display: false,
            fill: Srgb::new(0.0, 0.0, 0.0),
        };
        let swatch = layout_swatch(&palette, &options).unwrap();
        assert_eq!((swatch.width(), swatch.height()), (6, 6));
        assert_eq!(swatch.pixels().len(), 36);
        let entries = palette.entries();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(swatch.pixel(x, y), entries[0].srgb);
                assert_eq!(swatch.pixel(x + 3, y), entries[1].srgb);
                assert_eq!(swatch.pixel(x, y + 3), entries[2].srgb);
                assert_eq!(swatch.pixel(x + 3, y + 3), options.fill);
            }
        }
    }

    #[test]
    fn display_sort_does_not_touch_palette() {
        let palette = hue_ring(12);
        let before = palette.clone();
        let sorted = display_order(&palette);
        assert_eq!(palette, before);
        assert_eq!(sorted.len(), palette.len());
        let keys = sorted.iter().map(hue_and_chroma).collect_vec();
        assert!(keys.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(sorted.iter().all(|entry| palette.entries().contains(entry)));
    }

    #[test]
    fn equal_hue_sorts_by_chroma() {
        let mut builder = PaletteBuilder::new(1.0, Cie94Weights::default()).unwrap();
        let gray = Srgb::new(0.5, 0.5, 0.5);
        for a in [10.0, 40.0, 25.0] {
            builder.offer(gray, Lab::new(50.0, a, 0.0));
        }
        let palette = builder.finish().0;
        assert_eq!(palette.len(), 3);
        let order = display_order(&palette)
            .iter()
            .map(|entry| entry.lab.a)
            .collect_vec();
        assert_eq!(order, vec![10.0, 25.0, 40.0]);
    }

    #[test]
    fn rejects_degenerate_shape() {
        let palette = hue_ring(2);
        for (cols, cell) in [(0, 1), (4, 0)] {
            let options = SwatchOptions {
                cols,
                cell,
                ..Default::default()
            };
            assert!(matches!(
                layout_swatch(&palette, &options),
                Err(Error::InvalidSwatchShape { .. })
            ));
        }
    }

    #[test]
    fn empty_palette_gives_empty_swatch() {
        let swatch = layout_swatch(&Palette::default(), &SwatchOptions::default()).unwrap();
        assert_eq!(swatch.shape(), (0, 64));
        assert!(swatch.pixels().is_empty());
    }

    #[test]
    fn exports_clamped_rounded_bytes() {
        let palette = hue_ring(1);
        let options = SwatchOptions {
            cols: 2,
            cell: 2,
            sort_for_display: false,
            ..Default::default()
        };
        let image = layout_swatch(&palette, &options).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (4, 2));
        assert_eq!(image.get_pixel(1, 1), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(2, 0), &Rgb([255, 255, 255]));
    }
}
