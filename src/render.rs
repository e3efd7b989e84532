//! Maps an escape field to grayscale pixels and writes them out as a
//! binary PGM.  Everything here is a downstream consumer of the
//! evaluator; nothing in the field depends on it.

use evaluate::EscapeField;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use num::clamp;
use std::fs::File;
use std::io;
use std::path::Path;

/// Maps the field to one grayscale byte per cell, row-major.
/// Never-escaped cells render black; escaped cells scale linearly
/// against the deepest escape actually recorded, so shallow fields
/// still use the full range.
pub fn grayscale(field: &EscapeField) -> Vec<u8> {
    let deepest = field
        .cells()
        .iter()
        .filter(|&&v| v < field.sentinel())
        .max()
        .cloned()
        .unwrap_or(0);
    field
        .cells()
        .iter()
        .map(|&v| shade(v, field.sentinel(), deepest))
        .collect()
}

/// One cell's gray level.  The scale arithmetic runs in u64 so a
/// deep escape iteration cannot overflow the multiplication.
fn shade(cell: u32, sentinel: u32, deepest: u32) -> u8 {
    if cell >= sentinel {
        0
    } else {
        clamp(((cell as u64 + 1) * 255) / (deepest as u64 + 1), 0, 255) as u8
    }
}

/// Writes a grayscale buffer as a binary PGM file.
pub fn write_image(
    filename: &Path,
    pixels: &[u8],
    bounds: (usize, usize),
) -> Result<(), io::Error> {
    let output = File::create(filename)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::Gray(8))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evaluate::{evaluate, ConstantMode};
    use grid::Region;

    #[test]
    fn interior_renders_black_and_escapes_render_bright() {
        let region = Region::new(-2.0, 1.0, -1.5, 1.5).unwrap();
        let field = evaluate(&region, 8.0, ConstantMode::Mandelbrot, 40).unwrap();
        let pixels = grayscale(&field);
        assert_eq!(pixels.len(), field.len());
        for (cell, pixel) in field.cells().iter().zip(pixels.iter()) {
            if *cell == field.sentinel() {
                assert_eq!(*pixel, 0);
            } else {
                assert!(*pixel > 0);
            }
        }
    }

    #[test]
    fn shading_survives_very_deep_escapes() {
        let sentinel = std::u32::MAX;
        let deepest = sentinel - 1;
        assert_eq!(shade(deepest, sentinel, deepest), 255);
        assert_eq!(shade(sentinel, sentinel, deepest), 0);
        assert!(shade(deepest / 2, sentinel, deepest) > 0);
    }

    #[test]
    fn deepest_escape_uses_the_top_of_the_range() {
        let region = Region::new(-2.0, 1.0, -1.5, 1.5).unwrap();
        let field = evaluate(&region, 8.0, ConstantMode::Mandelbrot, 40).unwrap();
        let pixels = grayscale(&field);
        assert_eq!(pixels.iter().max(), Some(&255));
    }
}
