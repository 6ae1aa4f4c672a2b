//! Color utilities for generated objects
//!
//! Colors are plain `[f32; 3]` linear RGB data attached to nebulas, rings,
//! and warp lanes; rendering them is a consumer concern. The only conversion
//! done here is HSL to RGB, used for the hue-rotated warp lane palette.

/// Linear RGB triple.
pub type Rgb = [f32; 3];

/// Convert HSL to RGB.
///
/// Hue in degrees (wraps), saturation and lightness in [0, 1].
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let hue = hue.rem_euclid(360.0);
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hue_sector = hue / 60.0;
    let x = chroma * (1.0 - (hue_sector % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match hue_sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = lightness - chroma / 2.0;
    [(r1 + m) as f32, (g1 + m) as f32, (b1 + m) as f32]
}

/// Warm palette for emission nebulas (reds and pinks).
pub const EMISSION_PALETTE: [Rgb; 5] = [
    [0.95, 0.35, 0.40],
    [0.90, 0.25, 0.55],
    [1.00, 0.45, 0.35],
    [0.85, 0.30, 0.30],
    [0.95, 0.50, 0.60],
];

/// Cool palette for reflection nebulas (blues).
pub const REFLECTION_PALETTE: [Rgb; 5] = [
    [0.35, 0.55, 0.95],
    [0.25, 0.45, 0.85],
    [0.45, 0.65, 1.00],
    [0.30, 0.60, 0.90],
    [0.50, 0.70, 0.95],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]);
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hsl_greys_ignore_hue() {
        let a = hsl_to_rgb(0.0, 0.0, 0.5);
        let b = hsl_to_rgb(217.0, 0.0, 0.5);
        assert_eq!(a, b);
        assert!((a[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_hsl_hue_wraps() {
        let a = hsl_to_rgb(30.0, 0.7, 0.55);
        let b = hsl_to_rgb(390.0, 0.7, 0.55);
        let c = hsl_to_rgb(-330.0, 0.7, 0.55);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_hsl_output_in_range() {
        for i in 0..36 {
            let rgb = hsl_to_rgb(i as f64 * 10.0, 0.7, 0.55);
            for channel in rgb {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }
}
