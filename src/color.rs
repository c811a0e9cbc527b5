use eframe::egui::{Color32, ColorImage};
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::{Slice, SliceStats};

// ---------------------------------------------------------------------------
// Viridis colour map
// ---------------------------------------------------------------------------

/// Viridis sampled at 9 evenly spaced stops (sRGB, 0..=255).
const VIRIDIS_STOPS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

fn stop(i: usize) -> LinSrgb {
    let (r, g, b) = VIRIDIS_STOPS[i];
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Map `t ∈ [0, 1]` onto viridis. Interpolation happens in linear RGB.
pub fn viridis(t: f32) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let last = VIRIDIS_STOPS.len() - 1;
    let pos = t * last as f32;
    let i = (pos.floor() as usize).min(last - 1);
    let frac = pos - i as f32;

    let mixed = stop(i).mix(stop(i + 1), frac);
    let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Normalise `value` into `[min, max]` the way `imshow` does: a flat range
/// maps everything to the bottom of the colour map.
fn normalise(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        0.0
    } else {
        (value - min) / range
    }
}

// ---------------------------------------------------------------------------
// Slice → image
// ---------------------------------------------------------------------------

/// Colour-map a slice into RGBA pixels (`cols` wide, `rows` tall), scaled
/// to the slice's own min/max. NaN samples become transparent.
pub fn slice_rgba(slice: &Slice, stats: &SliceStats) -> Vec<Color32> {
    slice
        .values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                Color32::TRANSPARENT
            } else {
                viridis(normalise(v, stats.min, stats.max))
            }
        })
        .collect()
}

pub fn slice_image(slice: &Slice, stats: &SliceStats) -> ColorImage {
    let mut image = ColorImage::new([slice.cols, slice.rows], Color32::TRANSPARENT);
    image.pixels = slice_rgba(slice, stats);
    image
}

// ---------------------------------------------------------------------------
// Line colours for the deviation profile
// ---------------------------------------------------------------------------

/// Fixed qualitative palette for line plots.
const LINE_COLORS: [(u8, u8, u8); 6] = [
    (48, 112, 183),
    (201, 92, 46),
    (228, 179, 69),
    (117, 52, 137),
    (109, 188, 233),
    (130, 171, 69),
];

pub fn line_color(i: usize) -> Color32 {
    let (r, g, b) = LINE_COLORS[i % LINE_COLORS.len()];
    Color32::from_rgb(r, g, b)
}
