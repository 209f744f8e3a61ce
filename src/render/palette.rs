use plotters::style::RGBColor;

/// flare-style gradient, light orange for low values through dark plum for
/// high values, monotonic in perceived lightness
const FLARE_STOPS: [(u8, u8, u8); 6] = [
    (236, 146, 86),
    (224, 114, 80),
    (207, 83, 85),
    (179, 63, 102),
    (142, 57, 113),
    (101, 53, 106),
];

/// map a normalized value in [0, 1] onto the gradient
pub fn flare(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (FLARE_STOPS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(FLARE_STOPS.len() - 2);
    let fraction = scaled - index as f64;

    let (r0, g0, b0) = FLARE_STOPS[index];
    let (r1, g1, b1) = FLARE_STOPS[index + 1];

    RGBColor(
        lerp(r0, r1, fraction),
        lerp(g0, g1, fraction),
        lerp(b0, b1, fraction),
    )
}

/// pick black or white annotation text depending on cell lightness
pub fn annotation_color(t: f64) -> RGBColor {
    let RGBColor(r, g, b) = flare(t);
    let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;

    if luminance < 0.45 {
        RGBColor(255, 255, 255)
    } else {
        RGBColor(0, 0, 0)
    }
}

/// normalize a cell value against the grid's value range;
/// a degenerate range maps everything to the middle of the gradient
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;

    if span.abs() < f64::EPSILON {
        0.5
    } else {
        (value - min) / span
    }
}

fn lerp(from: u8, to: u8, fraction: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * fraction).round() as u8
}
