use super::{canvas_size, palette};
use crate::config::StyleConfig;
use plotters::style::RGBColor;

#[test]
pub fn gradient_endpoints() {
    assert_eq!(palette::flare(0.0), RGBColor(236, 146, 86));
    assert_eq!(palette::flare(1.0), RGBColor(101, 53, 106));
}

#[test]
pub fn gradient_is_clamped() {
    assert_eq!(palette::flare(-3.0), palette::flare(0.0));
    assert_eq!(palette::flare(7.5), palette::flare(1.0));
}

#[test]
pub fn gradient_darkens_monotonically() {
    // perceived lightness must decrease as the value grows, so the warm/dark
    // end always marks the higher throughput
    let luminance = |t: f64| {
        let RGBColor(r, g, b) = palette::flare(t);
        0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
    };

    let mut previous = luminance(0.0);
    for step in 1..=20 {
        let current = luminance(step as f64 / 20.0);
        assert!(current < previous, "lightness increased at step {step}");
        previous = current;
    }
}

#[test]
pub fn annotations_stay_readable() {
    // black on light cells, white on dark ones
    assert_eq!(palette::annotation_color(0.0), RGBColor(0, 0, 0));
    assert_eq!(palette::annotation_color(1.0), RGBColor(255, 255, 255));
}

#[test]
pub fn normalization_spans_unit_interval() {
    assert_eq!(palette::normalize(1.0, 1.0, 9.0), 0.0);
    assert_eq!(palette::normalize(9.0, 1.0, 9.0), 1.0);
    assert_eq!(palette::normalize(5.0, 1.0, 9.0), 0.5);
}

#[test]
pub fn degenerate_range_maps_to_midpoint() {
    assert_eq!(palette::normalize(4.2, 4.2, 4.2), 0.5);
}

#[test]
pub fn canvas_grows_with_grid() {
    let style = StyleConfig::default();

    let (small_width, small_height) = canvas_size(2, 2, &style);
    let (wide_width, wide_height) = canvas_size(5, 2, &style);
    let (tall_width, tall_height) = canvas_size(2, 6, &style);

    assert_eq!(wide_width - small_width, 3 * style.cell_width);
    assert_eq!(wide_height, small_height);
    assert_eq!(tall_height - small_height, 4 * style.cell_height);
    assert_eq!(tall_width, small_width);
}

#[test]
pub fn cell_annotation_format() {
    // rounded integer, field width 3, literal ` K` suffix
    assert_eq!(format!("{:3.0} K", 2.0), "  2 K");
    assert_eq!(format!("{:3.0} K", 125.5021), "126 K");
    assert_eq!(format!("{:3.0} K", 1234.4), "1234 K");
}
