use super::PlotConfig;
use std::path::PathBuf;

#[test]
pub fn defaults_match_benchmark_layout() {
    let config = PlotConfig::default();

    assert_eq!(config.data, PathBuf::from("data/rw_tps.data"));
    assert_eq!(config.image, PathBuf::from("results/rw_tps.png"));
    assert!(config.style.annotate);
}

#[test]
pub fn partial_yaml_keeps_defaults() {
    let config: PlotConfig = serde_yaml::from_str("data: /tmp/other.data\n").unwrap();

    assert_eq!(config.data, PathBuf::from("/tmp/other.data"));
    assert_eq!(config.image, PathBuf::from("results/rw_tps.png"));
    assert_eq!(config.style.cell_width, 96);
}

#[test]
pub fn unknown_keys_are_rejected() {
    assert!(serde_yaml::from_str::<PlotConfig>("plot_title: oops\n").is_err());
}

#[test]
pub fn style_overrides_apply() {
    let config: PlotConfig =
        serde_yaml::from_str("style:\n  cell_width: 120\n  annotate: false\n").unwrap();

    assert_eq!(config.style.cell_width, 120);
    assert_eq!(config.style.cell_height, 64);
    assert!(!config.style.annotate);
}
