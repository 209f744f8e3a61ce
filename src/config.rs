use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::PathBuf, str::FromStr};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Failed to open config file {path:?}: {source}")]
    FileNotFound { path: PathBuf, source: io::Error },
    #[error("Failed to parse config file")]
    InvalidConfig(#[from] serde_yaml::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    // benchmark measurements, one `load=.. len=.. .. tps=..` record per line
    #[serde(default = "default_data_path")]
    pub data: PathBuf,
    // rendered heatmap, overwritten if it exists; parent directories are not created
    #[serde(default = "default_image_path")]
    pub image: PathBuf,
    #[serde(default)]
    pub style: StyleConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    // pixel size of one heatmap cell
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
    #[serde(default = "default_cell_height")]
    pub cell_height: u32,
    // draw the `<value> K` annotation in every cell
    #[serde(default = "default_annotate")]
    pub annotate: bool,
}

impl PlotConfig {
    /// load a config from a yaml file
    pub fn load(path: &PathBuf) -> Result<Self, ConfigErrors> {
        let file = File::open(path).map_err(|source| ConfigErrors::FileNotFound {
            path: path.clone(),
            source,
        })?;

        let config: PlotConfig = serde_yaml::from_reader(file)?;
        debug!(path = ?path, "Loaded plot config");

        Ok(config)
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            data: default_data_path(),
            image: default_image_path(),
            style: StyleConfig::default(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            annotate: default_annotate(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from_str("data/rw_tps.data").unwrap()
}

fn default_image_path() -> PathBuf {
    PathBuf::from_str("results/rw_tps.png").unwrap()
}

fn default_cell_width() -> u32 {
    96
}

fn default_cell_height() -> u32 {
    64
}

fn default_annotate() -> bool {
    true
}

#[cfg(test)]
mod config_test;
