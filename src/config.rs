//! Optional TOML configuration file
//!
//! ## Example
//!
//! ```toml
//! [thresholds]
//! token_min_freq = 0.05
//! combination_max_cumfrac = 0.9
//! combination_min_freq = 0.05
//! combination_max_num = 20
//!
//! [plot]
//! size = "20x20"
//! top_font_size = 10
//! ```
//!
//! Command-line flags override the file; the file overrides built-in defaults.

use crate::error::Result;
use crate::matrix::FigureSize;
use crate::pipeline::Thresholds;
use serde::Deserialize;
use std::path::Path;

/// Default font size for bar and axis labels
pub const DEFAULT_FONT_SIZE: u32 = 10;

/// Plot options as written in the file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Figure size as `WIDTHxHEIGHT` inches
    pub size: Option<String>,
    pub top_font_size: Option<u32>,
}

/// Contents of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub thresholds: Thresholds,
    pub plot: PlotConfig,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn figure_size(&self) -> Result<FigureSize> {
        match &self.plot.size {
            Some(size) => size.parse(),
            None => Ok(FigureSize::default()),
        }
    }

    pub fn font_size(&self) -> u32 {
        self.plot.top_font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }
}
