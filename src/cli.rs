//! CLI argument parsing for subcombi

use crate::config::Config;
use crate::error::Result;
use crate::matrix::FigureSize;
use crate::pipeline::Thresholds;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "subcombi")]
#[command(version)]
#[command(
    about = "Plot combinations of substitutions",
    long_about = "Count substitution tokens and their per-record combinations, \
                  keep the frequent ones and write a combination matrix (SVG), \
                  the ranked frequencies (JSON) and a run log."
)]
pub struct Cli {
    /// Input file with one record per line, e.g. "(A12B,C34D)"
    #[arg(value_name = "FILE", value_parser = existing_file)]
    pub file: PathBuf,

    /// Output base filename (extension is replaced) [default: FILE]
    #[arg(short = 'o', long = "output", value_name = "BASE")]
    pub output: Option<PathBuf>,

    /// Min substitution frequency [default: 0.05]
    #[arg(long = "min-sub-freq", value_name = "FRAC")]
    pub min_sub_freq: Option<f64>,

    /// Max combination cumulative fraction
    #[arg(long = "max-combi-cumfrac", value_name = "FRAC")]
    pub max_combi_cumfrac: Option<f64>,

    /// Min combination frequency [default: 0.05]
    #[arg(long = "min-combi-freq", value_name = "FRAC")]
    pub min_combi_freq: Option<f64>,

    /// Max combination number [default: 20]
    #[arg(long = "max-combi-num", value_name = "N")]
    pub max_combi_num: Option<usize>,

    /// Figure size in inches [default: 20x20]
    #[arg(long = "size", value_name = "WxH")]
    pub size: Option<FigureSize>,

    /// Font size of bar labels [default: 10]
    #[arg(long = "top-font-size", value_name = "PT")]
    pub top_font_size: Option<u32>,

    /// TOML configuration file ([thresholds] and [plot] tables)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long = "debug")]
    pub debug: bool,
}

fn existing_file(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File '{}' does not exist", value))
    }
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub thresholds: Thresholds,
    pub size: FigureSize,
    pub font_size: u32,
}

/// Paths of the files written next to the output base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub log: PathBuf,
    pub picture: PathBuf,
    pub data: PathBuf,
}

impl OutputPaths {
    pub fn from_base(base: &Path) -> Self {
        Self {
            log: base.with_extension("log"),
            picture: base.with_extension("svg"),
            data: base.with_extension("json"),
        }
    }

    /// First output that resolves to the same file as `input`
    ///
    /// Outputs that do not exist yet cannot be the input.
    pub fn clobbering(&self, input: &Path) -> Option<&Path> {
        let input = input.canonicalize().ok()?;
        [&self.log, &self.picture, &self.data]
            .into_iter()
            .map(PathBuf::as_path)
            .find(|output| {
                output
                    .canonicalize()
                    .is_ok_and(|resolved| resolved == input)
            })
    }
}

impl Cli {
    /// Merge flags over the configuration file (if any) over defaults
    pub fn settings(&self, config: &Config) -> Result<Settings> {
        let base = config.thresholds;
        let thresholds = Thresholds {
            token_min_freq: self.min_sub_freq.unwrap_or(base.token_min_freq),
            combination_max_cumfrac: self.max_combi_cumfrac.or(base.combination_max_cumfrac),
            combination_min_freq: self.min_combi_freq.or(base.combination_min_freq),
            combination_max_num: self.max_combi_num.or(base.combination_max_num),
        };
        let size = match self.size {
            Some(size) => size,
            None => config.figure_size()?,
        };
        Ok(Settings {
            thresholds,
            size,
            font_size: self.top_font_size.unwrap_or_else(|| config.font_size()),
        })
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::from_base(self.output.as_deref().unwrap_or(&self.file))
    }
}
