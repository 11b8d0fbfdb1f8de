//! JSON document of the ranked frequencies
//!
//! Shape:
//!
//! ```json
//! { "subs": [{"sub": "A12B", "freq": 0.5}],
//!   "combi": [{"subs": ["A12B", "C3D"], "freq": 0.25}] }
//! ```

use crate::error::Result;
use crate::pipeline::Frequencies;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A kept substitution and its frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstituteFrequency {
    pub sub: String,
    pub freq: f64,
}

/// A kept combination and its frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationFrequency {
    /// Member tokens, sorted
    pub subs: Vec<String>,
    pub freq: f64,
}

/// Root JSON output structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub subs: Vec<SubstituteFrequency>,
    pub combi: Vec<CombinationFrequency>,
}

impl FrequencyReport {
    pub fn from_frequencies(frequencies: &Frequencies) -> Self {
        let subs = frequencies
            .substitutes
            .iter()
            .map(|(sub, freq)| SubstituteFrequency {
                sub: sub.clone(),
                freq: *freq,
            })
            .collect();
        let combi = frequencies
            .combinations
            .iter()
            .map(|(subs, freq)| CombinationFrequency {
                subs: subs.iter().cloned().collect(),
                freq: *freq,
            })
            .collect();
        Self { subs, combi }
    }

    /// Pretty-printed JSON (2-space indent)
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
