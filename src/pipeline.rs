//! Record parsing and the counting/filtering pipeline
//!
//! Input records look like `(A12B,C34D_2,E5F)`: a parenthesised,
//! comma-separated list of substitution tokens. Any other line is skipped.

use crate::combination::{Combination, CombinationFilter, CombinationRegistry, StopReason};
use crate::error::{CombiError, Result};
use crate::substitute::SubstituteRegistry;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::BufRead;
use tracing::info;

/// Caller-supplied thresholds, all expressed as fractions of the record count
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Minimum token frequency for a token to be kept
    pub token_min_freq: f64,
    /// Stop once kept combinations cover this share of records
    pub combination_max_cumfrac: Option<f64>,
    /// Stop at the first combination rarer than this
    pub combination_min_freq: Option<f64>,
    /// Stop after this many combinations
    pub combination_max_num: Option<usize>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            token_min_freq: 0.05,
            combination_max_cumfrac: None,
            combination_min_freq: Some(0.05),
            combination_max_num: Some(20),
        }
    }
}

impl Thresholds {
    fn combination_filter(&self) -> CombinationFilter {
        CombinationFilter {
            cumcount_frac: self.combination_max_cumfrac,
            min_freq: self.combination_min_freq,
            max_num: self.combination_max_num,
        }
    }
}

/// Counters gathered along one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub unique_substitutes: usize,
    pub total_substitutes: u64,
    pub unique_combinations: usize,
    pub total_combinations: u64,
    /// Absolute token cutoff derived from `token_min_freq`
    pub substitute_cutoff: u64,
    pub kept_substitutes: usize,
    pub recounted_combinations: usize,
    pub kept_combinations: usize,
    pub kept_cumcount: u64,
    pub stop: StopReason,
}

/// Ranked, normalized frequencies produced by [`calculate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Frequencies {
    /// Kept tokens by descending frequency
    pub substitutes: Vec<(String, f64)>,
    /// Kept combinations by descending frequency
    pub combinations: Vec<(BTreeSet<String>, f64)>,
    pub summary: RunSummary,
}

/// Extract the normalized tokens of a record line, or `None` if it is not a record
pub fn parse_record(line: &str) -> Option<Vec<String>> {
    let payload = line.trim().strip_prefix('(')?.strip_suffix(')')?;
    Some(
        payload
            .split(',')
            .map(|token| token.replace('_', ":"))
            .collect(),
    )
}

/// Count, filter and rank substitutions and their combinations
pub fn calculate<I, S>(lines: I, thresholds: &Thresholds) -> Result<Frequencies>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut substitutes = SubstituteRegistry::new();
    let mut combinations = CombinationRegistry::new();

    for line in lines {
        let Some(tokens) = parse_record(line.as_ref()) else {
            continue;
        };
        let combination: Combination = tokens
            .into_iter()
            .map(|token| substitutes.add(token))
            .collect();
        combinations.add(combination);
    }

    rank(&substitutes, &combinations, thresholds)
}

/// [`calculate`] over any buffered line source
pub fn calculate_from_reader<R: BufRead>(reader: R, thresholds: &Thresholds) -> Result<Frequencies> {
    let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
    calculate(lines, thresholds)
}

fn rank(
    substitutes: &SubstituteRegistry,
    combinations: &CombinationRegistry,
    thresholds: &Thresholds,
) -> Result<Frequencies> {
    let total = combinations.total();
    if total == 0 {
        return Err(CombiError::EmptyInput);
    }

    info!("Total: {}", total);
    info!(
        "Substitutes: unique {}, total {}",
        substitutes.count(),
        substitutes.total()
    );
    info!(
        "Combinations: unique {}, total {}",
        combinations.count(),
        total
    );

    // Cutoff is relative to the record count, not the token count.
    let cutoff = (thresholds.token_min_freq * total as f64)
        .round_ties_even()
        .max(0.0) as u64;
    let good_substitutes = substitutes.filter_by_count(cutoff);
    info!(
        "Filtered unique substitutes with cutoff {:.2} ({}): {}",
        thresholds.token_min_freq,
        cutoff,
        good_substitutes.len()
    );

    let recounted = combinations.recount_with_intersection(&good_substitutes);
    info!("Recounted unique combinations: {}", recounted.len());

    let filtered = combinations.filter_by_count(&recounted, &thresholds.combination_filter());
    info!("Filtered unique combinations: {}", filtered.kept.len());

    let mut ranked_substitutes = Vec::with_capacity(good_substitutes.len());
    for &id in &good_substitutes {
        let token = substitutes.index_to_value(id)?.clone();
        let count = substitutes.get_count_for_index(id)?;
        ranked_substitutes.push((token, count as f64 / total as f64));
    }
    ranked_substitutes.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut ranked_combinations = Vec::with_capacity(filtered.kept.len());
    for (combination, count) in filtered.kept.most_common(None) {
        let tokens = combination
            .ids()
            .map(|id| substitutes.index_to_value(id).cloned())
            .collect::<Result<BTreeSet<_>>>()?;
        ranked_combinations.push((tokens, count as f64 / total as f64));
    }

    let summary = RunSummary {
        unique_substitutes: substitutes.count(),
        total_substitutes: substitutes.total(),
        unique_combinations: combinations.count(),
        total_combinations: total,
        substitute_cutoff: cutoff,
        kept_substitutes: good_substitutes.len(),
        recounted_combinations: recounted.len(),
        kept_combinations: filtered.kept.len(),
        kept_cumcount: filtered.cumcount,
        stop: filtered.stop,
    };

    Ok(Frequencies {
        substitutes: ranked_substitutes,
        combinations: ranked_combinations,
        summary,
    })
}
