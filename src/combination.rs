//! Registry of substitution combinations and the ranked combination filter
//!
//! A combination is the set of token ids seen together in one record.
//! Membership is kept in a `BTreeSet`, so equality and hashing do not
//! depend on the order the tokens appeared in.

use crate::counter::Counter;
use crate::registry::{Id, Registry};
use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};
use tracing::info;

/// Set of token ids parsed from one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination(BTreeSet<Id>);

impl Combination {
    pub fn new(ids: impl IntoIterator<Item = Id>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Members of this combination that are also in `keep`
    pub fn intersection(&self, keep: &BTreeSet<Id>) -> Self {
        Self(self.0.intersection(keep).copied().collect())
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Id> for Combination {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Stop criteria for the ranked combination scan
///
/// A `None` or zero value disables its criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombinationFilter {
    /// Stop once the kept combinations cover this share of all records
    pub cumcount_frac: Option<f64>,
    /// Stop at the first combination rarer than this share of the recount
    pub min_freq: Option<f64>,
    /// Stop after this many combinations
    pub max_num: Option<usize>,
}

/// Why the ranked scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    CumulativeFraction,
    MinFrequency,
    MaxNumber,
    /// Every combination in the counter was kept
    Exhausted,
}

/// Result of [`CombinationRegistry::filter_by_count`]
#[derive(Debug, Clone)]
pub struct FilteredCombinations {
    /// Kept combinations, inserted in descending-count order
    pub kept: Counter<Combination>,
    /// Sum of the kept counts
    pub cumcount: u64,
    pub stop: StopReason,
}

/// Combination registry over sets of token ids
#[derive(Debug, Clone, Default)]
pub struct CombinationRegistry {
    inner: Registry<Combination>,
}

impl CombinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-aggregate every combination onto its intersection with `keep`
    ///
    /// Distinct combinations may collapse onto the same reduced key; their
    /// counts are summed. The registry itself is left untouched.
    pub fn recount_with_intersection(&self, keep: &BTreeSet<Id>) -> Counter<Combination> {
        let mut recounted = Counter::new();
        for (_, combination, count) in self.inner.entries() {
            recounted.increment(combination.intersection(keep), count);
        }
        recounted
    }

    /// Keep the most frequent combinations of `counter` until a stop criterion fires
    ///
    /// Combinations are scanned by descending count. Each one is kept
    /// before the criteria are checked, so a non-empty counter always
    /// yields at least one combination. The cumulative criterion is
    /// measured against this registry's total, the frequency criterion
    /// against `counter`'s total.
    pub fn filter_by_count(
        &self,
        counter: &Counter<Combination>,
        filter: &CombinationFilter,
    ) -> FilteredCombinations {
        let max_cumcount = filter
            .cumcount_frac
            .filter(|frac| *frac > 0.0)
            .map(|frac| frac * self.inner.total() as f64);
        let min_freq = filter.min_freq.filter(|freq| *freq > 0.0);
        let max_num = filter.max_num.filter(|num| *num > 0);
        let total = counter.total() as f64;

        let mut kept = Counter::new();
        let mut cumcount = 0u64;
        let mut stop = StopReason::Exhausted;

        for (combination, count) in counter.most_common(None) {
            kept.increment(combination, count);
            cumcount += count;
            let frequency = count as f64 / total;

            if let Some(max_cumcount) = max_cumcount {
                if cumcount as f64 >= max_cumcount {
                    info!(
                        "Stop filtering by max cum count: {:.2} ({})",
                        filter.cumcount_frac.unwrap_or_default(),
                        max_cumcount
                    );
                    stop = StopReason::CumulativeFraction;
                    break;
                }
            }
            if let Some(min_freq) = min_freq {
                if frequency < min_freq {
                    info!("Stop filtering by min frequency: {:.2}", min_freq);
                    stop = StopReason::MinFrequency;
                    break;
                }
            }
            if let Some(max_num) = max_num {
                if kept.len() >= max_num {
                    info!("Stop filtering by max number: {}", max_num);
                    stop = StopReason::MaxNumber;
                    break;
                }
            }
        }

        if total > 0.0 {
            info!(
                "Filtered combinations cum count: {} ({:.2})",
                cumcount,
                cumcount as f64 / total
            );
        }

        FilteredCombinations {
            kept,
            cumcount,
            stop,
        }
    }
}

impl Deref for CombinationRegistry {
    type Target = Registry<Combination>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for CombinationRegistry {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
