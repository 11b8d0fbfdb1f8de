//! Registry of individual substitution tokens

use crate::registry::{Id, Registry};
use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};

/// Token registry: substitution labels such as `"A123B"`
#[derive(Debug, Clone, Default)]
pub struct SubstituteRegistry {
    inner: Registry<String>,
}

impl SubstituteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of all tokens seen at least `cutoff` times
    pub fn filter_by_count(&self, cutoff: u64) -> BTreeSet<Id> {
        let kept: BTreeSet<Id> = self
            .inner
            .entries()
            .filter(|&(_, _, count)| count >= cutoff)
            .map(|(id, _, _)| id)
            .collect();
        tracing::debug!(
            "Filtering substitutes by count >= {}: {} of {}",
            cutoff,
            kept.len(),
            self.inner.count()
        );
        kept
    }
}

impl Deref for SubstituteRegistry {
    type Target = Registry<String>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SubstituteRegistry {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
