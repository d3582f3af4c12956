//! Tournament wins per country, derived from the finals table

use crate::FinalResult;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WinCounts {
    counts: BTreeMap<String, u32>,
}

impl WinCounts {
    pub fn from_results(results: &[FinalResult]) -> Self {
        let mut counts = BTreeMap::new();
        for result in results {
            *counts.entry(result.winner.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Exact, case-sensitive lookup. Countries that never won count 0.
    pub fn get(&self, country: &str) -> u32 {
        self.counts.get(country).copied().unwrap_or(0)
    }

    /// Sum of all counts; equals the number of finals it was built from.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Number of distinct winners
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Winners ordered by descending count, ties by name.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
