//! Term frequency counting and top-K ranking.

use std::collections::HashMap;

use serde::Serialize;

/// Number of terms kept for the charts.
pub const DEFAULT_TOP_K: usize = 20;

/// One ranked term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: u32,
}

/// Exact-match token counts, remembering the order terms were first seen.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    /// term -> position in `counts`
    positions: HashMap<String, usize>,
    /// (term, count) in first-occurrence order
    counts: Vec<(String, u32)>,
}

impl FrequencyTable {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for token in tokens {
            table.add(token.as_ref());
        }
        table
    }

    pub fn add(&mut self, token: &str) {
        match self.positions.get(token) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.positions.insert(token.to_string(), self.counts.len());
                self.counts.push((token.to_string(), 1));
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<u32> {
        self.positions.get(token).map(|&i| self.counts[i].1)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `k` most frequent terms, count descending. Ties keep first-occurrence
    /// order (the sort is stable over insertion order).
    pub fn top(&self, k: usize) -> RankedTerms {
        let mut ranked: Vec<TermCount> = self
            .counts
            .iter()
            .map(|(term, count)| TermCount {
                term: term.clone(),
                count: *count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(k);
        RankedTerms(ranked)
    }
}

/// Top-K (term, count) list feeding both charts. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedTerms(Vec<TermCount>);

impl RankedTerms {
    pub fn terms(&self) -> &[TermCount] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max_count(&self) -> u32 {
        self.0.iter().map(|t| t.count).max().unwrap_or(0)
    }
}

/// Count `tokens` and keep the `k` most frequent.
pub fn rank<I, S>(tokens: I, k: usize) -> RankedTerms
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FrequencyTable::from_tokens(tokens).top(k)
}
