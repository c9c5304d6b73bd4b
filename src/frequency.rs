use std::collections::btree_map::{self, BTreeMap};

use crate::Symbol;

/// Occurrence count of every distinct symbol of an input.
///
/// Keys are kept in ascending order, which is also the order leaves enter the
/// priority queue when the tree is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S> {
    counts: BTreeMap<S, usize>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Counts every symbol of the provided sequence.
    pub fn from_symbols<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut counts = BTreeMap::new();
        for symbol in symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Creates a table from already known counts.
    ///
    /// Zero counts are dropped and repeated symbols are summed, saturating at
    /// `usize::MAX`, so every kept entry is positive.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
    {
        let mut table = BTreeMap::new();
        for (symbol, count) in counts.into_iter().filter(|(_, count)| *count > 0) {
            let entry = table.entry(symbol).or_insert(0usize);
            *entry = entry.saturating_add(count);
        }
        Self { counts: table }
    }

    /// Count of `symbol`, if it was seen at all.
    pub fn get(&self, symbol: &S) -> Option<usize> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no symbol was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, S, usize> {
        self.counts.iter()
    }
}

impl FrequencyTable<char> {
    /// Counts the characters of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::from_symbols(text.chars())
    }
}

impl<S: Symbol> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}

impl<'a, S> IntoIterator for &'a FrequencyTable<S> {
    type Item = (&'a S, &'a usize);
    type IntoIter = btree_map::Iter<'a, S, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Counts the characters of `text`.
pub fn build_frequency_table(text: &str) -> FrequencyTable<char> {
    FrequencyTable::from_text(text)
}
