//! Frequency Table Module
//! Value counts with first-seen tie-breaking and multi-value field splitting.

use std::collections::HashMap;

/// One row of a ranked frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
}

impl FrequencyEntry {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Counts labels while remembering the order they were first seen.
#[derive(Debug, Default)]
pub struct FrequencyCounter {
    index: HashMap<String, usize>,
    entries: Vec<FrequencyEntry>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(FrequencyEntry::new(label, 1));
            }
        }
    }

    /// Number of distinct labels seen.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// All labels by descending count; equal counts keep first-seen order.
    pub fn into_ranked(self) -> Vec<FrequencyEntry> {
        let mut entries = self.entries;
        // sort_by is stable
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

/// Ranked value counts over single-valued labels.
pub fn value_counts<'a, I>(values: I) -> Vec<FrequencyEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counter = FrequencyCounter::new();
    for value in values {
        counter.add(value);
    }
    counter.into_ranked()
}

/// Split a comma-delimited field into trimmed, non-empty labels.
pub fn split_multi_value(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Ranked value counts after flattening comma-delimited fields.
pub fn multi_value_counts<'a, I>(fields: I) -> Vec<FrequencyEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    value_counts(fields.into_iter().flat_map(split_multi_value))
}

/// Keep the first `n` entries of a ranked table.
pub fn top_n(mut ranked: Vec<FrequencyEntry>, n: usize) -> Vec<FrequencyEntry> {
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_first_seen() {
        let ranked = value_counts(["PG", "R", "TV-MA", "R", "PG", "G"]);
        let labels: Vec<&str> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["PG", "R", "TV-MA", "G"]);
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[3].count, 1);
    }

    #[test]
    fn split_trims_and_drops_empty_labels() {
        let parts: Vec<&str> = split_multi_value(" United States,India , ,").collect();
        assert_eq!(parts, ["United States", "India"]);
        assert_eq!(split_multi_value("").count(), 0);
    }

    #[test]
    fn multi_value_fields_are_flattened() {
        let ranked = multi_value_counts(["US, UK", "US", "France, UK, US"]);
        assert_eq!(
            ranked,
            vec![
                FrequencyEntry::new("US", 3),
                FrequencyEntry::new("UK", 2),
                FrequencyEntry::new("France", 1),
            ]
        );
    }

    #[test]
    fn top_n_never_exceeds_n_and_stays_sorted() {
        let labels: Vec<String> = (0..25).map(|i| format!("g{}", i % 13)).collect();
        let top = top_n(value_counts(labels.iter().map(String::as_str)), 10);

        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        // g0..g11 appear twice, g12 once; ties resolve in first-seen order
        assert_eq!(top[0].label, "g0");
        assert_eq!(top[9].label, "g9");
    }

    #[test]
    fn counter_tracks_distinct_labels() {
        let mut counter = FrequencyCounter::new();
        counter.add("Drama");
        counter.add("Drama");
        counter.add("Comedy");
        assert_eq!(counter.distinct(), 2);
    }
}
