//! Dataset insights: the aggregate counts behind the dashboard views.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::corpus::RoleCorpus;
use crate::matching::tfidf::tokenize;

const TOP_TITLES: usize = 10;
const TOP_REGIONS: usize = 10;
const TOP_TERMS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetInsights {
    pub total_postings: usize,
    pub top_titles: Vec<CountEntry>,
    pub top_regions: Vec<CountEntry>,
    /// `YYYY-MM` buckets, ascending.
    pub monthly_postings: Vec<CountEntry>,
    pub top_terms: Vec<CountEntry>,
}

/// Returns `None` for an empty corpus.
pub fn dataset_insights(corpus: &RoleCorpus) -> Option<DatasetInsights> {
    if corpus.is_empty() {
        return None;
    }
    let entries = corpus.entries();

    let top_titles = top_counts(
        entries.iter().map(|e| e.title.as_str()).filter(|t| !t.is_empty()),
        TOP_TITLES,
    );
    let top_regions = top_counts(entries.iter().filter_map(|e| e.region.as_deref()), TOP_REGIONS);

    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for date in entries.iter().filter_map(|e| e.posted_date) {
        *months.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
    }
    let monthly_postings = months
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();

    let tokens: Vec<String> = entries
        .iter()
        .flat_map(|e| tokenize(&e.description))
        .collect();
    let top_terms = top_counts(tokens.iter().map(String::as_str), TOP_TERMS);

    Some(DatasetInsights {
        total_postings: entries.len(),
        top_titles,
        top_regions,
        monthly_postings,
        top_terms,
    })
}

/// Most frequent labels, count descending; ties keep first-seen order.
fn top_counts<'a>(labels: impl Iterator<Item = &'a str>, limit: usize) -> Vec<CountEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        let count = counts.entry(label).or_insert(0);
        if *count == 0 {
            order.push(label);
        }
        *count += 1;
    }

    let mut ranked: Vec<CountEntry> = order
        .into_iter()
        .map(|label| CountEntry {
            label: label.to_string(),
            count: counts.get(label).copied().unwrap_or_default(),
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}
