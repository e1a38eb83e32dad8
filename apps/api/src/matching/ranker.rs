//! Role ranking: scores every posting against the resume and keeps the best `top_n`.
//!
//! The resume is fitted as one extra document after all descriptions, so idf weights
//! account for its terms too.

use serde::Serialize;
use tracing::debug;

use crate::corpus::RoleCorpus;
use crate::matching::tfidf::{cosine, TfidfSpace};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleScore {
    pub role: String,
    pub score: f64,
    /// Position of the posting in the corpus.
    pub index: usize,
}

/// Ranked postings, best first. Ties keep corpus order; duplicate titles are kept.
pub fn score_roles(resume_text: &str, corpus: &RoleCorpus, top_n: usize) -> Vec<RoleScore> {
    if corpus.is_empty() {
        return Vec::new();
    }
    let top_n = top_n.max(1);

    let mut documents: Vec<&str> = corpus
        .entries()
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    documents.push(resume_text);

    let space = TfidfSpace::fit(documents.as_slice());
    let resume_index = documents.len() - 1;
    let Some(resume_vec) = space.vector(resume_index) else {
        return Vec::new();
    };

    let mut scored: Vec<RoleScore> = corpus
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| RoleScore {
            role: entry.title.clone(),
            score: space.vector(index).map_or(0.0, |v| cosine(resume_vec, v)),
            index,
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);

    debug!(
        candidates = corpus.len(),
        returned = scored.len(),
        best = scored.first().map(|s| s.score),
        "Ranked roles"
    );
    scored
}

/// Titles of the best `top_n` postings.
pub fn rank_roles(resume_text: &str, corpus: &RoleCorpus, top_n: usize) -> Vec<String> {
    score_roles(resume_text, corpus, top_n)
        .into_iter()
        .map(|s| s.role)
        .collect()
}
