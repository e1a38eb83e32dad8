//! TF-IDF vector space over a small document set.
//!
//! Weighting: raw term count times smoothed idf `ln((1 + n) / (1 + df)) + 1`, each
//! document vector L2-normalized. Vectors are sparse, sorted by term id.

use std::collections::HashMap;

use crate::matching::stop_words::is_stop_word;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercased tokens of two or more word characters, stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Sparse document vector: `(term_id, weight)` pairs sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    #[cfg(test)]
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity in [0, 1]; 0 when either vector is zero.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Fitted vector space: one vector per input document, in input order.
#[derive(Debug, Clone)]
pub struct TfidfSpace {
    vectors: Vec<SparseVector>,
}

impl TfidfSpace {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        let mut counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut tf: HashMap<usize, usize> = HashMap::new();
            for token in tokenize(doc.as_ref()) {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(token).or_insert(next_id);
                if id == doc_freq.len() {
                    doc_freq.push(0);
                }
                *tf.entry(id).or_insert(0) += 1;
            }
            for id in tf.keys() {
                doc_freq[*id] += 1;
            }
            counts.push(tf);
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|tf| {
                let mut entries: Vec<(usize, f64)> = tf
                    .into_iter()
                    .map(|(id, count)| (id, count as f64 * idf[id]))
                    .collect();
                entries.sort_by_key(|(id, _)| *id);
                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in entries.iter_mut() {
                        *w /= norm;
                    }
                }
                SparseVector { entries }
            })
            .collect();

        Self { vectors }
    }

    pub fn vector(&self, index: usize) -> Option<&SparseVector> {
        self.vectors.get(index)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_stop_words() {
        assert_eq!(
            tokenize("The Rust engineer, and a Go_lang fan!"),
            vec!["rust", "engineer", "go_lang", "fan"]
        );
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        assert_eq!(tokenize("C R x y 42 9"), vec!["42"]);
    }

    #[test]
    fn test_identical_documents_score_one() {
        let space = TfidfSpace::fit(&["rust tokio axum", "python django", "rust tokio axum"]);
        let sim = cosine(space.vector(0).unwrap(), space.vector(2).unwrap());
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        let space = TfidfSpace::fit(&["rust tokio", "python django"]);
        assert_eq!(cosine(space.vector(0).unwrap(), space.vector(1).unwrap()), 0.0);
    }

    #[test]
    fn test_stop_word_document_is_zero_vector() {
        let space = TfidfSpace::fit(&["the and of", "rust"]);
        let empty = space.vector(0).unwrap();
        assert!(empty.is_zero());
        assert_eq!(cosine(empty, space.vector(1).unwrap()), 0.0);
        assert_eq!(cosine(empty, empty), 0.0);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let space = TfidfSpace::fit(&["rust rust tokio", "tokio serde", "serde json json"]);
        for i in 0..space.len() {
            assert!((space.vector(i).unwrap().norm() - 1.0).abs() < 1e-9);
        }
        let terms: std::collections::HashSet<usize> = space
            .vectors
            .iter()
            .flat_map(|v| v.entries.iter().map(|(id, _)| *id))
            .collect();
        assert_eq!(terms.len(), 4);
    }

    #[test]
    fn test_smoothed_idf_weights_rare_terms_higher() {
        // "rust" appears in every document, "tokio" only in the first
        let space = TfidfSpace::fit(&["rust tokio", "rust", "rust"]);
        let v = space.vector(0).unwrap();
        let rust = v.entries.iter().find(|(id, _)| *id == 0).unwrap().1;
        let tokio = v.entries.iter().find(|(id, _)| *id == 1).unwrap().1;
        assert!(tokio > rust);

        // idf(rust) = 1, idf(tokio) = ln(4/2) + 1
        let expected = 1.0 / (1.0 + (2.0f64.ln() + 1.0).powi(2)).sqrt();
        assert!((rust - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_fits_empty_space() {
        let space = TfidfSpace::fit::<&str>(&[]);
        assert!(space.is_empty());
        assert!(space.vector(0).is_none());
    }
}
