//! Role matching: lexical TF-IDF similarity between a resume and a role corpus.

pub mod handlers;
pub mod ranker;
pub mod stop_words;
pub mod tfidf;
