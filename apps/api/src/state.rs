use std::sync::Arc;

use crate::config::Config;
use crate::corpus::RoleCorpus;
use crate::interview::question_bank::QuestionBank;
use crate::interview::store::SessionStore;
use crate::resume::decode::TextDecoder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup.
    pub corpus: Arc<RoleCorpus>,
    /// Why the corpus is empty, if loading fell back.
    pub corpus_diagnostic: Option<String>,
    /// Present only when QUESTION_BANK_PATH is configured.
    pub question_bank: Option<Arc<QuestionBank>>,
    pub sessions: SessionStore,
    /// Pluggable document decoder. Default: ContainerDecoder.
    pub decoder: Arc<dyn TextDecoder>,
}

#[cfg(test)]
impl AppState {
    /// State over an in-memory corpus with the default decoder.
    pub fn for_tests(corpus: RoleCorpus, question_bank: Option<QuestionBank>) -> Self {
        AppState {
            config: Config::for_tests(),
            corpus: Arc::new(corpus),
            corpus_diagnostic: None,
            question_bank: question_bank.map(Arc::new),
            sessions: SessionStore::new(),
            decoder: Arc::new(crate::resume::decode::ContainerDecoder),
        }
    }
}
