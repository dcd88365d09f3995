//! Prediction candidates and providers
//!
//! Ranking is done by the provider; the engine only reads `confidence` to
//! decide auto-commit on space.

use std::collections::HashMap;

use akshara_engine::LanguageId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Where a prediction came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PredictionKind {
    /// Word frequency
    #[default]
    Frequency,
    /// Surrounding text
    Context,
    /// User history
    User,
}

/// A single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionCandidate {
    pub word: String,
    /// Provider-specific ranking score
    pub score: f64,
    /// Probability in 0.0..=1.0 that this is the intended word
    pub confidence: f64,
    pub kind: PredictionKind,
}

impl PredictionCandidate {
    pub fn new(word: impl Into<String>, confidence: f64) -> Self {
        Self {
            word: word.into(),
            score: confidence,
            confidence,
            kind: PredictionKind::default(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn with_kind(mut self, kind: PredictionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether the word extends `composition` rather than correcting it
    pub fn completes(&self, composition: &str) -> bool {
        self.word.starts_with(composition)
    }
}

/// Source of predictions for a composition.
pub trait PredictionProvider: Send + Sync {
    /// Candidates for `composition`, best first.
    fn predictions(&self, composition: &str, language: LanguageId) -> Vec<PredictionCandidate>;
}

/// Prefix predictor over an in-memory word list.
///
/// A candidate's confidence is its share of the total frequency of all
/// words matching the prefix.
#[derive(Debug, Clone)]
pub struct WordListPredictor {
    words: HashMap<LanguageId, Vec<(String, u64)>>,
    limit: usize,
}

impl Default for WordListPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl WordListPredictor {
    /// Default number of candidates returned
    pub const DEFAULT_LIMIT: usize = 5;

    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Add a word, summing frequencies of duplicates.
    pub fn add_word(&mut self, language: LanguageId, word: impl Into<String>, frequency: u64) {
        let word = word.into();
        let list = self.words.entry(language).or_default();
        match list.iter_mut().find(|(w, _)| *w == word) {
            Some((_, f)) => *f = f.saturating_add(frequency),
            None => list.push((word, frequency)),
        }
    }

    /// Load `word<TAB>frequency` lines; a bare word counts once.
    ///
    /// Blank lines and `#` comments are ignored, malformed lines are
    /// skipped with a warning. Returns the number of words added.
    pub fn load_tsv(&mut self, language: LanguageId, content: &str) -> usize {
        let mut added = 0;
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let word = fields.next().unwrap_or_default().trim();
            let frequency = match fields.next().map(|f| f.trim().parse::<u64>()) {
                None => 1,
                Some(Ok(f)) => f,
                Some(Err(e)) => {
                    warn!("word list line {}: bad frequency: {}", lineno + 1, e);
                    continue;
                }
            };
            if word.is_empty() {
                continue;
            }
            self.add_word(language, word, frequency);
            added += 1;
        }
        debug!("loaded {} {} words", added, language);
        added
    }

    pub fn len(&self, language: LanguageId) -> usize {
        self.words.get(&language).map_or(0, Vec::len)
    }
}

impl PredictionProvider for WordListPredictor {
    fn predictions(&self, composition: &str, language: LanguageId) -> Vec<PredictionCandidate> {
        let Some(words) = self.words.get(&language) else {
            return Vec::new();
        };
        if composition.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&(String, u64)> = words
            .iter()
            .filter(|(word, _)| word.starts_with(composition))
            .collect();
        let total: u64 = matches.iter().map(|(_, f)| *f).sum();
        if total == 0 {
            return Vec::new();
        }

        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches
            .into_iter()
            .take(self.limit)
            .map(|(word, frequency)| {
                PredictionCandidate::new(word.clone(), *frequency as f64 / total as f64)
                    .with_score(*frequency as f64)
            })
            .collect()
    }
}
