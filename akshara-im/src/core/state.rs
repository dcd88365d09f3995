//! Per-session input state
//!
//! Owned by the caller and passed into every engine operation. The engine
//! reads it and returns the next composition inside its result; the caller
//! folds the result back in with [`InputState::apply`].

use akshara_engine::{Composition, LanguageId};
use serde::{Deserialize, Serialize};

use super::candidate::PredictionCandidate;
use super::engine::EngineOutcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub language: LanguageId,
    /// The word being typed
    pub composition: Composition,
    /// Document text before the cursor, used to resume a word
    pub context_before: Option<String>,
    /// Highest-ranked prediction for the current composition
    pub best_prediction: Option<PredictionCandidate>,
}

impl InputState {
    pub fn new(language: LanguageId) -> Self {
        Self {
            language,
            composition: Composition::new(),
            context_before: None,
            best_prediction: None,
        }
    }

    pub fn with_composition(mut self, composition: impl Into<Composition>) -> Self {
        self.composition = composition.into();
        self
    }

    pub fn with_context_before(mut self, context: impl Into<String>) -> Self {
        self.context_before = Some(context.into());
        self
    }

    pub fn with_best_prediction(mut self, candidate: PredictionCandidate) -> Self {
        self.best_prediction = Some(candidate);
        self
    }

    pub fn is_composing(&self) -> bool {
        !self.composition.is_empty()
    }

    /// Fold an engine result into the state.
    ///
    /// The prediction is dropped whenever the composition changes; the
    /// caller refreshes it.
    pub fn apply(&mut self, outcome: &EngineOutcome) {
        let next = outcome.new_composition();
        if next.as_str() != self.composition.as_str() {
            self.best_prediction = None;
        }
        self.composition = next.clone();
    }

    /// End the current word without touching the document.
    pub fn reset(&mut self) {
        self.composition = Composition::new();
        self.best_prediction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::{ActionType, SpaceResult};

    #[test]
    fn test_new_state_is_idle() {
        let state = InputState::new(LanguageId::Tamil);
        assert!(!state.is_composing());
        assert!(state.context_before.is_none());
        assert!(state.best_prediction.is_none());
    }

    #[test]
    fn test_apply_word_boundary() {
        let mut state = InputState::new(LanguageId::Tamil)
            .with_composition("கா")
            .with_best_prediction(PredictionCandidate::new("காலை", 0.9));
        state.apply(&EngineOutcome::Space(SpaceResult {
            new_composition: Composition::new(),
            display_text: " ".to_string(),
            replace_count: 0,
            action: ActionType::CommitWord,
        }));
        assert!(!state.is_composing());
        assert!(state.best_prediction.is_none());
    }

    #[test]
    fn test_reset() {
        let mut state = InputState::new(LanguageId::Tamil)
            .with_composition("க")
            .with_context_before("abc");
        state.reset();
        assert!(!state.is_composing());
        assert_eq!(state.context_before.as_deref(), Some("abc"));
    }
}
