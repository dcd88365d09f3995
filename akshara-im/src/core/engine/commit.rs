//! Word boundaries: space, return and explicit candidate commits

use akshara_engine::Composition;
use tracing::debug;

use super::*;
use crate::core::candidate::PredictionCandidate;

impl CompositionEngine {
    /// Best prediction eligible for auto-commit on space
    fn auto_commit_candidate<'a>(&self, state: &'a InputState) -> Option<&'a PredictionCandidate> {
        let config = &self.config;
        if !(config.predictions_enabled && config.auto_commit_enabled) {
            return None;
        }
        let best = state.best_prediction.as_ref()?;
        if best.confidence <= config.auto_commit_threshold {
            return None;
        }
        if !config.auto_correct_enabled && !best.completes(state.composition.as_str()) {
            return None;
        }
        Some(best)
    }

    /// Space: insert a space, committing the composition or its best
    /// prediction first.
    pub fn process_space(&self, state: &InputState) -> SpaceResult {
        if state.composition.is_empty() {
            return SpaceResult {
                new_composition: Composition::new(),
                display_text: " ".to_string(),
                replace_count: 0,
                action: ActionType::InsertSpace,
            };
        }

        if let Some(best) = self.auto_commit_candidate(state) {
            debug!(
                "auto-committing \"{}\" for \"{}\" (confidence {:.2})",
                best.word,
                state.composition.as_str(),
                best.confidence
            );
            return SpaceResult {
                new_composition: Composition::new(),
                display_text: format!("{} ", best.word),
                replace_count: state.composition.len(),
                action: ActionType::CommitWord,
            };
        }

        SpaceResult {
            new_composition: Composition::new(),
            display_text: " ".to_string(),
            replace_count: 0,
            action: ActionType::CommitWord,
        }
    }

    /// Return: insert a newline, committing the composition as typed.
    pub fn process_return(&self, state: &InputState) -> ReturnResult {
        let action = if state.composition.is_empty() {
            ActionType::InsertReturn
        } else {
            ActionType::CommitAndReturn
        };
        ReturnResult {
            new_composition: Composition::new(),
            display_text: "\n".to_string(),
            replace_count: 0,
            action,
        }
    }

    /// Replace the composed text with the candidate's word.
    pub fn commit_candidate(
        &self,
        state: &InputState,
        candidate: &PredictionCandidate,
    ) -> CommitResult {
        debug!(
            "committing candidate \"{}\" over \"{}\"",
            candidate.word,
            state.composition.as_str()
        );
        CommitResult {
            new_composition: Composition::new(),
            display_text: candidate.word.clone(),
            replace_count: state.composition.len(),
            action: ActionType::CommitCandidate,
        }
    }
}
