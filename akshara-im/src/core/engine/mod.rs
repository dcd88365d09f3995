//! Composition engine
//!
//! Owns one translator per enabled language and turns `(InputState, event)`
//! into a result the caller applies to its document. The engine keeps no
//! per-session state: every operation reads the state it is given and
//! returns the new composition inside the result.

mod commit;
mod input;
mod types;

pub use types::*;

#[cfg(test)]
mod tests;

use akshara_engine::{Composition, KeyTranslator, LanguageId, ScriptRules, TranslatorRegistry};
use tracing::debug;

use super::state::InputState;

/// The composition engine, shared read-only between sessions
pub struct CompositionEngine {
    registry: TranslatorRegistry,
    config: EngineConfig,
}

impl Default for CompositionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionEngine {
    /// Engine with every built-in translator and the default configuration
    pub fn new() -> Self {
        Self::with_registry(TranslatorRegistry::with_defaults(), EngineConfig::default())
    }

    /// Engine with every built-in translator
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_registry(TranslatorRegistry::with_defaults(), config)
    }

    /// Engine for the given languages only; others use the literal fallback
    pub fn for_languages(languages: &[LanguageId], config: EngineConfig) -> Self {
        Self::with_registry(TranslatorRegistry::for_languages(languages), config)
    }

    pub fn with_registry(registry: TranslatorRegistry, config: EngineConfig) -> Self {
        debug!("composition engine: {:?}", config);
        Self { registry, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Translator for `language`, or the literal fallback
    pub fn translator(&self, language: LanguageId) -> &dyn KeyTranslator {
        self.registry.get(language)
    }

    /// Script rules of the translator serving `language`
    pub fn rules(&self, language: LanguageId) -> Option<&ScriptRules> {
        self.translator(language).rules()
    }

    /// Whether a composition is long enough, and short enough, to be worth
    /// predicting.
    pub fn should_trigger_prediction(&self, composition: &Composition) -> bool {
        let len = composition.len();
        self.config.predictions_enabled
            && (self.config.min_trigger_len..=self.config.max_trigger_len).contains(&len)
    }

    /// Run one queued event.
    pub fn dispatch(&self, state: &InputState, event: &EngineEvent) -> EngineOutcome {
        match event {
            EngineEvent::Character(key) => {
                EngineOutcome::Composed(self.process_character(state, key))
            }
            EngineEvent::Delete => EngineOutcome::Deleted(self.process_delete(state)),
            EngineEvent::Space => EngineOutcome::Space(self.process_space(state)),
            EngineEvent::Return => EngineOutcome::Return(self.process_return(state)),
            EngineEvent::CommitCandidate(candidate) => {
                EngineOutcome::Committed(self.commit_candidate(state, candidate))
            }
        }
    }
}
