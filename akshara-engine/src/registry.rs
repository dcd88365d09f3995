//! Translator registry keyed by language

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::language::LanguageId;
use crate::translator::{IndicTranslator, KeyTranslator, LiteralTranslator, Tamil99Translator};

/// Translators constructed once at startup, one per enabled language.
///
/// Languages without an entry resolve to the literal fallback.
pub struct TranslatorRegistry {
    translators: HashMap<LanguageId, Arc<dyn KeyTranslator>>,
    fallback: LiteralTranslator,
}

impl TranslatorRegistry {
    /// An empty registry: every language uses the literal fallback
    pub fn new() -> Self {
        Self {
            translators: HashMap::new(),
            fallback: LiteralTranslator::new(),
        }
    }

    /// Registry with every built-in translator
    pub fn with_defaults() -> Self {
        Self::for_languages(&LanguageId::ALL)
    }

    /// Registry with the built-in translators for `languages` only
    pub fn for_languages(languages: &[LanguageId]) -> Self {
        let mut registry = Self::new();
        for &language in languages {
            if let Some(translator) = builtin(language) {
                registry.register(language, translator);
            }
        }
        registry
    }

    pub fn register(&mut self, language: LanguageId, translator: Arc<dyn KeyTranslator>) {
        debug!("registering {} translator for {}", translator.name(), language);
        self.translators.insert(language, translator);
    }

    /// Translator for `language`, or the literal fallback
    pub fn get(&self, language: LanguageId) -> &dyn KeyTranslator {
        match self.translators.get(&language) {
            Some(translator) => translator.as_ref(),
            None => &self.fallback,
        }
    }

    /// Whether `language` has a dedicated translator
    pub fn contains(&self, language: LanguageId) -> bool {
        self.translators.contains_key(&language)
    }
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn builtin(language: LanguageId) -> Option<Arc<dyn KeyTranslator>> {
    match language {
        LanguageId::Tamil => Some(Arc::new(IndicTranslator::tamil())),
        LanguageId::Tamil99 => Some(Arc::new(Tamil99Translator::new())),
        LanguageId::Hindi => Some(Arc::new(IndicTranslator::hindi())),
        LanguageId::English
        | LanguageId::Malayalam
        | LanguageId::Telugu
        | LanguageId::Kannada
        | LanguageId::Bengali => None,
    }
}
