pub mod composition;
pub mod language;
pub mod registry;
pub mod script;
pub mod translator;

pub use composition::{ComposeStep, Composition};
pub use language::LanguageId;
pub use registry::TranslatorRegistry;
pub use script::{LetterClass, ScriptRules};
pub use translator::{
    DeleteTranslation, IndicTranslator, KeyTranslator, LiteralTranslator, Tamil99Translator,
    Translation, TranslationAction,
};
