//! Key translators: per-language composition state machines.
//!
//! A translator maps `(key code, shift, composition)` to a new composition
//! plus the edit the host document needs. Translators keep no per-word
//! state; everything they need arrives in the [`Composition`].

mod indic;
mod literal;
mod tamil99;

pub use indic::IndicTranslator;
pub use literal::LiteralTranslator;
pub use tamil99::Tamil99Translator;

use serde::Serialize;

use crate::composition::Composition;
use crate::script::ScriptRules;

/// Whether a key continued the composition or ended it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationAction {
    Compose,
    Terminate,
}

/// Result of translating one key.
///
/// The caller removes `replace_count` trailing scalars from the document,
/// then inserts `display_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub new_composition: Composition,
    pub display_text: String,
    pub replace_count: usize,
    pub action: TranslationAction,
}

impl Translation {
    /// Append `text` to the composition.
    pub fn append(composition: &Composition, text: &str) -> Self {
        Self::replace(composition, 0, text)
    }

    /// Replace the last `count` scalars of the composition with `text`.
    pub fn replace(composition: &Composition, count: usize, text: &str) -> Self {
        Self {
            new_composition: composition.edit(count, text),
            display_text: text.to_string(),
            replace_count: count,
            action: TranslationAction::Compose,
        }
    }

    /// End the composition, emitting `key` literally if it is a scalar.
    pub fn terminate(key: Option<char>) -> Self {
        Self {
            new_composition: Composition::new(),
            display_text: key.map(String::from).unwrap_or_default(),
            replace_count: 0,
            action: TranslationAction::Terminate,
        }
    }
}

/// Result of a delete press.
///
/// The caller removes `characters_to_delete` trailing scalars, then inserts
/// `display_text` (non-empty when the undone step had replaced text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTranslation {
    pub new_composition: Composition,
    pub characters_to_delete: usize,
    pub display_text: String,
}

impl DeleteTranslation {
    /// Delete one committed scalar; the composition is left untouched.
    pub fn committed_scalar(composition: &Composition) -> Self {
        Self {
            new_composition: composition.clone(),
            characters_to_delete: 1,
            display_text: String::new(),
        }
    }

    /// Undo the most recent recorded step if it still fits the composition.
    pub fn undo_step(composition: &Composition) -> Option<Self> {
        let step = composition.last_step()?;
        let new_composition = composition.undo()?;
        Some(Self {
            new_composition,
            characters_to_delete: step.inserted,
            display_text: step.replaced.clone(),
        })
    }
}

/// Capability shared by every per-language translator.
pub trait KeyTranslator: Send + Sync {
    /// Translate one key against the current composition.
    fn translate_key(
        &self,
        key_code: i32,
        is_shifted: bool,
        composition: &Composition,
    ) -> Translation;

    /// Undo one logical step of the composition.
    fn process_delete(&self, composition: &Composition) -> DeleteTranslation;

    /// Script rules paired with this translator, if it composes a script
    fn rules(&self) -> Option<&ScriptRules> {
        None
    }

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Convert a non-negative key code into a scalar.
pub(crate) fn key_char(key_code: i32) -> Option<char> {
    u32::try_from(key_code).ok().and_then(char::from_u32)
}
