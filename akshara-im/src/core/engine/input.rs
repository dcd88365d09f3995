//! Character and delete handling

use akshara_engine::{Composition, ScriptRules, TranslationAction};
use tracing::{debug, trace};

use super::*;
use crate::core::keycode::KeyEvent;

/// Trailing word of `context`: everything after the last whitespace.
fn trailing_word(context: &str) -> &str {
    match context.rfind(char::is_whitespace) {
        Some(i) => {
            let ws_len = context[i..].chars().next().map_or(1, char::len_utf8);
            &context[i + ws_len..]
        }
        None => context,
    }
}

impl CompositionEngine {
    /// Composition to translate against.
    ///
    /// An empty composition resumes the word before the cursor when that
    /// word lies entirely inside the active script's block. Deleting every
    /// step typed on a resumed word leaves the composition empty again.
    pub(super) fn starting_composition(
        &self,
        state: &InputState,
        rules: Option<&ScriptRules>,
    ) -> Composition {
        if !state.composition.is_empty() {
            return state.composition.clone();
        }
        let (Some(context), Some(rules)) = (state.context_before.as_deref(), rules) else {
            return Composition::new();
        };
        let word = trailing_word(context);
        if word.is_empty() || !word.chars().all(|ch| rules.in_block(ch)) {
            return Composition::new();
        }
        debug!("resuming composition from context: \"{}\"", word);
        Composition::resumed(word)
    }

    /// Translate one character key.
    pub fn process_character(&self, state: &InputState, key: &KeyEvent) -> CompositionResult {
        let translator = self.translator(state.language);
        let composition = self.starting_composition(state, translator.rules());

        let t = translator.translate_key(key.key_code.0, key.is_shifted, &composition);
        trace!(
            "{} {}: \"{}\" → \"{}\" (replace {}, insert \"{}\")",
            translator.name(),
            key.key_code,
            composition.as_str(),
            t.new_composition.as_str(),
            t.replace_count,
            t.display_text
        );

        let action = match t.action {
            TranslationAction::Compose => ActionType::Compose,
            TranslationAction::Terminate => ActionType::Terminate,
        };
        CompositionResult {
            should_trigger_prediction: self.should_trigger_prediction(&t.new_composition),
            new_composition: t.new_composition,
            display_text: t.display_text,
            replace_count: t.replace_count,
            action,
        }
    }

    /// Undo one logical step, or delete one committed scalar when nothing
    /// is composed.
    pub fn process_delete(&self, state: &InputState) -> DeleteResult {
        let translator = self.translator(state.language);
        let d = translator.process_delete(&state.composition);
        trace!(
            "{} delete: \"{}\" → \"{}\" (delete {}, insert \"{}\")",
            translator.name(),
            state.composition.as_str(),
            d.new_composition.as_str(),
            d.characters_to_delete,
            d.display_text
        );
        DeleteResult {
            should_trigger_prediction: self.should_trigger_prediction(&d.new_composition),
            new_composition: d.new_composition,
            display_text: d.display_text,
            delete_count: d.characters_to_delete,
            action: ActionType::Delete,
        }
    }
}
