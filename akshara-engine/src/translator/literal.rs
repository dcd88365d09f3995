use tracing::trace;

use super::{DeleteTranslation, KeyTranslator, Translation, key_char};
use crate::composition::Composition;

/// Fallback for languages without a dedicated translator.
///
/// Every key inserts its own scalar (ASCII letters upper-cased while
/// shifted) and delete removes exactly one scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralTranslator;

impl LiteralTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl KeyTranslator for LiteralTranslator {
    fn translate_key(
        &self,
        key_code: i32,
        is_shifted: bool,
        composition: &Composition,
    ) -> Translation {
        let Some(ch) = key_char(key_code) else {
            trace!("literal: key code {} is not a scalar", key_code);
            return Translation::terminate(None);
        };
        let ch = if is_shifted { ch.to_ascii_uppercase() } else { ch };
        Translation::append(composition, &ch.to_string())
    }

    fn process_delete(&self, composition: &Composition) -> DeleteTranslation {
        if composition.is_empty() {
            return DeleteTranslation::committed_scalar(composition);
        }
        DeleteTranslation {
            new_composition: composition.replace_from_end(1, ""),
            characters_to_delete: 1,
            display_text: String::new(),
        }
    }

    fn name(&self) -> &'static str {
        "literal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::TranslationAction;

    #[test]
    fn test_appends_literal_scalar() {
        let comp = Composition::from_text("ab");
        let t = LiteralTranslator.translate_key('c' as i32, false, &comp);
        assert_eq!(t.new_composition.as_str(), "abc");
        assert_eq!(t.display_text, "c");
        assert_eq!(t.replace_count, 0);
        assert_eq!(t.action, TranslationAction::Compose);
    }

    #[test]
    fn test_shift_uppercases_ascii() {
        let t = LiteralTranslator.translate_key('q' as i32, true, &Composition::new());
        assert_eq!(t.display_text, "Q");
    }

    #[test]
    fn test_shift_leaves_other_scripts_alone() {
        let t = LiteralTranslator.translate_key('മ' as i32, true, &Composition::new());
        assert_eq!(t.display_text, "മ");
    }

    #[test]
    fn test_delete_removes_one_scalar() {
        let t = LiteralTranslator.translate_key('ക' as i32, false, &Composition::from_text("മ"));
        let d = LiteralTranslator.process_delete(&t.new_composition);
        assert_eq!(d.new_composition.as_str(), "മ");
        assert_eq!(d.characters_to_delete, 1);
        assert_eq!(d.display_text, "");
    }

    #[test]
    fn test_invalid_key_terminates() {
        let t = LiteralTranslator.translate_key(-3, false, &Composition::from_text("ab"));
        assert_eq!(t.action, TranslationAction::Terminate);
        assert!(t.new_composition.is_empty());
    }
}
