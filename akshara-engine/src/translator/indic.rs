use tracing::trace;
use unicode_normalization::UnicodeNormalization;

use super::{DeleteTranslation, KeyTranslator, Translation, key_char};
use crate::composition::Composition;
use crate::script::{self, Cluster, LetterClass, ScriptRules, trailing_cluster};

/// Direct-layout translator for a Brahmic script.
///
/// Keys carry the script's own code points. A vowel sign typed after a bare
/// consonant rewrites the consonant into a consonant+sign cluster, and a
/// ligature consonant typed after consonant+virama rewrites both into a
/// conjunct.
#[derive(Debug, Clone)]
pub struct IndicTranslator {
    name: &'static str,
    rules: ScriptRules,
}

impl IndicTranslator {
    pub fn new(name: &'static str, rules: ScriptRules) -> Self {
        Self { name, rules }
    }

    pub fn tamil() -> Self {
        Self::new("tamil", script::tamil())
    }

    pub fn hindi() -> Self {
        Self::new("hindi", script::devanagari())
    }

    pub fn script(&self) -> &ScriptRules {
        &self.rules
    }

    pub(crate) fn compose_or_terminate(
        &self,
        ch: char,
        class: LetterClass,
        composition: &Composition,
    ) -> Translation {
        if class == LetterClass::Terminator {
            return Translation::terminate(Some(ch));
        }
        self.compose(ch, class, composition)
    }

    /// Compose a scalar that belongs to the script.
    pub(crate) fn compose(
        &self,
        ch: char,
        class: LetterClass,
        composition: &Composition,
    ) -> Translation {
        let chars = composition.chars();
        let Some(last) = trailing_cluster(&self.rules, &chars) else {
            return Translation::append(composition, &ch.to_string());
        };

        match class {
            LetterClass::VowelSign if last.is_bare(&self.rules) => {
                let mut text = last.text();
                text.push(ch);
                Translation::replace(composition, last.len(), &text)
            }
            LetterClass::VowelSign if last.has_sign(&self.rules) => {
                match self.compose_two_part_sign(&last, ch) {
                    Some(text) => Translation::replace(composition, last.len(), &text),
                    None => Translation::append(composition, &ch.to_string()),
                }
            }
            LetterClass::SpecialConsonant if last.is_pure_consonant(&self.rules) => {
                let mut text = last.text();
                text.push(ch);
                Translation::replace(composition, last.len(), &text)
            }
            _ => Translation::append(composition, &ch.to_string()),
        }
    }

    /// Merge a sign into the cluster's existing sign when the pair has a
    /// canonical composition (ெ + ா → ொ).
    fn compose_two_part_sign(&self, cluster: &Cluster, sign: char) -> Option<String> {
        let (base, existing) = cluster.chars.split_at(cluster.len() - 1);
        let composed: Vec<char> = [existing[0], sign].into_iter().nfc().collect();
        match composed.as_slice() {
            [merged] if self.rules.is_vowel_sign(*merged) => {
                Some(base.iter().chain(std::iter::once(merged)).collect())
            }
            _ => None,
        }
    }

    /// Undo the last cluster using the classification rules alone.
    ///
    /// Clusters of one scalar, and clusters ending in virama, were built by
    /// appending; every other cluster was built by rewriting its prefix.
    pub(crate) fn derive_delete(&self, composition: &Composition) -> DeleteTranslation {
        let chars = composition.chars();
        let Some(cluster) = trailing_cluster(&self.rules, &chars) else {
            return DeleteTranslation::committed_scalar(composition);
        };

        if cluster.len() == 1 || cluster.ends_in_virama(&self.rules) {
            return DeleteTranslation {
                new_composition: composition.replace_from_end(1, ""),
                characters_to_delete: 1,
                display_text: String::new(),
            };
        }

        let previous: String = cluster.chars[..cluster.len() - 1].iter().collect();
        DeleteTranslation {
            new_composition: composition.replace_from_end(cluster.len(), &previous),
            characters_to_delete: cluster.len(),
            display_text: previous,
        }
    }
}

impl KeyTranslator for IndicTranslator {
    fn translate_key(
        &self,
        key_code: i32,
        _is_shifted: bool,
        composition: &Composition,
    ) -> Translation {
        let Some(ch) = key_char(key_code) else {
            trace!("{}: key code {} is not a scalar", self.name, key_code);
            return Translation::terminate(None);
        };

        let class = self.rules.classify_char(ch);
        trace!(
            "{}: key U+{:04X} {:?} on \"{}\"",
            self.name,
            key_code,
            class,
            composition.as_str()
        );

        self.compose_or_terminate(ch, class, composition)
    }

    fn process_delete(&self, composition: &Composition) -> DeleteTranslation {
        if composition.is_empty() {
            return DeleteTranslation::committed_scalar(composition);
        }
        DeleteTranslation::undo_step(composition).unwrap_or_else(|| self.derive_delete(composition))
    }

    fn rules(&self) -> Option<&ScriptRules> {
        Some(&self.rules)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::TranslationAction;

    fn type_keys(translator: &IndicTranslator, keys: &str) -> Translation {
        let mut comp = Composition::new();
        let mut last = None;
        for ch in keys.chars() {
            let t = translator.translate_key(ch as i32, false, &comp);
            comp = t.new_composition.clone();
            last = Some(t);
        }
        last.expect("at least one key")
    }

    #[test]
    fn test_first_key_starts_composition() {
        let t = type_keys(&IndicTranslator::tamil(), "க");
        assert_eq!(t.new_composition.as_str(), "க");
        assert_eq!(t.display_text, "க");
        assert_eq!(t.replace_count, 0);
        assert_eq!(t.action, TranslationAction::Compose);
    }

    #[test]
    fn test_vowel_sign_replaces_consonant() {
        let t = type_keys(&IndicTranslator::tamil(), "மக\u{0BBE}");
        assert_eq!(t.new_composition.as_str(), "மகா");
        assert_eq!(t.display_text, "கா");
        assert_eq!(t.replace_count, 1);
    }

    #[test]
    fn test_virama_appends() {
        let t = type_keys(&IndicTranslator::tamil(), "க\u{0BCD}");
        assert_eq!(t.new_composition.as_str(), "க்");
        assert_eq!(t.display_text, "\u{0BCD}");
        assert_eq!(t.replace_count, 0);
    }

    #[test]
    fn test_special_consonant_forms_conjunct() {
        let t = type_keys(&IndicTranslator::tamil(), "க\u{0BCD}ஷ");
        assert_eq!(t.new_composition.as_str(), "க்ஷ");
        assert_eq!(t.display_text, "க்ஷ");
        assert_eq!(t.replace_count, 2);
    }

    #[test]
    fn test_sign_on_conjunct() {
        let t = type_keys(&IndicTranslator::tamil(), "க\u{0BCD}ஷ\u{0BBE}");
        assert_eq!(t.new_composition.as_str(), "க்ஷா");
        assert_eq!(t.replace_count, 3);
        assert_eq!(t.display_text, "க்ஷா");
    }

    #[test]
    fn test_plain_consonant_after_virama_starts_new_cluster() {
        let t = type_keys(&IndicTranslator::tamil(), "க\u{0BCD}ம");
        assert_eq!(t.new_composition.as_str(), "க்ம");
        assert_eq!(t.display_text, "ம");
        assert_eq!(t.replace_count, 0);
    }

    #[test]
    fn test_two_part_sign_composes() {
        let t = type_keys(&IndicTranslator::tamil(), "க\u{0BC6}\u{0BBE}");
        assert_eq!(t.new_composition.as_str(), "\u{0B95}\u{0BCA}");
        assert_eq!(t.replace_count, 2);
    }

    #[test]
    fn test_unrelated_sign_after_sign_appends() {
        let t = type_keys(&IndicTranslator::tamil(), "கா\u{0BBF}");
        assert_eq!(t.new_composition.as_str(), "காி");
        assert_eq!(t.replace_count, 0);
    }

    #[test]
    fn test_out_of_block_key_terminates() {
        let tamil = IndicTranslator::tamil();
        let t = tamil.translate_key(0x0041, false, &Composition::from_text("க"));
        assert_eq!(t.action, TranslationAction::Terminate);
        assert!(t.new_composition.is_empty());
        assert_eq!(t.display_text, "A");
    }

    #[test]
    fn test_negative_key_terminates_without_text() {
        let tamil = IndicTranslator::tamil();
        let t = tamil.translate_key(-1, false, &Composition::from_text("க"));
        assert_eq!(t.action, TranslationAction::Terminate);
        assert_eq!(t.display_text, "");
    }

    #[test]
    fn test_delete_undoes_sign_replacement() {
        let tamil = IndicTranslator::tamil();
        let t = type_keys(&tamil, "க\u{0BBE}");
        let d = tamil.process_delete(&t.new_composition);
        assert_eq!(d.new_composition.as_str(), "க");
        assert_eq!(d.characters_to_delete, 2);
        assert_eq!(d.display_text, "க");
    }

    #[test]
    fn test_delete_undoes_two_part_sign() {
        let tamil = IndicTranslator::tamil();
        let t = type_keys(&tamil, "க\u{0BC6}\u{0BBE}");
        let d = tamil.process_delete(&t.new_composition);
        assert_eq!(d.new_composition.as_str(), "கெ");
    }

    #[test]
    fn test_derived_delete_of_conjunct() {
        let tamil = IndicTranslator::tamil();
        let d = tamil.process_delete(&Composition::from_text("அக்ஷ"));
        assert_eq!(d.characters_to_delete, 3);
        assert_eq!(d.display_text, "க்");
        assert_eq!(d.new_composition.as_str(), "அக்");
    }

    #[test]
    fn test_derived_delete_walks_back_one_step_at_a_time() {
        let tamil = IndicTranslator::tamil();
        let mut comp = Composition::from_text("க்ஷா");
        let mut seen = Vec::new();
        while !comp.is_empty() {
            let d = tamil.process_delete(&comp);
            seen.push(d.characters_to_delete);
            comp = d.new_composition;
        }
        // க்ஷா → க்ஷ → க் → க → ""
        assert_eq!(seen, vec![4, 3, 1, 1]);
    }

    #[test]
    fn test_delete_on_empty_removes_committed_scalar() {
        let d = IndicTranslator::tamil().process_delete(&Composition::new());
        assert_eq!(d.characters_to_delete, 1);
        assert!(d.new_composition.is_empty());
        assert_eq!(d.display_text, "");
    }

    #[test]
    fn test_hindi_conjunct() {
        let t = type_keys(&IndicTranslator::hindi(), "क\u{094D}ष");
        assert_eq!(t.new_composition.as_str(), "क्ष");
        assert_eq!(t.replace_count, 2);
    }

    #[test]
    fn test_hindi_anusvara_after_sign_appends() {
        let t = type_keys(&IndicTranslator::hindi(), "का\u{0902}");
        assert_eq!(t.new_composition.as_str(), "कां");
        assert_eq!(t.replace_count, 0);
    }
}
