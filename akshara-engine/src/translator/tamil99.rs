use tracing::trace;

use super::{DeleteTranslation, IndicTranslator, KeyTranslator, Translation, key_char};
use crate::composition::Composition;
use crate::script::{LetterClass, ScriptRules, trailing_cluster};

/// Independent vowel → vowel sign, used when a vowel key follows a consonant.
/// அ has no sign (the consonant already carries it) and is typed as is.
const VOWEL_SIGNS: &[(char, char)] = &[
    ('ஆ', '\u{0BBE}'),
    ('இ', '\u{0BBF}'),
    ('ஈ', '\u{0BC0}'),
    ('உ', '\u{0BC1}'),
    ('ஊ', '\u{0BC2}'),
    ('எ', '\u{0BC6}'),
    ('ஏ', '\u{0BC7}'),
    ('ஐ', '\u{0BC8}'),
    ('ஒ', '\u{0BCA}'),
    ('ஓ', '\u{0BCB}'),
    ('ஔ', '\u{0BCC}'),
];

/// Nasal followed by its stop gets an automatic pulli (ங்க, ந்த, ...).
const NASAL_STOP_PAIRS: &[(char, char)] = &[
    ('ங', 'க'),
    ('ஞ', 'ச'),
    ('ண', 'ட'),
    ('ந', 'த'),
    ('ம', 'ப'),
    ('ன', 'ற'),
];

/// Tamil99 keyboard scheme.
///
/// The layout has only letter keys: vowel keys after a consonant become
/// vowel signs, and doubled consonants or nasal-stop pairs insert the pulli
/// automatically. Everything else follows the direct Tamil rules.
#[derive(Debug, Clone)]
pub struct Tamil99Translator {
    inner: IndicTranslator,
}

impl Tamil99Translator {
    pub fn new() -> Self {
        Self {
            inner: IndicTranslator::new("tamil99", crate::script::tamil()),
        }
    }

    fn vowel_sign(vowel: char) -> Option<char> {
        VOWEL_SIGNS
            .iter()
            .find(|(v, _)| *v == vowel)
            .map(|(_, sign)| *sign)
    }

    fn takes_auto_pulli(previous: char, next: char) -> bool {
        previous == next || NASAL_STOP_PAIRS.contains(&(previous, next))
    }
}

impl Default for Tamil99Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTranslator for Tamil99Translator {
    fn translate_key(
        &self,
        key_code: i32,
        is_shifted: bool,
        composition: &Composition,
    ) -> Translation {
        let Some(ch) = key_char(key_code) else {
            return self.inner.translate_key(key_code, is_shifted, composition);
        };
        let rules = self.inner.script();
        let class = rules.classify_char(ch);
        let chars = composition.chars();
        let Some(last) = trailing_cluster(rules, &chars) else {
            return self.inner.translate_key(key_code, is_shifted, composition);
        };

        if class == LetterClass::IndependentVowel
            && last.is_bare(rules)
            && let Some(sign) = Self::vowel_sign(ch)
        {
            trace!("tamil99: vowel {} becomes sign after {}", ch, last.text());
            let mut text = last.text();
            text.push(sign);
            return Translation::replace(composition, last.len(), &text);
        }

        if class.is_consonant()
            && let [previous] = last.chars.as_slice()
            && rules.is_consonant(*previous)
            && Self::takes_auto_pulli(*previous, ch)
        {
            trace!("tamil99: automatic pulli between {} and {}", previous, ch);
            let text: String = [*previous, rules.virama, ch].into_iter().collect();
            return Translation::replace(composition, 1, &text);
        }

        self.inner.compose_or_terminate(ch, class, composition)
    }

    fn process_delete(&self, composition: &Composition) -> DeleteTranslation {
        self.inner.process_delete(composition)
    }

    fn rules(&self) -> Option<&ScriptRules> {
        Some(self.inner.script())
    }

    fn name(&self) -> &'static str {
        "tamil99"
    }
}
