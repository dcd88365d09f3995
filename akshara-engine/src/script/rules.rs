use super::ScriptRules;

/// Tamil (U+0B80–U+0BFF).
///
/// ஷ and ஸ join a preceding consonant + pulli into a conjunct (க்ஷ).
/// Aytham (ஃ) sits below the letter range but still belongs to the word.
pub fn tamil() -> ScriptRules {
    ScriptRules {
        name: "Tamil",
        block: 0x0B80..=0x0BFF,
        independent_vowels: 0x0B85..=0x0B94,
        consonants: 0x0B95..=0x0BB9,
        vowel_signs: 0x0BBE..=0x0BCC,
        // au length mark (ௗ)
        extra_signs: &[0x0BD7],
        virama: '\u{0BCD}',
        ligature_consonants: &[0x0BB8, 0x0BB7],
        non_terminating: &[0x0B83],
    }
}

/// Devanagari (U+0900–U+097F).
///
/// ष and ञ form the common conjuncts क्ष and ज्ञ.
pub fn devanagari() -> ScriptRules {
    ScriptRules {
        name: "Devanagari",
        block: 0x0900..=0x097F,
        independent_vowels: 0x0905..=0x0914,
        consonants: 0x0915..=0x0939,
        vowel_signs: 0x093E..=0x094C,
        // candrabindu, anusvara, visarga, nukta
        extra_signs: &[0x0901, 0x0902, 0x0903, 0x093C],
        virama: '\u{094D}',
        ligature_consonants: &[0x0937, 0x091E],
        non_terminating: &[],
    }
}
