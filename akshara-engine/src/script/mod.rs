//! Script rule sets: code point classification and cluster boundaries

mod cluster;
mod rules;

pub use cluster::{Cluster, trailing_cluster};
pub use rules::{devanagari, tamil};

use std::ops::RangeInclusive;

/// Classification of a key code against a script's rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterClass {
    IndependentVowel,
    Consonant,
    /// A consonant that forms a conjunct when it follows consonant + virama
    SpecialConsonant,
    VowelSign,
    Virama,
    /// Inside the script but not part of any combination (digits, marks)
    Other,
    /// Cannot take part in any further combination; ends the composition
    Terminator,
}

impl LetterClass {
    /// Consonant or special consonant
    pub fn is_consonant(&self) -> bool {
        matches!(self, LetterClass::Consonant | LetterClass::SpecialConsonant)
    }
}

/// Pure tables describing one script's code points.
///
/// Built once per script and never mutated.
#[derive(Debug, Clone)]
pub struct ScriptRules {
    pub name: &'static str,
    /// Whole Unicode block, used to decide whether text belongs to the script
    pub block: RangeInclusive<u32>,
    pub independent_vowels: RangeInclusive<u32>,
    pub consonants: RangeInclusive<u32>,
    pub vowel_signs: RangeInclusive<u32>,
    /// Signs outside `vowel_signs` that still attach to a base (length marks, anusvara)
    pub extra_signs: &'static [u32],
    pub virama: char,
    /// Consonants that join a preceding consonant + virama into a conjunct
    pub ligature_consonants: &'static [u32],
    /// Code points outside the letter range that must not end a composition
    pub non_terminating: &'static [u32],
}

impl ScriptRules {
    /// First letter of the script (start of the letter range)
    pub fn letter_start(&self) -> u32 {
        *self.independent_vowels.start()
    }

    /// Last code point of the sign range
    pub fn sign_end(&self) -> u32 {
        (*self.vowel_signs.end()).max(self.virama as u32)
    }

    /// Whether `ch` lies inside the script's Unicode block
    pub fn in_block(&self, ch: char) -> bool {
        self.block.contains(&(ch as u32))
    }

    /// Whether a key code ends the composition.
    ///
    /// Codes below the first letter, or above the sign range, terminate
    /// unless the rule set lists them as exceptions.
    pub fn is_terminator(&self, code: u32) -> bool {
        if self.ligature_consonants.contains(&code)
            || self.non_terminating.contains(&code)
            || self.extra_signs.contains(&code)
        {
            return false;
        }
        code < self.letter_start() || code > self.sign_end()
    }

    pub fn is_virama(&self, ch: char) -> bool {
        ch == self.virama
    }

    pub fn is_vowel_sign(&self, ch: char) -> bool {
        let code = ch as u32;
        self.vowel_signs.contains(&code) || self.extra_signs.contains(&code)
    }

    pub fn is_consonant(&self, ch: char) -> bool {
        let code = ch as u32;
        self.consonants.contains(&code) || self.ligature_consonants.contains(&code)
    }

    pub fn is_special_consonant(&self, ch: char) -> bool {
        self.ligature_consonants.contains(&(ch as u32))
    }

    /// Classify a key code.
    pub fn classify(&self, code: u32) -> LetterClass {
        if self.ligature_consonants.contains(&code) {
            return LetterClass::SpecialConsonant;
        }
        if code == self.virama as u32 {
            return LetterClass::Virama;
        }
        if self.vowel_signs.contains(&code) || self.extra_signs.contains(&code) {
            return LetterClass::VowelSign;
        }
        if self.is_terminator(code) {
            return LetterClass::Terminator;
        }
        if self.independent_vowels.contains(&code) {
            LetterClass::IndependentVowel
        } else if self.consonants.contains(&code) {
            LetterClass::Consonant
        } else {
            LetterClass::Other
        }
    }

    /// Classify a typed or composed scalar
    pub fn classify_char(&self, ch: char) -> LetterClass {
        self.classify(ch as u32)
    }
}
