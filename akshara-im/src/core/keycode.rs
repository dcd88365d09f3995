//! Key code definitions and key event handling

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key code as delivered by the keyboard surface.
///
/// Non-negative codes are Unicode scalars (or layout codes); negative codes
/// are control keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    // Control keys
    pub const SHIFT: KeyCode = KeyCode(-1);
    pub const MODE_CHANGE: KeyCode = KeyCode(-2);
    pub const DELETE: KeyCode = KeyCode(-5);
    pub const LOCALE_SWITCH: KeyCode = KeyCode(-101);

    // Word boundaries
    pub const RETURN: KeyCode = KeyCode(0x000a);
    pub const SPACE: KeyCode = KeyCode(0x0020);

    pub fn from_char(ch: char) -> Self {
        // Every scalar value fits in i32
        KeyCode(ch as i32)
    }

    /// Try to convert this code to a character
    pub fn to_char(&self) -> Option<char> {
        u32::try_from(self.0).ok().and_then(char::from_u32)
    }

    /// Check if this is a control key (negative code)
    pub fn is_control(&self) -> bool {
        self.0 < 0
    }

    /// Classify the code.
    pub fn class(&self) -> KeyClass {
        match *self {
            Self::SHIFT => KeyClass::Shift,
            Self::MODE_CHANGE => KeyClass::ModeChange,
            Self::DELETE => KeyClass::Delete,
            Self::LOCALE_SWITCH => KeyClass::LocaleSwitch,
            Self::SPACE => KeyClass::Space,
            Self::RETURN => KeyClass::Return,
            code if code.is_control() => KeyClass::Unknown,
            _ => KeyClass::Character,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class() {
            KeyClass::Shift => write!(f, "<shift>"),
            KeyClass::ModeChange => write!(f, "<mode>"),
            KeyClass::Delete => write!(f, "<bksp>"),
            KeyClass::LocaleSwitch => write!(f, "<locale>"),
            KeyClass::Space => write!(f, "<space>"),
            KeyClass::Return => write!(f, "<enter>"),
            KeyClass::Unknown => write!(f, "<{}>", self.0),
            KeyClass::Character => match self.to_char() {
                Some(ch) => write!(f, "{}", ch),
                None => write!(f, "U+{:04X}", self.0),
            },
        }
    }
}

/// What a key does, before any language is consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Shift,
    ModeChange,
    Delete,
    LocaleSwitch,
    Space,
    Return,
    /// Composable key: forwarded to the active translator
    Character,
    /// Negative code with no assigned meaning
    Unknown,
}

impl KeyClass {
    /// Keys handled by the mode machine rather than the composition engine
    pub fn is_mode_key(&self) -> bool {
        matches!(
            self,
            KeyClass::Shift | KeyClass::ModeChange | KeyClass::LocaleSwitch
        )
    }
}

/// A key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key_code: KeyCode,
    /// Shift state at the time of the press
    pub is_shifted: bool,
}

impl KeyEvent {
    pub fn new(key_code: KeyCode, is_shifted: bool) -> Self {
        Self {
            key_code,
            is_shifted,
        }
    }

    /// Unshifted press of a character key
    pub fn char(ch: char) -> Self {
        Self::new(KeyCode::from_char(ch), false)
    }

    /// Press of a key with no character, e.g. [`KeyCode::DELETE`]
    pub fn key(key_code: KeyCode) -> Self {
        Self::new(key_code, false)
    }

    pub fn class(&self) -> KeyClass {
        self.key_code.class()
    }

    pub fn to_char(&self) -> Option<char> {
        self.key_code.to_char()
    }
}

/// Parse a key token: a `<name>` control token or a single character.
///
/// Recognized names: `shift`, `mode`, `bksp`, `space`, `enter`, `locale`.
pub fn parse_key_token(token: &str) -> Option<KeyCode> {
    if let Some(name) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return match name {
            "shift" => Some(KeyCode::SHIFT),
            "mode" => Some(KeyCode::MODE_CHANGE),
            "bksp" => Some(KeyCode::DELETE),
            "space" => Some(KeyCode::SPACE),
            "enter" => Some(KeyCode::RETURN),
            "locale" => Some(KeyCode::LOCALE_SWITCH),
            _ => None,
        };
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(KeyCode::from_char(ch)),
        _ => None,
    }
}

/// Split a key string into codes: `<name>` tokens and single characters.
///
/// Returns the offending token on failure.
pub fn parse_key_sequence(input: &str) -> Result<Vec<KeyCode>, String> {
    let mut codes = Vec::new();
    let mut rest = input;
    while let Some(ch) = rest.chars().next() {
        if ch == '<'
            && let Some(end) = rest.find('>')
        {
            let token = &rest[..=end];
            codes.push(parse_key_token(token).ok_or_else(|| token.to_string())?);
            rest = &rest[end + 1..];
            continue;
        }
        codes.push(KeyCode::from_char(ch));
        rest = &rest[ch.len_utf8()..];
    }
    Ok(codes)
}
