//! Keyboard controller: input mode machine plus the active key table

use std::sync::Arc;

use akshara_engine::LanguageId;
use tracing::{debug, warn};

use super::keycode::KeyEvent;
use super::layout::{Key, KeyTable, LayoutResolver, resolve_with_fallback};
use super::mode::{InputModeMachine, KeyboardState, LayoutChange, ModeConfig};

/// Tracks the session's language and layer and keeps the key table that
/// goes with them.
pub struct KeyboardController {
    resolver: Arc<dyn LayoutResolver>,
    modes: InputModeMachine,
    languages: Vec<LanguageId>,
    current: usize,
    table: Option<KeyTable>,
}

impl KeyboardController {
    /// Controller starting on the first of `languages`.
    ///
    /// An empty list falls back to English.
    pub fn new(
        resolver: Arc<dyn LayoutResolver>,
        config: ModeConfig,
        languages: Vec<LanguageId>,
    ) -> Self {
        let languages = if languages.is_empty() {
            vec![LanguageId::English]
        } else {
            languages
        };
        let mut controller = Self {
            resolver,
            modes: InputModeMachine::new(config),
            languages,
            current: 0,
            table: None,
        };
        controller.reload();
        controller
    }

    pub fn language(&self) -> LanguageId {
        self.languages[self.current]
    }

    pub fn languages(&self) -> &[LanguageId] {
        &self.languages
    }

    pub fn state(&self) -> KeyboardState {
        self.modes.state()
    }

    pub fn is_shifted(&self) -> bool {
        self.modes.is_shifted()
    }

    pub fn is_locked(&self) -> bool {
        self.modes.is_locked()
    }

    /// Active key table, if one was ever resolved
    pub fn table(&self) -> Option<&KeyTable> {
        self.table.as_ref()
    }

    /// Resolve the table for the current language and layer.
    ///
    /// On absence the previous table stays active. Returns whether a table
    /// was resolved.
    pub fn reload(&mut self) -> bool {
        let (language, state) = (self.language(), self.state());
        match resolve_with_fallback(self.resolver.as_ref(), language, state) {
            Some(table) => {
                debug!(
                    "layout {}/{}: {} keys",
                    language,
                    state.as_str(),
                    table.key_count()
                );
                self.table = Some(table);
                true
            }
            None => {
                warn!(
                    "no layout for {}/{}, keeping the previous one",
                    language,
                    state.as_str()
                );
                false
            }
        }
    }

    fn apply(&mut self, change: LayoutChange) -> LayoutChange {
        if change == LayoutChange::Reload {
            self.reload();
        }
        change
    }

    pub fn press_shift(&mut self) -> LayoutChange {
        let change = self.modes.press_shift(self.language());
        self.apply(change)
    }

    pub fn press_mode_change(&mut self) -> LayoutChange {
        let change = self.modes.press_mode_change(self.language());
        self.apply(change)
    }

    /// Release a one-shot shift after a character, space or delete.
    pub fn after_input(&mut self) -> LayoutChange {
        let change = self.modes.auto_unshift();
        self.apply(change)
    }

    /// Move to the next enabled language and back to the letter layer.
    pub fn switch_language(&mut self) -> LanguageId {
        self.current = (self.current + 1) % self.languages.len();
        self.modes.reset();
        debug!("switched language to {}", self.language());
        self.reload();
        self.language()
    }

    /// Select `language`, enabling it if it was not in the list.
    pub fn set_language(&mut self, language: LanguageId) {
        self.current = match self.languages.iter().position(|l| *l == language) {
            Some(i) => i,
            None => {
                self.languages.push(language);
                self.languages.len() - 1
            }
        };
        self.modes.reset();
        self.reload();
    }

    /// Event a key of the active table sends in the current layer
    pub fn key_event(&self, key: &Key) -> KeyEvent {
        let shifted = self.is_shifted();
        KeyEvent::new(key.code_for(shifted), shifted)
    }

    /// Labels of the active table, row by row, for the current layer
    pub fn labels(&self) -> Vec<Vec<String>> {
        let shifted = self.is_shifted();
        self.table
            .iter()
            .flat_map(|table| table.rows.iter())
            .map(|row| row.keys.iter().map(|key| key.label_for(shifted)).collect())
            .collect()
    }
}
