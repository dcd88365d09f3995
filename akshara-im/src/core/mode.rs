//! Input mode state machine (shift and symbol layers)

use akshara_engine::LanguageId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Active keyboard layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyboardState {
    #[default]
    Normal,
    Shifted,
    Symbols,
    ShiftedSymbols,
}

impl KeyboardState {
    pub const ALL: [KeyboardState; 4] = [
        KeyboardState::Normal,
        KeyboardState::Shifted,
        KeyboardState::Symbols,
        KeyboardState::ShiftedSymbols,
    ];

    /// Whether the state belongs to the symbol pair `{symbols, shiftedSymbols}`
    pub fn is_symbol_layer(&self) -> bool {
        matches!(self, KeyboardState::Symbols | KeyboardState::ShiftedSymbols)
    }

    /// Whether keys are delivered as shifted
    pub fn is_shifted(&self) -> bool {
        matches!(self, KeyboardState::Shifted | KeyboardState::ShiftedSymbols)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyboardState::Normal => "normal",
            KeyboardState::Shifted => "shifted",
            KeyboardState::Symbols => "symbols",
            KeyboardState::ShiftedSymbols => "shiftedSymbols",
        }
    }
}

/// What the keyboard surface must do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutChange {
    /// Nothing changed
    None,
    /// Same key table, refresh labels (capitalization, lock indicator)
    Relabel,
    /// Different key table: resolve the layout again
    Reload,
}

impl LayoutChange {
    /// Change needed to go from `from` to `to`.
    pub fn between(from: KeyboardState, to: KeyboardState) -> Self {
        if from == to {
            LayoutChange::None
        } else if from.is_symbol_layer() != to.is_symbol_layer() {
            LayoutChange::Reload
        } else {
            LayoutChange::Relabel
        }
    }
}

/// Input mode configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeConfig {
    /// Second shift press locks shift instead of releasing it
    pub caps_lock: bool,
}

/// Tracks the shift/symbol layer for one session.
#[derive(Debug, Clone, Default)]
pub struct InputModeMachine {
    state: KeyboardState,
    locked: bool,
    config: ModeConfig,
}

impl InputModeMachine {
    pub fn new(config: ModeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> KeyboardState {
        self.state
    }

    /// Whether shift is locked (caps lock)
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_shifted(&self) -> bool {
        self.state.is_shifted()
    }

    fn transition(&mut self, next: KeyboardState, locked: bool) -> LayoutChange {
        let mut change = LayoutChange::between(self.state, next);
        if change == LayoutChange::None && locked != self.locked {
            change = LayoutChange::Relabel;
        }
        if change != LayoutChange::None {
            debug!(
                "mode: {} → {} (locked: {}, {:?})",
                self.state.as_str(),
                next.as_str(),
                locked,
                change
            );
        }
        self.state = next;
        self.locked = locked;
        change
    }

    /// Shift key press.
    pub fn press_shift(&mut self, language: LanguageId) -> LayoutChange {
        match self.state {
            KeyboardState::Normal => self.transition(KeyboardState::Shifted, false),
            KeyboardState::Shifted if self.locked => self.transition(KeyboardState::Normal, false),
            KeyboardState::Shifted if self.config.caps_lock => {
                self.transition(KeyboardState::Shifted, true)
            }
            KeyboardState::Shifted => self.transition(KeyboardState::Normal, false),
            KeyboardState::Symbols if language.has_shifted_symbols() => {
                self.transition(KeyboardState::ShiftedSymbols, false)
            }
            KeyboardState::Symbols => LayoutChange::None,
            KeyboardState::ShiftedSymbols => self.transition(KeyboardState::Symbols, false),
        }
    }

    /// Mode-change key press. Always clears the shift lock.
    pub fn press_mode_change(&mut self, language: LanguageId) -> LayoutChange {
        let next = match self.state {
            KeyboardState::Normal | KeyboardState::Shifted => KeyboardState::Symbols,
            KeyboardState::Symbols if language.has_shifted_symbols() => {
                KeyboardState::ShiftedSymbols
            }
            KeyboardState::Symbols | KeyboardState::ShiftedSymbols => KeyboardState::Normal,
        };
        self.transition(next, false)
    }

    /// Release a one-shot shift after a character, space or delete.
    pub fn auto_unshift(&mut self) -> LayoutChange {
        if self.state == KeyboardState::Shifted && !self.locked {
            self.transition(KeyboardState::Normal, false)
        } else {
            LayoutChange::None
        }
    }

    /// Return to `normal`, e.g. after a language switch.
    pub fn reset(&mut self) -> LayoutChange {
        self.transition(KeyboardState::Normal, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> InputModeMachine {
        InputModeMachine::new(ModeConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let modes = machine();
        assert_eq!(modes.state(), KeyboardState::Normal);
        assert!(!modes.is_locked());
    }

    #[test]
    fn test_shift_toggles_within_letter_pair() {
        let mut modes = machine();
        assert_eq!(modes.press_shift(LanguageId::Tamil), LayoutChange::Relabel);
        assert_eq!(modes.state(), KeyboardState::Shifted);
        assert_eq!(modes.press_shift(LanguageId::Tamil), LayoutChange::Relabel);
        assert_eq!(modes.state(), KeyboardState::Normal);
    }

    #[test]
    fn test_mode_change_crosses_pairs() {
        let mut modes = machine();
        assert_eq!(modes.press_mode_change(LanguageId::Tamil), LayoutChange::Reload);
        assert_eq!(modes.state(), KeyboardState::Symbols);
    }

    #[test]
    fn test_mode_change_from_shifted() {
        let mut modes = machine();
        modes.press_shift(LanguageId::Tamil);
        assert_eq!(modes.press_mode_change(LanguageId::Tamil), LayoutChange::Reload);
        assert_eq!(modes.state(), KeyboardState::Symbols);
    }

    #[test]
    fn test_mode_change_cycle_with_shifted_symbols() {
        let mut modes = machine();
        modes.press_mode_change(LanguageId::English);
        assert_eq!(
            modes.press_mode_change(LanguageId::English),
            LayoutChange::Relabel
        );
        assert_eq!(modes.state(), KeyboardState::ShiftedSymbols);
        assert_eq!(
            modes.press_mode_change(LanguageId::English),
            LayoutChange::Reload
        );
        assert_eq!(modes.state(), KeyboardState::Normal);
    }

    #[test]
    fn test_mode_change_cycle_without_shifted_symbols() {
        let mut modes = machine();
        modes.press_mode_change(LanguageId::Hindi);
        assert_eq!(modes.press_mode_change(LanguageId::Hindi), LayoutChange::Reload);
        assert_eq!(modes.state(), KeyboardState::Normal);
    }

    #[test]
    fn test_shift_in_symbols() {
        let mut modes = machine();
        modes.press_mode_change(LanguageId::Tamil);
        assert_eq!(modes.press_shift(LanguageId::Tamil), LayoutChange::Relabel);
        assert_eq!(modes.state(), KeyboardState::ShiftedSymbols);
        assert_eq!(modes.press_shift(LanguageId::Tamil), LayoutChange::Relabel);
        assert_eq!(modes.state(), KeyboardState::Symbols);
    }

    #[test]
    fn test_shift_in_symbols_is_noop_outside_allow_list() {
        let mut modes = machine();
        modes.press_mode_change(LanguageId::Malayalam);
        assert_eq!(modes.press_shift(LanguageId::Malayalam), LayoutChange::None);
        assert_eq!(modes.state(), KeyboardState::Symbols);
    }

    #[test]
    fn test_auto_unshift() {
        let mut modes = machine();
        modes.press_shift(LanguageId::Tamil);
        assert_eq!(modes.auto_unshift(), LayoutChange::Relabel);
        assert_eq!(modes.state(), KeyboardState::Normal);
        assert_eq!(modes.auto_unshift(), LayoutChange::None);
    }

    #[test]
    fn test_auto_unshift_leaves_shifted_symbols() {
        let mut modes = machine();
        modes.press_mode_change(LanguageId::Tamil);
        modes.press_shift(LanguageId::Tamil);
        assert_eq!(modes.auto_unshift(), LayoutChange::None);
        assert_eq!(modes.state(), KeyboardState::ShiftedSymbols);
    }

    #[test]
    fn test_caps_lock_disabled_by_default() {
        let mut modes = machine();
        modes.press_shift(LanguageId::Tamil);
        modes.press_shift(LanguageId::Tamil);
        assert_eq!(modes.state(), KeyboardState::Normal);
        assert!(!modes.is_locked());
    }

    #[test]
    fn test_caps_lock() {
        let mut modes = InputModeMachine::new(ModeConfig { caps_lock: true });
        modes.press_shift(LanguageId::English);
        assert_eq!(modes.press_shift(LanguageId::English), LayoutChange::Relabel);
        assert_eq!(modes.state(), KeyboardState::Shifted);
        assert!(modes.is_locked());

        // Locked shift survives input
        assert_eq!(modes.auto_unshift(), LayoutChange::None);
        assert_eq!(modes.state(), KeyboardState::Shifted);

        // Third press releases the lock
        modes.press_shift(LanguageId::English);
        assert_eq!(modes.state(), KeyboardState::Normal);
        assert!(!modes.is_locked());
    }

    #[test]
    fn test_mode_change_clears_lock() {
        let mut modes = InputModeMachine::new(ModeConfig { caps_lock: true });
        modes.press_shift(LanguageId::English);
        modes.press_shift(LanguageId::English);
        modes.press_mode_change(LanguageId::English);
        assert!(!modes.is_locked());
        assert_eq!(modes.state(), KeyboardState::Symbols);
    }

    #[test]
    fn test_reset() {
        let mut modes = machine();
        modes.press_mode_change(LanguageId::Tamil);
        assert_eq!(modes.reset(), LayoutChange::Reload);
        assert_eq!(modes.reset(), LayoutChange::None);
    }

    #[test]
    fn test_layout_change_between() {
        use KeyboardState::*;
        assert_eq!(LayoutChange::between(Normal, Normal), LayoutChange::None);
        assert_eq!(LayoutChange::between(Normal, Shifted), LayoutChange::Relabel);
        assert_eq!(LayoutChange::between(Symbols, ShiftedSymbols), LayoutChange::Relabel);
        assert_eq!(LayoutChange::between(Shifted, Symbols), LayoutChange::Reload);
        assert_eq!(LayoutChange::between(ShiftedSymbols, Normal), LayoutChange::Reload);
    }
}
