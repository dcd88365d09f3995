//! Tests for the composition engine

use super::*;
use crate::core::candidate::PredictionCandidate;
use crate::core::keycode::{KeyCode, KeyEvent};
use crate::core::sink::{DocumentBuffer, TextSink, apply_edit};
use akshara_engine::LanguageId;

mod basic;
mod space;

fn press(ch: char) -> KeyEvent {
    KeyEvent::char(ch)
}

fn press_shift(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::from_char(ch), true)
}

fn tamil() -> InputState {
    InputState::new(LanguageId::Tamil)
}

/// Type `keys` against `doc`, feeding the document back as context.
fn type_keys(
    engine: &CompositionEngine,
    state: &mut InputState,
    doc: &mut DocumentBuffer,
    keys: &str,
) {
    for ch in keys.chars() {
        state.context_before = doc.context_before();
        let outcome = engine.dispatch(state, &EngineEvent::Character(press(ch)));
        apply_edit(doc, &outcome);
        state.apply(&outcome);
    }
}

fn delete(engine: &CompositionEngine, state: &mut InputState, doc: &mut DocumentBuffer) {
    let outcome = engine.dispatch(state, &EngineEvent::Delete);
    apply_edit(doc, &outcome);
    state.apply(&outcome);
}
