//! Typing session: routes key events to the mode machine or the engine and
//! applies the results to a text sink.

use std::sync::Arc;

use akshara_engine::LanguageId;
use serde::Serialize;
use tracing::{debug, trace};

use super::candidate::{PredictionCandidate, PredictionProvider};
use super::controller::KeyboardController;
use super::engine::{CompositionEngine, EngineEvent, EngineOutcome};
use super::keycode::{KeyClass, KeyCode, KeyEvent};
use super::mode::{KeyboardState, LayoutChange};
use super::sink::{TextSink, apply_edit};
use super::state::InputState;
use super::worker::SessionWorker;

/// What one key press did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyOutcome {
    pub key: KeyCode,
    /// Engine result, absent for mode keys and failed computations
    pub result: Option<EngineOutcome>,
    pub layout: LayoutChange,
    pub language: LanguageId,
    pub state: KeyboardState,
    /// Composition after the key
    pub composition: String,
    pub best_prediction: Option<PredictionCandidate>,
}

/// One input session.
///
/// Events are handled strictly in order: each result is applied to the
/// sink and the state before the next event is looked at.
pub struct Session {
    engine: Arc<CompositionEngine>,
    controller: KeyboardController,
    state: InputState,
    predictor: Option<Arc<dyn PredictionProvider>>,
    worker: Option<SessionWorker>,
}

impl Session {
    pub fn new(engine: Arc<CompositionEngine>, controller: KeyboardController) -> Self {
        let state = InputState::new(controller.language());
        Self {
            engine,
            controller,
            state,
            predictor: None,
            worker: None,
        }
    }

    pub fn with_predictor(mut self, predictor: Arc<dyn PredictionProvider>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// Compute engine results on a dedicated worker thread.
    pub fn with_worker(mut self) -> std::io::Result<Self> {
        self.worker = Some(SessionWorker::spawn(Arc::clone(&self.engine))?);
        Ok(self)
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn controller(&self) -> &KeyboardController {
        &self.controller
    }

    pub fn language(&self) -> LanguageId {
        self.state.language
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent, sink: &mut dyn TextSink) -> KeyOutcome {
        trace!("key {} in {:?}", key.key_code, self.controller.state());
        let class = key.class();
        let (result, layout) = if class.is_mode_key() {
            (None, self.press_mode_key(class))
        } else {
            self.input_key(key, class, sink)
        };
        self.outcome(key.key_code, result, layout)
    }

    /// Commit a picked prediction in place of the composition.
    pub fn commit_candidate(
        &mut self,
        candidate: PredictionCandidate,
        sink: &mut dyn TextSink,
    ) -> Option<EngineOutcome> {
        self.run_and_apply(EngineEvent::CommitCandidate(candidate), sink)
    }

    fn press_mode_key(&mut self, class: KeyClass) -> LayoutChange {
        match class {
            KeyClass::Shift => self.controller.press_shift(),
            KeyClass::ModeChange => self.controller.press_mode_change(),
            KeyClass::LocaleSwitch => self.switch_language(),
            _ => LayoutChange::None,
        }
    }

    fn input_key(
        &mut self,
        key: KeyEvent,
        class: KeyClass,
        sink: &mut dyn TextSink,
    ) -> (Option<EngineOutcome>, LayoutChange) {
        let event = match class {
            KeyClass::Character => {
                let shifted = key.is_shifted || self.controller.is_shifted();
                self.state.context_before = sink.context_before();
                EngineEvent::Character(KeyEvent::new(key.key_code, shifted))
            }
            KeyClass::Delete => EngineEvent::Delete,
            KeyClass::Space => EngineEvent::Space,
            // Return leaves the keyboard layer alone
            KeyClass::Return => {
                return (self.run_and_apply(EngineEvent::Return, sink), LayoutChange::None);
            }
            _ => {
                debug!("ignoring unassigned key code {}", key.key_code.0);
                return (None, LayoutChange::None);
            }
        };
        match self.run_and_apply(event, sink) {
            Some(outcome) => (Some(outcome), self.controller.after_input()),
            None => (None, LayoutChange::None),
        }
    }

    fn switch_language(&mut self) -> LayoutChange {
        // The composed text is already in the document
        self.state.reset();
        self.state.language = self.controller.switch_language();
        LayoutChange::Reload
    }

    fn run(&mut self, event: EngineEvent) -> Option<EngineOutcome> {
        match self.worker.as_mut() {
            Some(worker) => worker.process(&self.state, event),
            None => Some(self.engine.dispatch(&self.state, &event)),
        }
    }

    fn run_and_apply(
        &mut self,
        event: EngineEvent,
        sink: &mut dyn TextSink,
    ) -> Option<EngineOutcome> {
        // A failed computation changes nothing
        let outcome = self.run(event)?;
        apply_edit(sink, &outcome);
        self.state.apply(&outcome);
        if outcome.should_trigger_prediction() {
            self.refresh_prediction();
        }
        Some(outcome)
    }

    fn refresh_prediction(&mut self) {
        let Some(predictor) = self.predictor.as_ref() else {
            return;
        };
        self.state.best_prediction = predictor
            .predictions(self.state.composition.as_str(), self.state.language)
            .into_iter()
            .next();
        if let Some(best) = &self.state.best_prediction {
            trace!("best prediction \"{}\" ({:.2})", best.word, best.confidence);
        }
    }

    fn outcome(
        &self,
        key: KeyCode,
        result: Option<EngineOutcome>,
        layout: LayoutChange,
    ) -> KeyOutcome {
        KeyOutcome {
            key,
            result,
            layout,
            language: self.state.language,
            state: self.controller.state(),
            composition: self.state.composition.as_str().to_string(),
            best_prediction: self.state.best_prediction.clone(),
        }
    }
}
