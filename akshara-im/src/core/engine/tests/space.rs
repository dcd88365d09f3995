use super::*;

fn english(composition: &str, best: Option<PredictionCandidate>) -> InputState {
    let mut state = InputState::new(LanguageId::English).with_composition(composition);
    state.best_prediction = best;
    state
}

#[test]
fn test_space_with_nothing_composed() {
    let engine = CompositionEngine::new();
    let result = engine.process_space(&english("", None));
    assert_eq!(result.action, ActionType::InsertSpace);
    assert_eq!(result.display_text, " ");
    assert_eq!(result.replace_count, 0);
}

#[test]
fn test_auto_commit_above_threshold() {
    let engine = CompositionEngine::new();
    let state = english("abc", Some(PredictionCandidate::new("abcd", 0.71)));
    let result = engine.process_space(&state);
    assert_eq!(result.action, ActionType::CommitWord);
    assert_eq!(result.replace_count, 3);
    assert_eq!(result.display_text, "abcd ");
    assert!(result.new_composition.is_empty());

    let mut doc = DocumentBuffer::with_text("abc");
    apply_edit(&mut doc, &result);
    assert_eq!(doc.text(), "abcd ");
}

#[test]
fn test_threshold_is_strict() {
    let engine = CompositionEngine::new();
    let state = english("abc", Some(PredictionCandidate::new("abcd", 0.70)));
    let result = engine.process_space(&state);
    assert_eq!(result.action, ActionType::CommitWord);
    assert_eq!(result.replace_count, 0);
    assert_eq!(result.display_text, " ");

    let mut doc = DocumentBuffer::with_text("abc");
    apply_edit(&mut doc, &result);
    assert_eq!(doc.text(), "abc ");
}

#[test]
fn test_no_auto_commit_when_disabled() {
    let engine = CompositionEngine::with_config(EngineConfig {
        auto_commit_enabled: false,
        ..EngineConfig::default()
    });
    let state = english("abc", Some(PredictionCandidate::new("abcd", 0.99)));
    assert_eq!(engine.process_space(&state).replace_count, 0);

    let engine = CompositionEngine::with_config(EngineConfig {
        predictions_enabled: false,
        ..EngineConfig::default()
    });
    assert_eq!(engine.process_space(&state).replace_count, 0);
}

#[test]
fn test_corrections_need_auto_correct() {
    let state = english("teh", Some(PredictionCandidate::new("the", 0.9)));

    let engine = CompositionEngine::new();
    assert_eq!(engine.process_space(&state).display_text, " ");

    let engine = CompositionEngine::with_config(EngineConfig {
        auto_correct_enabled: true,
        ..EngineConfig::default()
    });
    let result = engine.process_space(&state);
    assert_eq!(result.display_text, "the ");
    assert_eq!(result.replace_count, 3);
}

#[test]
fn test_return() {
    let engine = CompositionEngine::new();
    let result = engine.process_return(&english("", None));
    assert_eq!(result.action, ActionType::InsertReturn);
    assert_eq!(result.display_text, "\n");

    let result = engine.process_return(&english("abc", Some(PredictionCandidate::new("abcd", 0.9))));
    assert_eq!(result.action, ActionType::CommitAndReturn);
    assert_eq!(result.replace_count, 0);
    assert!(result.new_composition.is_empty());
}

#[test]
fn test_commit_candidate_replaces_composition() {
    let engine = CompositionEngine::new();
    let mut state = tamil();
    let mut doc = DocumentBuffer::with_text("x ");
    type_keys(&engine, &mut state, &mut doc, "கா");

    let candidate = PredictionCandidate::new("காலை", 0.3);
    let outcome = engine.dispatch(&state, &EngineEvent::CommitCandidate(candidate));
    assert_eq!(outcome.action(), ActionType::CommitCandidate);
    apply_edit(&mut doc, &outcome);
    state.apply(&outcome);
    assert_eq!(doc.text(), "x காலை");
    assert!(!state.is_composing());
}

#[test]
fn test_consonant_sign_space_end_to_end() {
    let engine = CompositionEngine::new();
    let mut state = tamil();
    let mut doc = DocumentBuffer::new();
    type_keys(&engine, &mut state, &mut doc, "க\u{0BBE}");

    let outcome = engine.dispatch(&state, &EngineEvent::Space);
    apply_edit(&mut doc, &outcome);
    state.apply(&outcome);

    assert_eq!(doc.text(), "கா ");
    assert_eq!(doc.len(), 3);
    assert!(!state.is_composing());
}
