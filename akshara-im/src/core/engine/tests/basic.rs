use super::*;

#[test]
fn test_first_key_composes() {
    let engine = CompositionEngine::new();
    let result = engine.process_character(&tamil(), &press('க'));
    assert_eq!(result.action, ActionType::Compose);
    assert_eq!(result.new_composition.as_str(), "க");
    assert_eq!(result.display_text, "க");
    assert_eq!(result.replace_count, 0);
    assert!(!result.should_trigger_prediction);
}

#[test]
fn test_vowel_sign_replaces_in_document() {
    let engine = CompositionEngine::new();
    let mut state = tamil();
    let mut doc = DocumentBuffer::new();
    type_keys(&engine, &mut state, &mut doc, "மக\u{0BBE}");
    assert_eq!(doc.text(), "மகா");
    assert_eq!(state.composition.as_str(), "மகா");
}

#[test]
fn test_conjunct_in_document() {
    let engine = CompositionEngine::new();
    let mut state = tamil();
    let mut doc = DocumentBuffer::new();
    type_keys(&engine, &mut state, &mut doc, "அக\u{0BCD}ஷ");
    assert_eq!(doc.text(), "அக்ஷ");
    assert_eq!(state.composition.as_str(), "அக்ஷ");
}

#[test]
fn test_termination_empties_composition() {
    let engine = CompositionEngine::new();
    let state = tamil().with_composition("கா");
    let result = engine.process_character(&state, &KeyEvent::key(KeyCode(0x0041)));
    assert_eq!(result.action, ActionType::Terminate);
    assert!(result.new_composition.is_empty());
    assert_eq!(result.display_text, "A");
    assert_eq!(result.replace_count, 0);
}

#[test]
fn test_tamil_digit_terminates() {
    let engine = CompositionEngine::new();
    let mut state = tamil();
    let mut doc = DocumentBuffer::new();
    type_keys(&engine, &mut state, &mut doc, "க௧");
    assert_eq!(doc.text(), "க௧");
    assert!(!state.is_composing());
}

#[test]
fn test_unregistered_language_uses_fallback() {
    let engine = CompositionEngine::new();
    let state = InputState::new(LanguageId::Telugu).with_composition("అ");
    let result = engine.process_character(&state, &press('క'));
    assert_eq!(result.new_composition.as_str(), "అక");
    assert_eq!(result.display_text, "క");
    assert_eq!(result.action, ActionType::Compose);
}

#[test]
fn test_fallback_shift_uppercases() {
    let engine = CompositionEngine::new();
    let state = InputState::new(LanguageId::English);
    let result = engine.process_character(&state, &press_shift('a'));
    assert_eq!(result.display_text, "A");
}

#[test]
fn test_engine_for_languages() {
    let engine = CompositionEngine::for_languages(&[LanguageId::Tamil], EngineConfig::default());
    assert_eq!(engine.translator(LanguageId::Tamil).name(), "tamil");
    assert_eq!(engine.translator(LanguageId::Hindi).name(), "literal");
    assert!(engine.rules(LanguageId::Hindi).is_none());
}

#[test]
fn test_tamil99_scheme() {
    let engine = CompositionEngine::new();
    let mut state = InputState::new(LanguageId::Tamil99);
    let mut doc = DocumentBuffer::new();
    type_keys(&engine, &mut state, &mut doc, "பகக");
    assert_eq!(doc.text(), "பக்க");
    type_keys(&engine, &mut state, &mut doc, "ஆ");
    assert_eq!(doc.text(), "பக்கா");
}

#[test]
fn test_hindi_conjunct() {
    let engine = CompositionEngine::new();
    let mut state = InputState::new(LanguageId::Hindi);
    let mut doc = DocumentBuffer::new();
    type_keys(&engine, &mut state, &mut doc, "क\u{094D}ष\u{093E}");
    assert_eq!(doc.text(), "क्षा");
}

#[test]
fn test_engine_config_defaults() {
    let config = EngineConfig::default();
    assert!(config.predictions_enabled);
    assert!(config.auto_commit_enabled);
    assert!(!config.auto_correct_enabled);
    assert_eq!(config.auto_commit_threshold, 0.7);
}
