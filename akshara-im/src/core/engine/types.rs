//! Type definitions for the composition engine

use akshara_engine::Composition;
use serde::Serialize;

use super::super::candidate::PredictionCandidate;
use super::super::keycode::KeyEvent;
use super::super::sink::TextEdit;

/// What the caller should do with a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// The key continued the composition
    Compose,
    /// The key ended the composition
    Terminate,
    /// Delete press
    Delete,
    /// Space with nothing composed
    InsertSpace,
    /// Space committed the composition (or its best prediction)
    CommitWord,
    /// Return with nothing composed
    InsertReturn,
    /// Return committed the composition
    CommitAndReturn,
    /// A prediction was picked explicitly
    CommitCandidate,
}

/// Result of a character key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionResult {
    pub new_composition: Composition,
    pub display_text: String,
    /// Trailing document scalars to remove before inserting `display_text`
    pub replace_count: usize,
    pub action: ActionType,
    pub should_trigger_prediction: bool,
}

/// Result of a delete press
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteResult {
    pub new_composition: Composition,
    /// Re-inserted after deleting, when the undone step had replaced text
    pub display_text: String,
    /// Trailing document scalars to remove; not necessarily 1
    pub delete_count: usize,
    pub action: ActionType,
    pub should_trigger_prediction: bool,
}

/// Result of a space press
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceResult {
    pub new_composition: Composition,
    pub display_text: String,
    pub replace_count: usize,
    pub action: ActionType,
}

/// Result of a return press
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnResult {
    pub new_composition: Composition,
    pub display_text: String,
    pub replace_count: usize,
    pub action: ActionType,
}

/// Result of committing a picked prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitResult {
    pub new_composition: Composition,
    pub display_text: String,
    pub replace_count: usize,
    pub action: ActionType,
}

macro_rules! impl_text_edit {
    ($ty:ty, $count:ident) => {
        impl TextEdit for $ty {
            fn delete_count(&self) -> usize {
                self.$count
            }
            fn insert_text(&self) -> &str {
                &self.display_text
            }
        }
    };
}

impl_text_edit!(CompositionResult, replace_count);
impl_text_edit!(DeleteResult, delete_count);
impl_text_edit!(SpaceResult, replace_count);
impl_text_edit!(ReturnResult, replace_count);
impl_text_edit!(CommitResult, replace_count);

/// An engine operation, as queued for a session
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Character(KeyEvent),
    Delete,
    Space,
    Return,
    CommitCandidate(PredictionCandidate),
}

/// Result of any engine operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineOutcome {
    Composed(CompositionResult),
    Deleted(DeleteResult),
    Space(SpaceResult),
    Return(ReturnResult),
    Committed(CommitResult),
}

impl EngineOutcome {
    pub fn new_composition(&self) -> &Composition {
        match self {
            Self::Composed(r) => &r.new_composition,
            Self::Deleted(r) => &r.new_composition,
            Self::Space(r) => &r.new_composition,
            Self::Return(r) => &r.new_composition,
            Self::Committed(r) => &r.new_composition,
        }
    }

    pub fn action(&self) -> ActionType {
        match self {
            Self::Composed(r) => r.action,
            Self::Deleted(r) => r.action,
            Self::Space(r) => r.action,
            Self::Return(r) => r.action,
            Self::Committed(r) => r.action,
        }
    }

    /// Whether predictions should be requested for the new composition
    pub fn should_trigger_prediction(&self) -> bool {
        match self {
            Self::Composed(r) => r.should_trigger_prediction,
            Self::Deleted(r) => r.should_trigger_prediction,
            Self::Space(_) | Self::Return(_) | Self::Committed(_) => false,
        }
    }

    fn edit(&self) -> &dyn TextEdit {
        match self {
            Self::Composed(r) => r,
            Self::Deleted(r) => r,
            Self::Space(r) => r,
            Self::Return(r) => r,
            Self::Committed(r) => r,
        }
    }
}

impl TextEdit for EngineOutcome {
    fn delete_count(&self) -> usize {
        self.edit().delete_count()
    }

    fn insert_text(&self) -> &str {
        self.edit().insert_text()
    }
}

/// Configuration for the composition engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Predictions are requested while composing
    pub predictions_enabled: bool,
    /// Space commits the best prediction when confident enough
    pub auto_commit_enabled: bool,
    /// Auto-commit may replace the composition with a word it does not prefix
    pub auto_correct_enabled: bool,
    /// Confidence a prediction must exceed to be auto-committed
    pub auto_commit_threshold: f64,
    /// Composition lengths (in scalars) that trigger predictions
    pub min_trigger_len: usize,
    pub max_trigger_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            predictions_enabled: true,
            auto_commit_enabled: true,
            auto_correct_enabled: false,
            auto_commit_threshold: 0.7,
            min_trigger_len: 2,
            max_trigger_len: 16,
        }
    }
}
