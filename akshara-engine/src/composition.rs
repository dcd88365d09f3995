//! Composition buffer: the in-progress word plus the steps that built it.

use serde::{Deserialize, Serialize};

/// What one compose step did to the document.
///
/// Inverting it exactly means deleting `inserted` scalars and re-inserting
/// `replaced`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeStep {
    /// Trailing text the step removed before inserting
    pub replaced: String,
    /// Number of scalars the step inserted
    pub inserted: usize,
}

/// The not-yet-committed word being typed.
///
/// Length and positions are counted in Unicode scalars, never bytes. Each
/// compose step is recorded so that deletes walk back through them one at
/// a time; only the most recent [`Composition::MAX_STEPS`] are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    steps: Vec<ComposeStep>,
    /// Started from a word already in the document
    #[serde(default, skip_serializing_if = "is_false")]
    resumed: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Composition {
    pub const MAX_STEPS: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// A composition over existing text, with no step history.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            steps: Vec::new(),
            resumed: false,
        }
    }

    /// A composition resuming a word already in the document.
    ///
    /// Undoing every step typed on top of it yields the empty composition:
    /// the resumed word stays in the document, uncomposed.
    pub fn resumed(text: impl Into<String>) -> Self {
        Self {
            resumed: true,
            ..Self::from_text(text)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in Unicode scalars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn chars(&self) -> Vec<char> {
        self.text.chars().collect()
    }

    pub fn last_step(&self) -> Option<&ComposeStep> {
        self.steps.last()
    }

    /// Replace the last `char_count` scalars with `replacement` and record
    /// the step.
    pub fn edit(&self, char_count: usize, replacement: &str) -> Composition {
        let chars = self.chars();
        let start = chars.len().saturating_sub(char_count);
        let step = ComposeStep {
            replaced: chars[start..].iter().collect(),
            inserted: replacement.chars().count(),
        };

        let mut next = self.replace_from_end(char_count, replacement);
        next.resumed = self.resumed;
        next.steps = self.steps.clone();
        if next.steps.len() == Self::MAX_STEPS {
            next.steps.remove(0);
        }
        next.steps.push(step);
        next
    }

    /// Composition before the most recent recorded step.
    ///
    /// `None` when there is no record or it no longer fits the text.
    pub fn undo(&self) -> Option<Composition> {
        let (step, earlier) = self.steps.split_last()?;
        if step.inserted == 0 || step.inserted > self.len() {
            return None;
        }
        if earlier.is_empty() && self.resumed {
            return Some(Composition::new());
        }
        let mut previous = self.replace_from_end(step.inserted, &step.replaced);
        previous.steps = earlier.to_vec();
        previous.resumed = self.resumed;
        Some(previous)
    }

    /// Remove `char_count` scalars from the end and append `replacement`.
    ///
    /// The result carries no step history.
    pub fn replace_from_end(&self, char_count: usize, replacement: &str) -> Composition {
        let total = self.len();
        let keep = total.saturating_sub(char_count);
        let mut text: String = self.text.chars().take(keep).collect();
        text.push_str(replacement);
        Composition::from_text(text)
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl From<&str> for Composition {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for Composition {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}
