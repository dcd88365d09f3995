//! Host document interface
//!
//! The engine never moves the cursor; it only asks the sink to delete
//! scalars before the cursor and insert text at it.

/// Destination for composed text.
pub trait TextSink {
    fn insert(&mut self, text: &str);

    /// Delete `count` Unicode scalars before the cursor.
    fn delete_backward(&mut self, count: usize);

    /// Text before the cursor, when the host can provide it
    fn context_before(&self) -> Option<String> {
        None
    }
}

/// A document edit: delete trailing scalars, then insert text
pub trait TextEdit {
    fn delete_count(&self) -> usize;
    fn insert_text(&self) -> &str;
}

/// Apply `edit` to `sink`.
pub fn apply_edit<S, E>(sink: &mut S, edit: &E)
where
    S: TextSink + ?Sized,
    E: TextEdit + ?Sized,
{
    if edit.delete_count() > 0 {
        sink.delete_backward(edit.delete_count());
    }
    if !edit.insert_text().is_empty() {
        sink.insert(edit.insert_text());
    }
}

/// In-memory document with the cursor at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBuffer {
    text: String,
}

impl DocumentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in Unicode scalars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl TextSink for DocumentBuffer {
    fn insert(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_backward(&mut self, count: usize) {
        let keep = self.len().saturating_sub(count);
        let cut = self
            .text
            .char_indices()
            .nth(keep)
            .map_or(self.text.len(), |(i, _)| i);
        self.text.truncate(cut);
    }

    fn context_before(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.clone())
    }
}
