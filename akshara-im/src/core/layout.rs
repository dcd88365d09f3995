//! Key tables and layout resolution
//!
//! A layout document describes the key table for one `(language, state)`
//! pair:
//!
//! ```toml
//! language = "tamil"
//! state = "normal"
//!
//! [[rows]]
//! keys = [
//!   { code = 0x0B95, label = "க" },
//!   { code = -5, label = "⌫", width = 1.5, repeatable = true },
//! ]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use akshara_engine::LanguageId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::keycode::KeyCode;
use super::mode::KeyboardState;

/// Layouts shipped with the crate
const BUILTIN_LAYOUTS: &[(&str, &str)] = &[
    ("tamil-normal.toml", include_str!("../../layouts/tamil-normal.toml")),
    ("tamil-symbols.toml", include_str!("../../layouts/tamil-symbols.toml")),
    ("english-normal.toml", include_str!("../../layouts/english-normal.toml")),
    ("english-symbols.toml", include_str!("../../layouts/english-symbols.toml")),
];

/// Errors raised while loading layout documents
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed layout document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("layout for {language}/{state} has no rows")]
    NoRows {
        language: LanguageId,
        state: &'static str,
    },

    #[error("row {row} of {language}/{state} has no keys")]
    EmptyRow {
        language: LanguageId,
        state: &'static str,
        row: usize,
    },

    #[error("key {key} in row {row} has an invalid width {width}")]
    InvalidWidth { row: usize, key: usize, width: f32 },

    #[error("key {key} in row {row} has an empty label")]
    EmptyLabel { row: usize, key: usize },
}

/// One key of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub code: i32,
    pub label: String,
    /// Width relative to a standard key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Shift, mode-change and similar keys
    #[serde(default)]
    pub modifier: bool,
    /// Repeats while held
    #[serde(default)]
    pub repeatable: bool,
    /// Code sent while shifted, if different from `code`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_code: Option<i32>,
    /// Label shown while shifted; defaults to the upper-cased label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_label: Option<String>,
}

impl Key {
    /// Code this key sends in the given shift state
    pub fn code_for(&self, shifted: bool) -> KeyCode {
        match (shifted, self.shift_code) {
            (true, Some(code)) => KeyCode(code),
            _ => KeyCode(self.code),
        }
    }

    /// Label shown in the given shift state
    pub fn label_for(&self, shifted: bool) -> String {
        if !shifted || self.modifier {
            return self.label.clone();
        }
        match &self.shift_label {
            Some(label) => label.clone(),
            None => self.label.to_uppercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub keys: Vec<Key>,
}

/// Ordered rows of keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyTable {
    pub rows: Vec<Row>,
}

impl KeyTable {
    /// Iterate over every key, row by row
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.iter().flat_map(|row| row.keys.iter())
    }

    pub fn key_count(&self) -> usize {
        self.rows.iter().map(|row| row.keys.len()).sum()
    }

    /// First key sending `code`
    pub fn find(&self, code: KeyCode) -> Option<&Key> {
        self.keys().find(|key| key.code == code.0)
    }
}

/// A parsed layout document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub language: LanguageId,
    pub state: KeyboardState,
    #[serde(flatten)]
    pub table: KeyTable,
}

impl LayoutDocument {
    /// Parse and validate a TOML layout document.
    pub fn parse(source: &str) -> Result<Self, LayoutError> {
        let doc: LayoutDocument = toml::from_str(source)?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.table.rows.is_empty() {
            return Err(LayoutError::NoRows {
                language: self.language,
                state: self.state.as_str(),
            });
        }
        for (r, row) in self.table.rows.iter().enumerate() {
            if row.keys.is_empty() {
                return Err(LayoutError::EmptyRow {
                    language: self.language,
                    state: self.state.as_str(),
                    row: r,
                });
            }
            for (k, key) in row.keys.iter().enumerate() {
                if key.label.is_empty() {
                    return Err(LayoutError::EmptyLabel { row: r, key: k });
                }
                if let Some(width) = key.width
                    && !(width > 0.0 && width.is_finite())
                {
                    return Err(LayoutError::InvalidWidth {
                        row: r,
                        key: k,
                        width,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Supplies the key table for a language and keyboard state.
pub trait LayoutResolver: Send + Sync {
    fn resolve(&self, language: LanguageId, state: KeyboardState) -> Option<KeyTable>;
}

/// Resolve `state`, falling back within its pair.
///
/// `shiftedSymbols` falls back to `symbols`, `shifted` to `normal`.
pub fn resolve_with_fallback(
    resolver: &dyn LayoutResolver,
    language: LanguageId,
    state: KeyboardState,
) -> Option<KeyTable> {
    resolver.resolve(language, state).or_else(|| {
        let base = match state {
            KeyboardState::ShiftedSymbols => KeyboardState::Symbols,
            KeyboardState::Shifted => KeyboardState::Normal,
            KeyboardState::Normal | KeyboardState::Symbols => return None,
        };
        debug!(
            "no {} layout for {}, using {}",
            state.as_str(),
            language,
            base.as_str()
        );
        resolver.resolve(language, base)
    })
}

/// In-memory layout store built from TOML documents
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    tables: HashMap<(LanguageId, KeyboardState), KeyTable>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the layouts shipped with the crate
    pub fn builtin() -> Self {
        let mut registry = Self::from_sources(BUILTIN_LAYOUTS.iter().copied());
        // Tamil99 keys send the same code points as the direct layout
        registry.alias(LanguageId::Tamil99, LanguageId::Tamil);
        registry
    }

    /// Build from `(name, source)` pairs, skipping malformed documents.
    pub fn from_sources<'a>(sources: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut registry = Self::new();
        for (name, source) in sources {
            if let Err(e) = registry.add_document(source) {
                warn!("skipping layout {}: {}", name, e);
            }
        }
        registry
    }

    /// Add every `*.toml` document under `dir`; malformed ones are skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, LayoutError> {
        let io_err = |source| LayoutError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut loaded = 0;
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        for path in paths {
            match self.add_file(&path) {
                Ok(()) => loaded += 1,
                Err(e) => warn!("skipping layout {:?}: {}", path, e),
            }
        }
        debug!("loaded {} layouts from {:?}", loaded, dir);
        Ok(loaded)
    }

    /// Parse one file and register it.
    pub fn add_file(&mut self, path: &Path) -> Result<(), LayoutError> {
        let source = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_document(&source)
    }

    /// Parse one document and register it, replacing any earlier table for
    /// the same language and state.
    pub fn add_document(&mut self, source: &str) -> Result<(), LayoutError> {
        let doc = LayoutDocument::parse(source)?;
        self.insert(doc.language, doc.state, doc.table);
        Ok(())
    }

    pub fn insert(&mut self, language: LanguageId, state: KeyboardState, table: KeyTable) {
        self.tables.insert((language, state), table);
    }

    /// Serve `language` with `source`'s tables wherever it has none of its own.
    pub fn alias(&mut self, language: LanguageId, source: LanguageId) {
        for state in KeyboardState::ALL {
            if self.tables.contains_key(&(language, state)) {
                continue;
            }
            if let Some(table) = self.tables.get(&(source, state)).cloned() {
                self.tables.insert((language, state), table);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl LayoutResolver for LayoutRegistry {
    fn resolve(&self, language: LanguageId, state: KeyboardState) -> Option<KeyTable> {
        self.tables.get(&(language, state)).cloned()
    }
}
