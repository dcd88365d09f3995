//! akshara command-line tool: type key sequences through a session and
//! inspect layout documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use akshara_engine::LanguageId;
use akshara_im::core::candidate::WordListPredictor;
use akshara_im::core::keycode::parse_key_sequence;
use akshara_im::core::layout::{LayoutDocument, LayoutRegistry, resolve_with_fallback};
use akshara_im::core::mode::KeyboardState;
use akshara_im::{
    CompositionEngine, DocumentBuffer, KeyEvent, KeyOutcome, KeyboardController, Session, Settings,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

/// akshara input method tool
#[derive(Parser, Debug)]
#[command(name = "akshara")]
#[command(about = "akshara input method tool: type key sequences and check layouts")]
struct Cli {
    /// Settings file (default: the user config file, if any)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a key sequence through a typing session and print the document.
    ///
    /// Keys are single characters or control tokens: `<shift>`, `<mode>`,
    /// `<bksp>`, `<space>`, `<enter>`, `<locale>`.
    Type {
        /// Key sequence, e.g. "கா<space>"
        #[arg(required = true)]
        keys: Vec<String>,

        /// Starting language (default: from settings)
        #[arg(short, long)]
        language: Option<LanguageId>,

        /// Word list (`word<TAB>frequency`) for predictions in the starting language
        #[arg(short, long)]
        words: Option<PathBuf>,

        /// Text already in the document before the first key
        #[arg(long, default_value = "")]
        before: String,

        /// Print one JSON object per key instead of the final document
        #[arg(long)]
        json: bool,

        /// Compute results on a session worker thread
        #[arg(long)]
        worker: bool,
    },

    /// Validate layout documents.
    CheckLayout {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the key labels a language shows in a keyboard state.
    Layout {
        #[arg(short, long, default_value = "tamil")]
        language: LanguageId,

        /// normal, shifted, symbols or shiftedSymbols
        #[arg(short, long, default_value = "normal", value_parser = parse_state)]
        state: KeyboardState,
    },
}

fn parse_state(s: &str) -> Result<KeyboardState, String> {
    KeyboardState::ALL
        .into_iter()
        .find(|state| state.as_str() == s)
        .ok_or_else(|| format!("unknown keyboard state: {}", s))
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            Settings::load_from(path).with_context(|| format!("Failed to load {:?}", path))
        }
        None => Settings::load(),
    }
}

/// Built-in layouts overlaid with the user's layout directory
fn layout_registry() -> LayoutRegistry {
    let mut registry = LayoutRegistry::builtin();
    if let Some(dir) = Settings::layout_dir().filter(|dir| dir.is_dir()) {
        match registry.load_dir(&dir) {
            Ok(n) => debug!("{} user layouts from {:?}", n, dir),
            Err(e) => eprintln!("Warning: {}", e),
        }
    }
    registry
}

#[derive(Serialize)]
struct KeyLine<'a> {
    #[serde(flatten)]
    outcome: &'a KeyOutcome,
    document: &'a str,
}

fn run_type(
    settings: &Settings,
    keys: &[String],
    language: Option<LanguageId>,
    words: Option<&Path>,
    before: &str,
    json: bool,
    worker: bool,
) -> Result<()> {
    let codes = parse_key_sequence(&keys.join(""))
        .map_err(|token| anyhow::anyhow!("unknown key token: {}", token))?;

    let mut controller = KeyboardController::new(
        Arc::new(layout_registry()),
        settings.mode_config(),
        settings.enabled_languages(),
    );
    if let Some(language) = language {
        controller.set_language(language);
    }
    let start = controller.language();

    let engine = Arc::new(CompositionEngine::with_config(settings.engine_config()));
    let mut session = Session::new(engine, controller);
    if let Some(path) = words {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {:?}", path))?;
        let mut predictor = WordListPredictor::new();
        let n = predictor.load_tsv(start, &content);
        eprintln!("Loaded {} {} words", n, start);
        session = session.with_predictor(Arc::new(predictor));
    }
    if worker {
        session = session.with_worker().context("Failed to start session worker")?;
    }

    let mut doc = DocumentBuffer::with_text(before);
    for code in codes {
        let outcome = session.handle_key(KeyEvent::key(code), &mut doc);
        if json {
            let line = KeyLine {
                outcome: &outcome,
                document: doc.text(),
            };
            println!("{}", serde_json::to_string(&line)?);
        }
    }
    if !json {
        println!("{}", doc.text());
    }
    Ok(())
}

fn run_check_layout(files: &[PathBuf]) -> Result<()> {
    let mut failed = 0;
    for path in files {
        let source =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        match LayoutDocument::parse(&source) {
            Ok(doc) => println!(
                "{}: {}/{} ok, {} rows, {} keys",
                path.display(),
                doc.language,
                doc.state.as_str(),
                doc.table.rows.len(),
                doc.table.key_count()
            ),
            Err(e) => {
                println!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{} of {} layouts invalid", failed, files.len());
    }
    Ok(())
}

fn run_layout(language: LanguageId, state: KeyboardState) -> Result<()> {
    let registry = layout_registry();
    let table = resolve_with_fallback(&registry, language, state)
        .with_context(|| format!("No layout for {}/{}", language, state.as_str()))?;
    for row in &table.rows {
        let labels: Vec<String> = row
            .keys
            .iter()
            .map(|key| key.label_for(state.is_shifted()))
            .collect();
        println!("{}", labels.join(" "));
    }
    Ok(())
}

fn main() -> Result<()> {
    akshara_im::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Type {
            keys,
            language,
            words,
            before,
            json,
            worker,
        } => {
            let settings = load_settings(cli.config.as_deref())?;
            run_type(
                &settings,
                &keys,
                language,
                words.as_deref(),
                &before,
                json,
                worker,
            )
        }
        Commands::CheckLayout { files } => run_check_layout(&files),
        Commands::Layout { language, state } => run_layout(language, state),
    }
}
