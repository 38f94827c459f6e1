//! Readline wrapper with per-field answer completion.

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Context, Editor, Helper};

/// Completes the whole line against a fixed set of answers (e.g. yes/no)
pub struct AnswerHelper {
    choices: Vec<String>,
    hinter: HistoryHinter,
}

impl AnswerHelper {
    pub fn new(choices: &[&str]) -> Self {
        Self {
            choices: choices.iter().map(|c| c.to_string()).collect(),
            hinter: HistoryHinter::default(),
        }
    }

    fn candidates(&self, line: &str) -> Vec<Pair> {
        let typed = line.trim_start().to_lowercase();
        let mut matches: Vec<Pair> = self
            .choices
            .iter()
            .filter(|c| c.to_lowercase().starts_with(&typed))
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            })
            .collect();

        matches.dedup_by(|a, b| a.replacement == b.replacement);
        matches
    }
}

impl Helper for AnswerHelper {}
impl Validator for AnswerHelper {}
impl Highlighter for AnswerHelper {}

impl Hinter for AnswerHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Completer for AnswerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(&line[..pos])))
    }
}

/// Thin wrapper over `rustyline::Editor` with swappable answer choices.
/// History is kept in memory for the current form only.
pub struct Readline {
    editor: Editor<AnswerHelper, DefaultHistory>,
}

impl Readline {
    pub fn new() -> anyhow::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(AnswerHelper::new(&[])));

        Ok(Self { editor })
    }

    /// Replace the answers offered on <Tab> for the next prompt.
    pub fn set_choices(&mut self, choices: &[&str]) {
        self.editor.set_helper(Some(AnswerHelper::new(choices)));
    }

    /// Prompt with the current value pre-filled so Enter keeps it.
    pub fn readline_with_initial(
        &mut self,
        prompt: &str,
        initial: &str,
    ) -> Result<String, ReadlineError> {
        let line = self.editor.readline_with_initial(prompt, (initial, ""))?;
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line.as_str());
        }
        Ok(line)
    }

    /// Utility for tests to inspect completions without invoking terminal input.
    pub fn completions(&self, line: &str) -> Vec<String> {
        if let Some(helper) = self.editor.helper() {
            let pos = line.len();
            let history = self.editor.history();
            if let Ok((_, pairs)) = helper.complete(line, pos, &Context::new(history)) {
                return pairs.into_iter().map(|p| p.replacement).collect();
            }
        }
        Vec::new()
    }
}
