//! Input and output collaborators
//!
//! The engine never touches a terminal. It asks an `InputSource` for one
//! line at a time and hands every line it wants shown to an `OutputSink`.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use tracing::warn;

/// Where answers come from
pub trait InputSource {
    /// Ask for one line. End of input yields an empty string.
    fn request_line(&mut self, prompt: &str) -> String;
}

/// Where game text goes, in order
pub trait OutputSink {
    fn emit_line(&mut self, text: &str);
}

/// Reads answers from standard input
#[derive(Debug, Default)]
pub struct StdioInput;

impl InputSource for StdioInput {
    fn request_line(&mut self, prompt: &str) -> String {
        let mut stdout = io::stdout();
        // A failed flush only delays the prompt
        let _ = write!(stdout, "{} > ", prompt).and_then(|_| stdout.flush());

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "failed to read stdin, treating as end of input");
                String::new()
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit_line(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// A fixed queue of answers, empty once exhausted
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    /// Every prompt asked so far
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl InputSource for ScriptedInput {
    fn request_line(&mut self, prompt: &str) -> String {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or_default()
    }
}

/// Collects every emitted line
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub lines: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl OutputSink for RecordingSink {
    fn emit_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_runs_dry() {
        let mut input = ScriptedInput::new(["3", "a"]);
        assert_eq!(input.request_line("bid"), "3");
        assert_eq!(input.request_line("variant"), "a");
        assert_eq!(input.request_line("anything"), "");
        assert_eq!(input.prompts.len(), 3);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.emit_line("one");
        sink.emit_line("two");
        assert_eq!(sink.lines, vec!["one", "two"]);
        assert!(sink.contains("tw"));
    }
}
