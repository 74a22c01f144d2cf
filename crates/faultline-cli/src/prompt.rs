use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::CliError;

/// Where a remedy for a recoverable failure comes from: normally the user at a terminal.
pub trait Prompt {
    /// Ask `question`; `None` means the user has nothing more to offer.
    fn ask(&mut self, question: &str) -> Result<Option<String>, CliError>;
}

/// Reads answers from stdin, one line each. EOF or an empty line ends the conversation.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> Result<Option<String>, CliError> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{question}")?;
        stderr.flush()?;

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }
}

/// Canned answers, for tests and non-interactive runs.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> Result<Option<String>, CliError> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front())
    }
}
