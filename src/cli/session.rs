//! Line-based interactive session.
//!
//! Plain lines accumulate into the code buffer; lines starting with `:` are
//! commands. A line starting with `::` is code whose first character is `:`.
//! Each `:analyze` runs on a worker thread; the session waits on its
//! completion channel, so the history grows in completion order.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::clipboard::{ClipboardSink, copy_output_to};
use crate::models::{AnalysisRequest, AnalysisType};
use crate::pipeline::{AnalysisOutcome, Analyzer, PendingAnalysis};
use crate::render::{error_html, history_detail, history_summary, result_html};
use crate::transport::Transport;
use crate::utils::sanitize_for_terminal;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

const HELP: &str = "\
Type or paste code, then run it with :analyze.
  :analyze         send the buffered code
  :type <TYPE>     set the analysis type (e.g. :type find-bugs)
  :model <MODEL>   set the model identifier
  :history         list completed analyses
  :show <N>        show history entry N in full
  :copy            copy the last output to the clipboard
  :clear           empty the code buffer
  :help            show this help
  :quit            leave the session
Start a line with :: to enter code beginning with ':'.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Code(String),
    Analyze,
    SetType(AnalysisType),
    SetModel(String),
    History,
    /// One-based, as typed
    Show(usize),
    Copy,
    Clear,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> SessionCommand {
    let Some(command) = line.strip_prefix(':') else {
        return SessionCommand::Code(line.to_string());
    };
    if command.starts_with(':') {
        return SessionCommand::Code(command.to_string());
    }

    let command = command.trim();
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match (name, arg) {
        ("analyze" | "a", "") => SessionCommand::Analyze,
        ("type" | "t", "") => SessionCommand::Invalid(":type needs an analysis type".to_string()),
        ("type" | "t", arg) => match arg.parse() {
            Ok(analysis_type) => SessionCommand::SetType(analysis_type),
            Err(e) => SessionCommand::Invalid(e.to_string()),
        },
        ("model" | "m", "") => SessionCommand::Invalid(":model needs a model identifier".to_string()),
        ("model" | "m", arg) => SessionCommand::SetModel(arg.to_string()),
        ("history" | "h", "") => SessionCommand::History,
        ("show" | "s", arg) => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => SessionCommand::Show(n),
            _ => SessionCommand::Invalid(format!(":show needs an entry number (got '{}')", arg)),
        },
        ("copy", "") => SessionCommand::Copy,
        ("clear", "") => SessionCommand::Clear,
        ("help", "") => SessionCommand::Help,
        ("quit" | "q" | "exit", "") => SessionCommand::Quit,
        _ => SessionCommand::Invalid(format!("unknown command ':{}' (try :help)", command)),
    }
}

pub struct Session<T: Transport + 'static> {
    analyzer: Arc<Analyzer<T>>,
    analysis_type: AnalysisType,
    model: String,
    buffer: String,
    last_output: Option<String>,
    clipboard: Box<dyn ClipboardSink>,
    progress_interval: Duration,
}

impl<T: Transport + 'static> Session<T> {
    pub fn new(
        analyzer: Arc<Analyzer<T>>,
        analysis_type: AnalysisType,
        model: &str,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            analyzer,
            analysis_type,
            model: model.to_string(),
            buffer: String::new(),
            last_output: None,
            clipboard,
            progress_interval: PROGRESS_INTERVAL,
        }
    }

    /// How often a progress dot is printed while a request is in flight
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Read commands until `:quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        writeln!(output, "DevPilot session ({} / {}). :help for commands.", self.analysis_type, self.model)?;
        if !self.analyzer.has_api_key() {
            writeln!(output, "Warning: OPENROUTER_API_KEY is not set; analyses will be refused.")?;
        }

        for line in input.lines() {
            let line = line.context("Failed to read session input")?;
            if !self.handle(parse_command(&line), output)? {
                break;
            }
        }
        output.flush()?;
        Ok(())
    }

    /// Returns false when the session should end
    fn handle<W: Write>(&mut self, command: SessionCommand, output: &mut W) -> Result<bool> {
        match command {
            SessionCommand::Code(line) => {
                self.buffer.push_str(&line);
                self.buffer.push('\n');
            }
            SessionCommand::Analyze => self.analyze(output)?,
            SessionCommand::SetType(analysis_type) => {
                self.analysis_type = analysis_type;
                writeln!(output, "Analysis type: {}", analysis_type)?;
            }
            SessionCommand::SetModel(model) => {
                writeln!(output, "Model: {}", model)?;
                self.model = model;
            }
            SessionCommand::History => {
                let entries = self.analyzer.history_entries();
                if entries.is_empty() {
                    writeln!(output, "No history available yet.")?;
                }
                for (index, entry) in entries.iter().enumerate() {
                    writeln!(output, "{}", sanitize_for_terminal(&history_summary(index, entry)))?;
                }
            }
            SessionCommand::Show(number) => match self.analyzer.history_entry(number - 1) {
                Ok(entry) => {
                    write!(output, "{}", sanitize_for_terminal(&history_detail(number - 1, &entry)))?
                }
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
            SessionCommand::Copy => match &self.last_output {
                None => writeln!(output, "Nothing to copy yet.")?,
                Some(text) => match copy_output_to(text, self.clipboard.as_mut()) {
                    Ok(()) => writeln!(output, "Copied to clipboard!")?,
                    Err(e) => writeln!(output, "Error: {:#}", e)?,
                },
            },
            SessionCommand::Clear => {
                self.buffer.clear();
                writeln!(output, "Code buffer cleared.")?;
            }
            SessionCommand::Help => writeln!(output, "{}", HELP)?,
            SessionCommand::Quit => return Ok(false),
            SessionCommand::Invalid(message) => writeln!(output, "Error: {}", message)?,
        }
        Ok(true)
    }

    fn analyze<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let request = AnalysisRequest::new(self.buffer.clone(), self.analysis_type, self.model.clone());
        write!(output, "Contacting AI...")?;
        output.flush()?;

        let outcome = match self.analyzer.spawn_analysis(request) {
            Ok(pending) => self.await_completion(&pending, output)?,
            Err(e) => Err(e),
        };
        writeln!(output)?;
        let display = match outcome {
            Ok(result) => {
                if let Some(detail) = result.error_detail {
                    writeln!(output, "Error: could not extract the answer ({})", detail)?;
                }
                result_html(&result)
            }
            Err(e) => {
                writeln!(output, "Error: {}", sanitize_for_terminal(&e.to_string()))?;
                error_html(&e)
            }
        };

        writeln!(output, "{}", sanitize_for_terminal(&display))?;
        self.last_output = Some(display);
        Ok(())
    }

    /// Poll the worker, printing a dot per interval until it reports
    fn await_completion<W: Write>(
        &self,
        pending: &PendingAnalysis,
        output: &mut W,
    ) -> Result<AnalysisOutcome> {
        loop {
            if let Some(outcome) = pending.wait_timeout(self.progress_interval) {
                return Ok(outcome);
            }
            write!(output, ".")?;
            output.flush()?;
        }
    }
}
