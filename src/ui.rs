// UI layer: the interactive configure flow, the request spinner and the
// top-level error printer. Prompts go through `dialoguer` on a terminal and
// fall back to plain line reads when stdin is piped.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{self, Config};
use crate::error::LookupError;

/// Reads answers either from a terminal prompt or from piped stdin.
struct Prompter {
    interactive: bool,
}

impl Prompter {
    fn new() -> Self {
        Prompter {
            interactive: io::stdin().is_terminal(),
        }
    }

    /// Ask for one value. Empty answers are accepted, and so is EOF on a
    /// pipe (it yields an empty string).
    fn ask(&self, prompt: &str) -> Result<String, LookupError> {
        if self.interactive {
            let answer: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            return Ok(answer);
        }

        let mut out = io::stdout();
        write!(out, "{prompt}: ")?;
        out.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Collect the API key and display type (from flags or prompts), normalise
/// them and write the config file.
pub fn configure(path: &Path, api_key: Option<&str>, display_type: Option<&str>) -> Result<Config> {
    let prompter = Prompter::new();

    let api_key = match api_key {
        Some(k) => k.to_string(),
        None => prompter.ask("Enter API_KEY").context("reading API key")?,
    };
    let display_type = match display_type {
        Some(d) => d.to_string(),
        None => prompter
            .ask("Enter DISPLAY_TYPE (TABLE or PLAIN)")
            .context("reading display type")?,
    };

    let cfg = Config::from_input(&api_key, &display_type);
    config::save(path, &cfg)?;
    println!("Configuration saved successfully.");
    Ok(cfg)
}

/// Spinner shown on stderr while a request is in flight. indicatif hides it
/// when stderr is not a terminal.
pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print an error and its cause chain to stdout, next to normal output.
pub fn print_error(err: &anyhow::Error) {
    let stdout = io::stdout();
    let label = if stdout.is_terminal() {
        "Error:".red().bold().to_string()
    } else {
        "Error:".to_string()
    };
    let mut out = stdout.lock();
    let _ = writeln!(out, "{label} {err:#}");
}
