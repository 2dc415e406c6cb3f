//! Terminal I/O
//!
//! Line input shared by the interactive shell and the settings prompt,
//! and the terminal rendition of the permission modal.

use std::io::{self, IsTerminal, Write};

use async_trait::async_trait;

use supser_core::Color;
use supser_dialer::{PromptChoice, SettingsPrompt};

/// Read one line from stdin; `None` at end of input
///
/// Goes through the process-wide stdin buffer so the shell and the
/// prompt never steal each other's input.
pub async fn read_line() -> io::Result<Option<String>> {
    tokio::task::spawn_blocking(|| -> io::Result<Option<String>> {
        let mut line = String::new();
        match io::stdin().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
        }
    })
    .await
    .map_err(io::Error::other)?
}

pub fn print_prompt(prompt: &str) {
    print!("{}", prompt);
    let _ = io::stdout().flush();
}

/// Colorize `text` when stdout is a terminal
pub fn paint(text: &str, color: Color) -> String {
    if io::stdout().is_terminal() {
        format!("{}{}\x1b[0m", color.ansi_fg(), text)
    } else {
        text.to_string()
    }
}

/// Parse an answer to the settings modal
pub fn parse_choice(answer: &str) -> PromptChoice {
    match answer.trim().to_ascii_lowercase().as_str() {
        "s" | "settings" => PromptChoice::Settings,
        _ => PromptChoice::Cancel,
    }
}

/// Settings modal on the terminal
pub struct TerminalPrompt;

#[async_trait]
impl SettingsPrompt for TerminalPrompt {
    async fn ask(&self, message: &str) -> PromptChoice {
        println!("{}", message);
        print_prompt("[S]ettings / [C]ancel: ");
        match read_line().await {
            Ok(Some(answer)) => parse_choice(&answer),
            _ => PromptChoice::Cancel,
        }
    }
}

/// Fixed answer, for non-interactive runs
pub struct FixedPrompt(pub PromptChoice);

#[async_trait]
impl SettingsPrompt for FixedPrompt {
    async fn ask(&self, message: &str) -> PromptChoice {
        println!("{} -> {}", message, self.0.label());
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("S"), PromptChoice::Settings);
        assert_eq!(parse_choice(" settings "), PromptChoice::Settings);
        assert_eq!(parse_choice("c"), PromptChoice::Cancel);
        assert_eq!(parse_choice(""), PromptChoice::Cancel);
    }
}
