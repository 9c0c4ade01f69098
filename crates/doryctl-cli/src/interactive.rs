//! Interactive prompts for `login`.
//!
//! Uses dialoguer for terminal input and console for styling.

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password, theme::ColorfulTheme};

/// Values already given on the command line; their prompts are skipped.
#[derive(Debug, Clone, Default)]
pub struct PrefilledLogin {
    pub server_url: Option<String>,
    pub access_token: Option<String>,
}

/// Collected login values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAnswers {
    pub server_url: String,
    pub access_token: String,
}

/// Prompts for whatever `login` is missing.
pub struct LoginFlow<W: Write = io::Stderr> {
    prefilled: PrefilledLogin,
    writer: W,
    theme: ColorfulTheme,
}

impl LoginFlow<io::Stderr> {
    pub fn new(prefilled: PrefilledLogin) -> Self {
        Self {
            prefilled,
            writer: io::stderr(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl<W: Write> LoginFlow<W> {
    #[cfg(test)]
    pub fn with_writer(prefilled: PrefilledLogin, writer: W) -> Self {
        Self {
            prefilled,
            writer,
            theme: ColorfulTheme::default(),
        }
    }

    /// True when nothing needs to be asked.
    pub fn is_complete(&self) -> bool {
        self.prefilled.server_url.is_some() && self.prefilled.access_token.is_some()
    }

    pub fn collect(&mut self) -> Result<LoginAnswers> {
        if !self.is_complete() {
            self.print_header()?;
        }
        let server_url = self.prompt_server_url()?;
        let access_token = self.prompt_token(&server_url)?;
        Ok(LoginAnswers {
            server_url,
            access_token,
        })
    }

    fn print_header(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", style("  doryctl login").bold().cyan())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn prompt_server_url(&self) -> Result<String> {
        if let Some(url) = &self.prefilled.server_url {
            return Ok(url.clone());
        }
        let url = Input::<String>::with_theme(&self.theme)
            .with_prompt("dory-core server URL")
            .validate_with(|input: &String| -> Result<(), String> {
                doryctl_core::config::parse_server_url(input)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;
        Ok(url)
    }

    fn prompt_token(&self, server_url: &str) -> Result<String> {
        if let Some(token) = &self.prefilled.access_token {
            return Ok(token.clone());
        }
        let token = Password::with_theme(&self.theme)
            .with_prompt(format!("Access token for {server_url}"))
            .interact()?;
        Ok(token)
    }
}

/// Success line on stderr.
pub fn print_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Informational line on stderr.
pub fn print_note(message: &str) {
    eprintln!("{} {}", style("•").dim(), message);
}
