use std::io;
use std::io::BufRead;
use std::io::Write;

use crossterm::terminal;
use thiserror::Error;

use crate::seed::Pattern;
use crate::seed::PatternError;

/// Inner width of the menu box
const MENU_WIDTH: usize = 30;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to talk to the terminal: {0}")]
    Io(#[from] io::Error),

    #[error("No selection was made")]
    NoInput,

    #[error("Invalid selection: {0}")]
    Pattern(#[from] PatternError),
}

/// Size of the terminal, in columns and rows.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    terminal::size()
}

/// Draw the pattern menu in a box.
///
/// ```notrust
/// ╔══════════════════════════════╗
/// ║ 0. random                    ║
/// ║ 1. gun                       ║
/// ║ 2. ships                     ║
/// ╚══════════════════════════════╝
/// ```
pub fn print_menu<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    let rule = "═".repeat(MENU_WIDTH);

    writeln!(out, "╔{rule}╗")?;
    for (i, pattern) in Pattern::ALL.iter().enumerate() {
        let entry = format!("{i}. {pattern}");
        writeln!(out, "║ {entry:<width$}║", width = MENU_WIDTH - 1)?;
    }
    writeln!(out, "╚{rule}╝")?;

    out.flush()
}

/// Show the menu on `output` and read the user's choice from `input`.
pub fn select_pattern<R, W>(input: &mut R, output: &mut W) -> Result<Pattern, PromptError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    print_menu(output)?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::NoInput);
    }

    Ok(line.parse()?)
}
