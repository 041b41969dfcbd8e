//! Rendering capability injected into the session.
//!
//! The controller never draws or touches the clipboard itself. It hands a
//! [`UIViewModel`] to a [`Frontend`], which can be a terminal, a test
//! recorder or anything else that can show text.
//!
//! # Example
//!
//! ```rust
//! use recipe_client::app::AppState;
//! use recipe_client::ui::{Frontend, TerminalFrontend, Theme};
//!
//! let state = AppState::new(Theme::default());
//! let mut frontend = TerminalFrontend::new(Vec::new(), 24, 80);
//! frontend.render(&state.compute_viewmodel(24, 80), &state.theme)?;
//! assert!(!frontend.into_inner().is_empty());
//! # Ok::<(), recipe_client::RecipeClientError>(())
//! ```

use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::error::{RecipeClientError, Result};
use crate::ui::components::{position_cursor, render_frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Clipboard programs tried in order: Wayland, X11, macOS.
const CLIPBOARD_COMMANDS: [(&str, &[&str]); 3] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("pbcopy", &[]),
];

/// Display and clipboard capability used by the session.
pub trait Frontend {
    /// Terminal size as `(rows, cols)`.
    fn size(&self) -> (usize, usize);

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn render(&mut self, viewmodel: &UIViewModel, theme: &Theme) -> Result<()>;

    /// Places `text` on the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if no clipboard is reachable.
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;

    /// Shows free-form text such as help output until the next frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn show_text(&mut self, text: &str) -> Result<()>;
}

/// ANSI terminal frontend writing full-screen frames to `W`.
pub struct TerminalFrontend<W: Write> {
    out: W,
    rows: usize,
    cols: usize,
}

impl<W: Write> TerminalFrontend<W> {
    #[must_use]
    pub const fn new(out: W, rows: usize, cols: usize) -> Self {
        Self { out, rows, cols }
    }

    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Consumes the frontend, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn render(&mut self, viewmodel: &UIViewModel, theme: &Theme) -> Result<()> {
        // Clear screen, home cursor.
        write!(self.out, "\u{1b}[2J\u{1b}[H")?;
        render_frame(&mut self.out, viewmodel, theme, self.rows, self.cols)?;
        position_cursor(&mut self.out, self.rows + 1, 1)?;
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        for (program, args) in CLIPBOARD_COMMANDS {
            let Ok(mut child) = Command::new(program)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            else {
                tracing::debug!(program, "clipboard program unavailable");
                continue;
            };

            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes())?;
            }
            if child.wait()?.success() {
                tracing::debug!(program, bytes = text.len(), "copied to clipboard");
                return Ok(());
            }
        }
        Err(RecipeClientError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no clipboard program available",
        )))
    }

    fn show_text(&mut self, text: &str) -> Result<()> {
        write!(self.out, "\u{1b}[2J\u{1b}[H")?;
        for line in text.lines() {
            writeln!(self.out, "{line}\r")?;
        }
        write!(self.out, "\r\n> ")?;
        self.out.flush()?;
        Ok(())
    }
}
