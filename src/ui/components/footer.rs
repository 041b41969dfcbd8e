//! Footer component renderer.

use std::io::{self, Write};

use super::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the centered, dimmed command hints. Text wider than the terminal
/// is cut.
pub fn render_footer<W: Write>(
    out: &mut W,
    row: usize,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let help_text: String = footer.keybindings.chars().take(cols).collect();
    let text_len = text_width(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(out, row, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
    write!(out, "{}", " ".repeat(padding))?;
    write!(out, "{help_text}")?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(padding + text_len)))?;
    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}
