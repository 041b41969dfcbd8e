//! Empty state renderer.
//!
//! Shown in place of the recipe list for the search prompt, the no-results
//! messages and an empty library.

use std::io::{self, Write};

use super::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centered message and a dimmed subtitle below it.
pub fn render_empty_state<W: Write>(
    out: &mut W,
    row: usize,
    empty: &EmptyState,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let msg_len = text_width(&empty.message);
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(out, row, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.empty_state_fg))?;
    write!(out, "{}", " ".repeat(msg_padding))?;
    write!(out, "{}", empty.message)?;
    write!(out, "{}", Theme::reset())?;

    let sub_len = text_width(&empty.subtitle);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(out, row + 1, 1)?;
    write!(out, "{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))?;
    write!(out, "{}", " ".repeat(sub_padding))?;
    write!(out, "{}", empty.subtitle)?;
    write!(out, "{}", Theme::reset())?;
    Ok(row + 2)
}
