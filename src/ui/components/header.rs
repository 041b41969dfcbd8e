//! Header component renderer.
//!
//! Renders the title bar with centered text, theme-aware colors, and
//! optional background styling.

use std::io::{self, Write};

use super::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// Padding is split evenly on both sides to center the title. If the
/// terminal width cannot evenly divide, the right padding is larger.
pub fn render_header<W: Write>(
    out: &mut W,
    row: usize,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let title_len = text_width(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(out, row, 1)?;
    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    if let Some(bg) = &theme.colors.header_bg {
        write!(out, "{}", Theme::bg(bg))?;
    }

    write!(out, "{}", " ".repeat(padding))?;
    write!(out, "{}", header.title)?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(padding + title_len)))?;

    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}
