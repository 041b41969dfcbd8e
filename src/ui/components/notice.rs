//! Notification line and about dialog renderers.

use std::io::{self, Write};

use super::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{AboutView, NotificationView};

/// Renders the notification, or a blank line when there is none.
pub fn render_notification<W: Write>(
    out: &mut W,
    row: usize,
    notification: Option<&NotificationView>,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    position_cursor(out, row, 1)?;
    if let Some(notification) = notification {
        let text_len = text_width(&notification.message);
        let padding = cols.saturating_sub(text_len) / 2;
        write!(
            out,
            "{}{}{}{}{}",
            Theme::bold(),
            Theme::fg(theme.severity_fg(notification.severity)),
            " ".repeat(padding),
            notification.message,
            Theme::reset()
        )?;
    }
    Ok(row + 1)
}

/// Draws the about box over whatever is below it.
pub fn render_about<W: Write>(
    out: &mut W,
    row: usize,
    about: &AboutView,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let inner_width = about.lines.iter().map(|l| text_width(l)).max().unwrap_or(0) + 2;
    let left = cols.saturating_sub(inner_width + 2) / 2 + 1;
    let border = Theme::fg(&theme.colors.border);

    position_cursor(out, row, left)?;
    write!(out, "{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset())?;

    let mut current_row = row + 1;
    for line in &about.lines {
        position_cursor(out, current_row, left)?;
        write!(
            out,
            "{border}│{} {line}{} {border}│{}",
            Theme::fg(&theme.colors.text_normal),
            " ".repeat(inner_width - 2 - text_width(line)),
            Theme::reset()
        )?;
        current_row += 1;
    }

    position_cursor(out, current_row, left)?;
    write!(out, "{border}└{}┘{}", "─".repeat(inner_width), Theme::reset())?;
    Ok(current_row + 1)
}
