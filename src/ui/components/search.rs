//! Search bar and rating filter renderer.

use std::io::{self, Write};

use super::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{RatingButton, SearchBarInfo};

const SEARCH_BOX_MARGIN: usize = 5;

/// Renders a bordered search box spanning three rows.
///
/// ```text
///      ┌──────────────────────────────┐
///      │ Search: chicken              │
///      └──────────────────────────────┘
/// ```
pub fn render_search_bar<W: Write>(
    out: &mut W,
    row: usize,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(out, row, 1)?;
    write!(out, "{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset())?;

    let search_text: String = format!(" Search: {}", search.query)
        .chars()
        .take(inner_width)
        .collect();
    let padding = inner_width.saturating_sub(text_width(&search_text));

    position_cursor(out, row + 1, 1)?;
    write!(out, "{margin}{border}│{}", Theme::fg(&theme.colors.text_normal))?;
    write!(out, "{search_text}{}", " ".repeat(padding))?;
    write!(out, "{border}│{}", Theme::reset())?;

    position_cursor(out, row + 2, 1)?;
    write!(out, "{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset())?;

    Ok(row + 3)
}

/// Renders the minimum-rating buttons on one row; the active one is inverted.
pub fn render_rating_buttons<W: Write>(
    out: &mut W,
    row: usize,
    buttons: &[RatingButton],
    theme: &Theme,
) -> io::Result<usize> {
    position_cursor(out, row, 1)?;
    write!(out, "{}", " ".repeat(SEARCH_BOX_MARGIN))?;
    write!(out, "{}Min rating:{} ", Theme::fg(&theme.colors.text_dim), Theme::reset())?;

    for button in buttons {
        if button.is_active {
            write!(
                out,
                "{}{}{} [{}] {}",
                Theme::bold(),
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.rating_fg),
                button.label,
                Theme::reset()
            )?;
        } else {
            write!(
                out,
                "{}  {}  {}",
                Theme::fg(&theme.colors.rating_fg),
                button.label,
                Theme::reset()
            )?;
        }
    }
    Ok(row + 1)
}
