//! Composable UI component renderers.
//!
//! Each component writes one part of the screen to an [`io::Write`] at a
//! given row and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`notice`]: Notification line and the about dialog
//! - [`generator`]: Ingredient form and generated recipe
//! - [`search`]: Search input box and rating filter buttons
//! - [`table`]: Saved recipe list with highlighted matches
//! - [`detail`]: One saved recipe in full
//! - [`empty`]: Prompt or no-results message
//! - [`footer`]: Command hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Notification or blank]
//! [Panel body ...]
//! [Border]
//! [Footer]
//! ```
//!
//! # Example
//!
//! ```rust
//! use recipe_client::app::AppState;
//! use recipe_client::ui::components::render_frame;
//! use recipe_client::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! let vm = state.compute_viewmodel(24, 80);
//! let mut out = Vec::new();
//! render_frame(&mut out, &vm, &state.theme, 24, 80)?;
//! assert!(String::from_utf8_lossy(&out).contains("Recipe Generator"));
//! # Ok::<(), std::io::Error>(())
//! ```

mod detail;
mod empty;
mod footer;
mod generator;
mod header;
mod notice;
mod search;
mod table;

use std::io::{self, Write};

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HighlightedText, PanelView, UIViewModel};

/// Rows below the body reserved for the bottom border and footer.
const FOOTER_ROWS: usize = 2;

/// Renders a whole frame.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render_frame<W: Write>(
    out: &mut W,
    vm: &UIViewModel,
    theme: &Theme,
    rows: usize,
    cols: usize,
) -> io::Result<()> {
    let mut current_row = 1;
    current_row = header::render_header(out, current_row, &vm.header, theme, cols)?;
    current_row = render_border(out, current_row, &theme.colors.border, cols)?;
    current_row = notice::render_notification(out, current_row, vm.notification.as_ref(), theme, cols)?;

    let footer_row = rows.max(current_row + FOOTER_ROWS);
    let last_body_row = footer_row - FOOTER_ROWS;

    match &vm.body {
        PanelView::Generator(view) => {
            generator::render_generator(out, current_row, last_body_row, view, theme, cols)?;
        }
        PanelView::Library(view) => {
            current_row = search::render_search_bar(out, current_row, &view.search_bar, theme, cols)?;
            current_row = search::render_rating_buttons(out, current_row, &view.rating_buttons, theme)?;
            if let Some(empty) = &view.empty_state {
                empty::render_empty_state(out, current_row + 1, empty, theme, cols)?;
            } else {
                current_row = table::render_table_headers(out, current_row, theme, cols)?;
                table::render_table_rows(out, current_row, &view.display_items, theme, cols)?;
            }
        }
        PanelView::Detail(view) => {
            detail::render_detail(out, current_row, last_body_row, view, theme, cols)?;
        }
    }

    if let Some(about) = &vm.about {
        notice::render_about(out, 4, about, theme, cols)?;
    }

    render_border(out, footer_row - 1, &theme.colors.border, cols)?;
    footer::render_footer(out, footer_row, &vm.footer, theme, cols)?;
    out.flush()
}

/// Positions the cursor at a 1-indexed row and column.
pub(crate) fn position_cursor<W: Write>(out: &mut W, row: usize, col: usize) -> io::Result<()> {
    write!(out, "\u{1b}[{row};{col}H")
}

/// Renders a horizontal border line and returns the next row.
fn render_border<W: Write>(out: &mut W, row: usize, color: &str, cols: usize) -> io::Result<usize> {
    position_cursor(out, row, 1)?;
    write!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())?;
    Ok(row + 1)
}

/// Writes `text` with its highlight ranges in match colours.
///
/// `restore` is re-emitted after each highlighted run so the surrounding
/// colour (normal or selection) continues.
pub(crate) fn write_highlighted<W: Write>(
    out: &mut W,
    text: &HighlightedText,
    theme: &Theme,
    restore: &str,
) -> io::Result<()> {
    for (segment, highlighted) in text.segments() {
        if highlighted {
            write!(
                out,
                "{}{}{segment}{}{restore}",
                Theme::fg(&theme.colors.match_highlight_fg),
                Theme::bg(&theme.colors.match_highlight_bg),
                Theme::reset(),
            )?;
        } else {
            write!(out, "{segment}")?;
        }
    }
    Ok(())
}

/// Writes `text` wrapped to `cols` from `row` up to `last_row` inclusive.
///
/// Returns the next free row. Lines that do not fit are dropped and a dim
/// ellipsis marks the cut.
pub(crate) fn write_wrapped<W: Write>(
    out: &mut W,
    row: usize,
    last_row: usize,
    text: &str,
    cols: usize,
) -> io::Result<usize> {
    let width = cols.max(1);
    let mut current_row = row;

    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        let chunks: Vec<String> = if chars.is_empty() {
            vec![String::new()]
        } else {
            chars.chunks(width).map(|c| c.iter().collect()).collect()
        };
        for chunk in chunks {
            if current_row > last_row {
                position_cursor(out, last_row, 1)?;
                write!(out, "{}...{}", Theme::dim(), Theme::reset())?;
                return Ok(current_row);
            }
            position_cursor(out, current_row, 1)?;
            write!(out, "{chunk}")?;
            current_row += 1;
        }
    }
    Ok(current_row)
}

/// Width of `text` in characters.
pub(crate) fn text_width(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{generated, summary};
    use crate::app::modes::Panel;
    use crate::app::AppState;
    use crate::domain::search::SearchQuery;

    fn strip_ansi(raw: &[u8]) -> String {
        let text = String::from_utf8_lossy(raw);
        let mut plain = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                plain.push(c);
            }
        }
        plain
    }

    fn render(state: &AppState) -> String {
        let vm = state.compute_viewmodel(24, 100);
        let mut out = Vec::new();
        render_frame(&mut out, &vm, &state.theme, 24, 100).unwrap();
        strip_ansi(&out)
    }

    #[test]
    fn library_frame_shows_rows_and_filters() {
        let mut state = AppState::new(Theme::default());
        state.panel = Panel::Library;
        state.apply_listing(
            SearchQuery::new("soup", None),
            vec![summary(1, "Tomato Soup", "tomato, basil", Some(4))],
        );

        let screen = render(&state);
        assert!(screen.contains("Tomato Soup"));
        assert!(screen.contains("★★★★☆"));
        assert!(screen.contains("3+★"));
    }

    #[test]
    fn generator_frame_shows_recipe_and_feedback() {
        let mut state = AppState::new(Theme::default());
        state.form.ingredients = "eggs, flour".to_string();
        state.current_recipe = Some(generated("Whisk the eggs.\nFold in flour."));
        state.recipe_visible = true;
        state.set_feedback(crate::app::modes::Severity::Success, "Looks good");

        let screen = render(&state);
        assert!(screen.contains("eggs, flour"));
        assert!(screen.contains("Looks good"));
        assert!(screen.contains("Fold in flour."));
    }

    #[test]
    fn wrapped_text_stops_at_last_row() {
        let mut out = Vec::new();
        let next = write_wrapped(&mut out, 1, 2, "abcdef\nghi\njkl", 3).unwrap();
        assert_eq!(next, 3);
        let plain = strip_ansi(&out);
        assert!(plain.contains("abc") && plain.contains("..."));
        assert!(!plain.contains("jkl"));
    }
}
