//! Table component renderer.
//!
//! Renders saved recipes as ID, TITLE, INGREDIENTS, RATING and SAVED
//! columns with selection and search match highlighting.

use std::io::{self, Write};

use super::{position_cursor, write_highlighted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ingredients_column_width, DisplayItem, AGE_COLUMN_WIDTH, ID_COLUMN_WIDTH,
    RATING_COLUMN_WIDTH, TITLE_COLUMN_WIDTH,
};

/// Renders the bold column headers and returns the next row.
pub fn render_table_headers<W: Write>(
    out: &mut W,
    row: usize,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    position_cursor(out, row, 1)?;
    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    write!(
        out,
        "{:<id$}{:<title$}{:<ingredients$} {:<rating$}{:<age$}",
        "ID",
        "TITLE",
        "INGREDIENTS",
        "RATING",
        "SAVED",
        id = ID_COLUMN_WIDTH,
        title = TITLE_COLUMN_WIDTH,
        ingredients = ingredients_column_width(cols),
        rating = RATING_COLUMN_WIDTH,
        age = AGE_COLUMN_WIDTH,
    )?;
    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}

/// Renders all rows starting at `row` and returns the next free row.
pub fn render_table_rows<W: Write>(
    out: &mut W,
    row: usize,
    items: &[DisplayItem],
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(out, current_row, item, theme, cols)?;
    }
    Ok(current_row)
}

/// Renders a single row.
///
/// Selection colours fill the whole line; search matches keep their
/// highlight on top of them.
fn render_table_row<W: Write>(
    out: &mut W,
    row: usize,
    item: &DisplayItem,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    position_cursor(out, row, 1)?;

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    write!(out, "{base}")?;

    let ingredients_width = ingredients_column_width(cols);
    write!(out, "{:<width$}", item.id, width = ID_COLUMN_WIDTH)?;

    write_highlighted(out, &item.title, theme, &base)?;
    write!(out, "{}", " ".repeat(TITLE_COLUMN_WIDTH.saturating_sub(item.title.char_len())))?;

    write_highlighted(out, &item.ingredients, theme, &base)?;
    write!(
        out,
        "{} ",
        " ".repeat(ingredients_width.saturating_sub(item.ingredients.char_len()))
    )?;

    if !item.is_selected {
        write!(out, "{}", Theme::fg(&theme.colors.rating_fg))?;
    }
    write!(out, "{:<width$}", item.rating, width = RATING_COLUMN_WIDTH)?;
    if !item.is_selected {
        write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
    }
    write!(out, "{:<width$}", item.age, width = AGE_COLUMN_WIDTH)?;

    let line_len = ID_COLUMN_WIDTH
        + TITLE_COLUMN_WIDTH
        + ingredients_width
        + 1
        + RATING_COLUMN_WIDTH
        + AGE_COLUMN_WIDTH;
    write!(out, "{}", " ".repeat(cols.saturating_sub(line_len)))?;

    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}
