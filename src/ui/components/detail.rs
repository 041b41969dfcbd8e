//! Detail panel renderer for one saved recipe.

use std::io::{self, Write};

use super::{position_cursor, write_wrapped};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

pub fn render_detail<W: Write>(
    out: &mut W,
    row: usize,
    last_row: usize,
    view: &DetailView,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    position_cursor(out, row, 1)?;
    write!(
        out,
        "{}#{} {}{}  {}{}{}",
        Theme::bold(),
        view.id,
        view.title,
        Theme::reset(),
        Theme::fg(&theme.colors.rating_fg),
        view.rating,
        Theme::reset()
    )?;

    let mut current_row = row + 1;
    for (label, value) in &view.meta {
        position_cursor(out, current_row, 1)?;
        write!(
            out,
            "{}{label}:{} {value}",
            Theme::fg(&theme.colors.text_dim),
            Theme::reset()
        )?;
        current_row += 1;
    }
    current_row += 1;

    write!(out, "{}", Theme::fg(&theme.colors.text_normal))?;
    current_row = write_wrapped(out, current_row, last_row, &view.body, cols)?;
    write!(out, "{}", Theme::reset())?;
    Ok(current_row)
}
