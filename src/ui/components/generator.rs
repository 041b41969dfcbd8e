//! Generator panel renderer: the ingredient form and the current recipe.

use std::io::{self, Write};

use super::{position_cursor, write_wrapped};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::GeneratorView;

const LABEL_WIDTH: usize = 22;

pub fn render_generator<W: Write>(
    out: &mut W,
    row: usize,
    last_row: usize,
    view: &GeneratorView,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let mut current_row = row;

    let value_color = if view.editable {
        Theme::fg(&theme.colors.text_normal)
    } else {
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))
    };

    for field in &view.fields {
        position_cursor(out, current_row, 1)?;
        write!(
            out,
            "{}{:<width$}{}{value_color}{}{}",
            Theme::fg(&theme.colors.text_dim),
            format!("{}:", field.label),
            Theme::reset(),
            field.value,
            Theme::reset(),
            width = LABEL_WIDTH,
        )?;
        current_row += 1;
    }

    if let Some(feedback) = &view.feedback {
        position_cursor(out, current_row, 1)?;
        write!(
            out,
            "{}{}{}{}",
            " ".repeat(LABEL_WIDTH),
            Theme::fg(theme.severity_fg(feedback.severity)),
            feedback.message,
            Theme::reset()
        )?;
        current_row += 1;
    }

    current_row += 1;

    if view.loading {
        position_cursor(out, current_row, 1)?;
        write!(
            out,
            "{}Generating your recipe...{}",
            Theme::fg(&theme.colors.empty_state_fg),
            Theme::reset()
        )?;
        return Ok(current_row + 1);
    }

    let Some(recipe) = &view.recipe else {
        return Ok(current_row);
    };

    for (label, value) in &recipe.meta {
        position_cursor(out, current_row, 1)?;
        write!(
            out,
            "{}{label}:{} {value}",
            Theme::bold(),
            Theme::reset()
        )?;
        current_row += 1;
    }
    current_row += 1;

    write!(out, "{}", Theme::fg(&theme.colors.text_normal))?;
    current_row = write_wrapped(out, current_row, last_row, &recipe.body, cols)?;
    write!(out, "{}", Theme::reset())?;
    Ok(current_row)
}
