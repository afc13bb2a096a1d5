//! Plain-text rendering of a grid for the terminal.

use std::fmt::Write;

use datagrid::Grid;
use griddom::text::display_width;

/// Render the visible columns and body rows as an aligned text table.
pub fn table(grid: &Grid) -> String {
    let Some(model) = grid.model() else {
        return format!("grid {} has no column header\n", grid.id());
    };

    let header: Vec<String> = model
        .columns
        .columns()
        .iter()
        .map(|c| c.label.clone())
        .collect();
    let rows: Vec<Vec<String>> = model
        .rows
        .iter()
        .map(|row| {
            row.child_elements()
                .iter()
                .filter(|c| c.tag.is_cell())
                .map(|c| c.text_content())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(display_width(cell));
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

/// Render the column menu with a checkbox per column.
pub fn menu(grid: &Grid) -> String {
    let Some(model) = grid.model() else {
        return String::new();
    };
    let mut out = String::new();
    for entry in &model.menu {
        let mark = if model.columns.contains(&entry.id) { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] {} ({})", entry.label, entry.id);
    }
    out
}
