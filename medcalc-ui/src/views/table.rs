//! Text rendering of the results area.

use medcalc_core::{AdjustedYearRow, Cell, ErrorKind, View, calculations::common::format_amount};

use crate::i18n::Translator;

/// Render exactly one of: idle note, loading line, error banner, or table.
pub fn render_view(
    view: &View,
    index_columns: &[String],
    t: &Translator,
) -> String {
    match view {
        View::Idle => t.t("No projection requested yet").to_string(),
        View::Loading => t.t("Loading").to_string(),
        View::Error { kind, message } => render_error(*kind, message, t),
        View::Table(rows) => render_table(rows, index_columns, t),
    }
}

fn render_error(
    kind: ErrorKind,
    message: &str,
    t: &Translator,
) -> String {
    let label = t.t("Error");
    match kind {
        ErrorKind::Request => format!("{label}: {message}"),
        ErrorKind::DataConsistency => format!("{label} [data]: {message}"),
    }
}

/// Index columns first in configured order, then the rest alphabetically.
fn column_order(
    rows: &[AdjustedYearRow],
    index_columns: &[String],
) -> Vec<String> {
    let present = |column: &str| rows.iter().any(|row| row.cells.contains_key(column));

    let mut columns: Vec<String> = index_columns
        .iter()
        .filter(|column| present(column))
        .cloned()
        .collect();
    let fixed = columns.len();

    for row in rows {
        for key in row.cells.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    columns[fixed..].sort();
    columns
}

fn format_cell(
    cell: Option<&Cell>,
    is_index: bool,
) -> String {
    match cell {
        Some(Cell::Amount(value)) if !is_index => format_amount(*value),
        Some(cell) => cell.to_string(),
        None => String::new(),
    }
}

fn render_table(
    rows: &[AdjustedYearRow],
    index_columns: &[String],
    t: &Translator,
) -> String {
    let columns = column_order(rows, index_columns);

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    grid.push(
        std::iter::once(t.t("Year #").to_string())
            .chain(columns.iter().map(|c| t.t(c).to_string()))
            .collect(),
    );
    for row in rows {
        let mut line = vec![(row.year_index + 1).to_string()];
        for column in &columns {
            let is_index = index_columns.contains(column);
            line.push(format_cell(row.cells.get(column), is_index));
        }
        grid.push(line);
    }

    let widths: Vec<usize> = (0..=columns.len())
        .map(|i| {
            grid.iter()
                .map(|line| line[i].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    grid.iter()
        .map(|line| {
            line.iter()
                .zip(&widths)
                .map(|(text, width)| format!("{text:>width$}"))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
