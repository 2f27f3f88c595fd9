//! Table and aligned key-value block rendering (§4.7).
//!
//! Deliberately border-free (no `┌`/`│`): compact views (task detail,
//! task list) use the key-value block instead of a table, and the plain
//! tables here never mix the two.

/// Renders a header row plus data rows, columns aligned with
/// two-space gutters.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(headers, &widths));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(render_row(&cells, &widths));
    }
    lines.join("\n")
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| format!("{:<width$}", cell, width = widths.get(i).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// An aligned `KEY: value` block, keys padded to a common width inside
/// `indent` spaces (four spaces for task details, §4.7).
pub fn render_kv_block(pairs: &[(&str, String)], indent: usize) -> String {
    let width = pairs.iter().map(|(k, _)| k.len() + 1).max().unwrap_or(0);
    let pad = " ".repeat(indent);
    pairs
        .iter()
        .map(|(k, v)| format!("{pad}{:<width$} {v}", format!("{k}:"), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
