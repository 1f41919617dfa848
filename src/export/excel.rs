use rust_xlsxwriter::Workbook;

use crate::error::ExportError;

const SHEET_NAME: &str = "Results";

/// Worksheet bounds the encoder enforces
#[derive(Debug, Clone, Copy)]
pub(super) struct SheetLimits {
    /// Data rows, excluding the header row
    pub(super) rows: usize,
    pub(super) columns: usize,
    pub(super) cell_chars: usize,
}

pub(super) const XLSX_LIMITS: SheetLimits = SheetLimits {
    rows: 1_048_576 - 1,
    columns: 16_384,
    cell_chars: 32_767,
};

/// Positional grid extracted from the response text
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct Grid {
    pub(super) headers: Vec<String>,
    pub(super) rows: Vec<Vec<String>>,
}

/// Drop blank lines and quarter labels, split the rest on whitespace.
///
/// The column count is the widest row; shorter rows leave trailing cells
/// empty. Columns carry no meaning beyond their position.
pub(super) fn tabulate(content: &str) -> Grid {
    tabulate_within(content, XLSX_LIMITS)
}

/// Like [`tabulate`], but clamps the grid to `limits` instead of failing:
/// tokens past the last column are folded into it, overlong cells are cut
/// and rows past the limit are dropped.
pub(super) fn tabulate_within(content: &str, limits: SheetLimits) -> Grid {
    let retained = content
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('Q'));

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for line in retained {
        if rows.len() == limits.rows {
            dropped += 1;
            continue;
        }
        rows.push(split_row(line, limits));
    }
    if dropped > 0 {
        tracing::warn!(dropped, "spreadsheet row limit reached, remaining lines omitted");
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    Grid {
        headers: (1..=width).map(|i| format!("Column{i}")).collect(),
        rows,
    }
}

fn split_row(line: &str, limits: SheetLimits) -> Vec<String> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    let mut row: Vec<String> = Vec::with_capacity(tokens.len().min(limits.columns));
    if tokens.len() > limits.columns {
        let overflow = tokens.split_off(limits.columns - 1).join(" ");
        row.extend(tokens.into_iter().map(|t| clip(t, limits.cell_chars)));
        row.push(clip(&overflow, limits.cell_chars));
    } else {
        row.extend(tokens.into_iter().map(|t| clip(t, limits.cell_chars)));
    }
    row
}

fn clip(field: &str, max_chars: usize) -> String {
    match field.char_indices().nth(max_chars) {
        Some((end, _)) => field[..end].to_string(),
        None => field.to_string(),
    }
}

pub(super) fn render(content: &str) -> Result<Vec<u8>, ExportError> {
    let grid = tabulate(content);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in grid.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header.as_str())?;
    }
    for (row_idx, row) in grid.rows.iter().enumerate() {
        for (col, field) in row.iter().enumerate() {
            sheet.write_string(row_idx as u32 + 1, col as u16, field.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
