use std::borrow::Cow;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::ExportError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 10.0;
const TOP_MARGIN_MM: f32 = 10.0;
/// Rows stop this far above the bottom edge
const BOTTOM_MARGIN_MM: f32 = 20.0;
const ROW_HEIGHT_MM: f32 = 5.0;
/// Distance from the top of a row to the text baseline
const BASELINE_OFFSET_MM: f32 = 3.5;
const FONT_SIZE_PT: f32 = 10.0;

fn rows_per_page() -> usize {
    ((PAGE_HEIGHT_MM - TOP_MARGIN_MM - BOTTOM_MARGIN_MM) / ROW_HEIGHT_MM).floor() as usize
}

/// One fixed-height row per line, breaking to a new page once the next
/// row would cross the bottom margin. Always at least one page.
pub(super) fn paginate(content: &str) -> Vec<Vec<&str>> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines
        .chunks(rows_per_page())
        .map(<[&str]>::to_vec)
        .collect()
}

/// Code points 0x80..=0x9F that Windows-1252 remaps to printable glyphs
const WIN_ANSI_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

const REPLACEMENT: char = '?';

fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(&c)
}

/// The built-in fonts only carry WinAnsi glyphs and the encoder drops
/// anything else, so tabs become spaces and other characters become `?`.
pub(super) fn to_win_ansi(line: &str) -> Cow<'_, str> {
    if line.chars().all(is_win_ansi) {
        return Cow::Borrowed(line);
    }
    Cow::Owned(
        line.chars()
            .map(|c| match c {
                '\t' => ' ',
                c if is_win_ansi(c) => c,
                _ => REPLACEMENT,
            })
            .collect(),
    )
}

fn baseline_mm(row: usize) -> f32 {
    PAGE_HEIGHT_MM - (TOP_MARGIN_MM + row as f32 * ROW_HEIGHT_MM + BASELINE_OFFSET_MM)
}

pub(super) fn render(content: &str) -> Result<Vec<u8>, ExportError> {
    let pages = paginate(content);
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Flight briefing",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    for (n, rows) in pages.iter().enumerate() {
        let (page, layer) = if n == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);
        for (row, line) in rows.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            layer.use_text(
                to_win_ansi(line),
                FONT_SIZE_PT,
                Mm(LEFT_MARGIN_MM),
                Mm(baseline_mm(row)),
                &font,
            );
        }
    }

    tracing::debug!(pages = pages.len(), "rendered pdf");
    Ok(doc.save_to_bytes()?)
}
