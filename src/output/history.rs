use comfy_table::Color;

use crate::output::format::{create_styled_table, header_cell, styled_cell};
use crate::session::SessionHistory;

pub(crate) const EMPTY_HISTORY: &str = "No queries recorded in this session.";

/// Session history as a table, most recent query first
pub(crate) fn render_history(history: &SessionHistory, use_color: bool) -> String {
    if history.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("User", use_color),
        header_cell("Date", use_color),
        header_cell("Airport", use_color),
        header_cell("Result", use_color),
    ]);

    let airport_color = if use_color { Some(Color::Yellow) } else { None };
    for entry in history.list_reversed() {
        table.add_row(vec![
            styled_cell(&entry.user, None),
            styled_cell(&entry.timestamp, None),
            styled_cell(&entry.airport, airport_color),
            styled_cell(&entry.result, None),
        ]);
    }

    table.to_string()
}
