use std::fmt::Write;

use super::{BriefingMode, BriefingRequest};
use crate::consts::NOT_AVAILABLE;

const CONSERVATIVE_CLAUSE: &str =
    "- Apply an 85% safety margin to every W/C and ISA DEV figure before reporting it.";
const RAW_CLAUSE: &str =
    "- Report W/C and ISA DEV figures as-is. Do not apply any safety margin.";

fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

fn margin_clause(mode: BriefingMode) -> &'static str {
    match mode {
        BriefingMode::Conservative => CONSERVATIVE_CLAUSE,
        BriefingMode::Raw => RAW_CLAUSE,
    }
}

/// Render the natural-language request for the completion model.
///
/// Deterministic: the same request always yields the same text, and the
/// two modes differ only in the margin line.
pub(crate) fn build_prompt(request: &BriefingRequest) -> String {
    let quarters = request
        .quarters
        .iter()
        .map(|q| q.label())
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str(
        "Consider the following user-supplied information to produce average \
         meteorological data applicable to flight operations:\n\n",
    );
    let _ = writeln!(out, "1. Departure airport: {}", request.departure);
    let _ = writeln!(
        out,
        "2. Arrival airport: {}",
        or_placeholder(request.arrival.as_deref())
    );
    let _ = writeln!(
        out,
        "3. Departure time: {} UTC",
        request.departure_time.format("%H:%M")
    );
    let _ = writeln!(
        out,
        "4. Planned route: {}",
        or_placeholder(request.route.as_deref())
    );
    let _ = writeln!(
        out,
        "5. Flight levels per segment: {}",
        or_placeholder(request.flight_levels.as_deref())
    );
    let _ = writeln!(out, "6. Selected quarters: {quarters}");
    out.push('\n');
    out.push_str("Based on this information, provide:\n\n");
    out.push_str(
        "- Average temperature and expected QNH at the departure airport for the given time, \
         using historical climatology, official data and the correct UTC conversion for the \
         airport's time zone.\n",
    );
    out.push_str("- For each route segment provided:\n");
    out.push_str("   - The average wind component (W/C)\n");
    out.push_str("   - The temperature deviation from the standard atmosphere (ISA DEV)\n");
    out.push_str(margin_clause(request.mode));
    out.push_str("\n\n");
    out.push_str("Output format per quarter:\n\n");
    out.push_str("QX\n");
    out.push_str("W/C Mxxx     ISA DEV Pxx\n\n");
    out.push_str(
        "Avoid additional explanations. Return only the requested data, objectively, \
         as in a technical briefing.\n",
    );
    out
}
