//! Interactive session
//!
//! Reads commands line by line. `query` walks through the briefing form one
//! field at a time; the session's history and latest result live until the
//! shell exits.

use std::io::{BufRead, Write};

use chrono::Utc;

use crate::app::{CommandContext, export_to_dir, now_time_of_day, run_briefing};
use crate::briefing::{BriefingForm, BriefingMode, Quarter};
use crate::error::AppError;
use crate::export::{ExportFormat, default_base_name};
use crate::output::{render_history, render_result};
use crate::session::Session;
use crate::utils::parse_time_of_day;

const DEFAULT_DEPARTURE: &str = "SKBO";

const HELP: &str = "\
Commands:
  query                   fill in the briefing form and send it
  history                 show this session's queries, most recent first
  export <FORMAT> [NAME]  export the latest result (TXT, XML, PDF, Excel)
  help                    show this help
  quit                    end the session";

/// Prompt for one field. `None` means the input ended.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    default: Option<&str>,
) -> std::io::Result<Option<String>> {
    match default {
        Some(d) => write!(out, "{label} [{d}]: ")?,
        None => write!(out, "{label}: ")?,
    }
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let value = line.trim();
    if value.is_empty() {
        Ok(Some(default.unwrap_or_default().to_string()))
    } else {
        Ok(Some(value.to_string()))
    }
}

/// Collect the form interactively. `Ok(None)` when the input ends midway.
fn read_form<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    default_mode: BriefingMode,
) -> Result<Option<BriefingForm>, AppError> {
    let mode_default = match default_mode {
        BriefingMode::Raw => "raw",
        BriefingMode::Conservative => "conservative",
    };

    let Some(departure) = ask(input, out, "Departure (ICAO)", Some(DEFAULT_DEPARTURE))? else {
        return Ok(None);
    };
    let Some(arrival) = ask(input, out, "Arrival (ICAO)", None)? else {
        return Ok(None);
    };
    let Some(time) = ask(input, out, "Departure time UTC (HH:MM, blank for now)", None)? else {
        return Ok(None);
    };
    let Some(route) = ask(input, out, "Route (fixes, airways)", None)? else {
        return Ok(None);
    };
    let Some(levels) = ask(input, out, "Flight levels per fix (e.g. TERAS/F340 JCL/F360)", None)? else {
        return Ok(None);
    };
    let Some(quarters) = ask(input, out, "Quarters (e.g. Q1,Q3)", None)? else {
        return Ok(None);
    };
    let Some(mode) = ask(input, out, "Mode (raw/conservative)", Some(mode_default))? else {
        return Ok(None);
    };

    let departure_time = if time.is_empty() {
        None
    } else {
        Some(parse_time_of_day(&time)?)
    };

    Ok(Some(BriefingForm {
        departure,
        arrival,
        departure_time,
        route,
        flight_levels: levels,
        quarters: Quarter::parse_list(&quarters)?,
        mode: BriefingMode::parse(&mode)?,
    }))
}

enum Flow {
    Continue,
    Stop,
}

fn shell_query<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    ctx: &CommandContext<'_>,
    session: &mut Session,
) -> Result<Flow, AppError> {
    let form = match read_form(input, out, ctx.default_mode) {
        Ok(Some(form)) => form,
        Ok(None) => return Ok(Flow::Stop),
        Err(AppError::Io(e)) => return Err(AppError::Io(e)),
        Err(e) => {
            writeln!(out, "Warning: {e}")?;
            return Ok(Flow::Continue);
        }
    };
    let request = match form.into_request(now_time_of_day()) {
        Ok(r) => r,
        Err(e) => {
            writeln!(out, "Warning: {e}")?;
            return Ok(Flow::Continue);
        }
    };

    let result = run_briefing(&request, ctx, session);
    write!(out, "{}", render_result(&result, request.mode))?;
    Ok(Flow::Continue)
}

fn shell_export<W: Write>(
    out: &mut W,
    args: &[&str],
    ctx: &CommandContext<'_>,
    session: &Session,
) -> Result<(), AppError> {
    let Some(format) = args.first() else {
        writeln!(out, "Usage: export <FORMAT> [NAME]")?;
        return Ok(());
    };
    let Some(last) = session.last_result() else {
        writeln!(out, "Warning: {}", AppError::NothingToExport)?;
        return Ok(());
    };

    let base_name = match args.get(1) {
        Some(name) => (*name).to_string(),
        None => default_base_name(&last.airport, Utc::now(), ctx.timezone),
    };
    match export_to_dir(
        &last.response_text(),
        &ExportFormat::from(*format),
        &base_name,
        &ctx.out_dir,
    ) {
        Ok(path) => writeln!(out, "Exported to {}", path.display())?,
        Err(AppError::Io(e)) => return Err(AppError::Io(e)),
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    Ok(())
}

/// Run the session until `quit` or end of input
pub(crate) fn run_shell<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    ctx: &CommandContext<'_>,
    session: &mut Session,
) -> Result<(), AppError> {
    writeln!(out, "Signed in as {}. Type 'help' for commands.", session.user())?;

    loop {
        write!(out, "flightwx> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command.to_ascii_lowercase().as_str() {
            "query" => {
                if let Flow::Stop = shell_query(&mut input, out, ctx, session)? {
                    writeln!(out)?;
                    break;
                }
            }
            "history" => writeln!(out, "{}", render_history(session.history(), ctx.use_color))?,
            "export" => shell_export(out, &args, ctx, session)?,
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => break,
            other => writeln!(out, "Unknown command: {other}. Type 'help' for commands.")?,
        }
    }

    tracing::debug!(queries = session.history().len(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::app::tests::{FakeClient, context, session};
    use crate::completion::CompletionFailure;

    fn run(script: &str, client: &FakeClient, dir: &std::path::Path) -> (String, Session) {
        let ctx = context(client, dir);
        let mut s = session();
        let mut out = Vec::new();
        run_shell(Cursor::new(script.to_string()), &mut out, &ctx, &mut s).unwrap();
        (String::from_utf8(out).unwrap(), s)
    }

    const QUERY_SKBO: &str = "query\nSKBO\nSCEL\n14:30\nUL780\nTERAS/F340\nQ1,Q3\nconservative\n";

    #[test]
    fn query_then_history() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::answering("Q1\nW/C M010     ISA DEV P02");
        let script = format!("{QUERY_SKBO}history\nquit\n");
        let (out, s) = run(&script, &client, dir.path());

        assert!(out.contains("Estimates with 85% safety margin:"));
        assert!(out.contains("W/C M010"));
        assert!(out.contains("usuario1"));
        assert_eq!(s.history().len(), 1);
        assert!(client.prompts.borrow()[0].contains("Q1, Q3"));
    }

    #[test]
    fn blank_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::answering("ok");
        let (_, s) = run("query\n\n\n\n\n\nQ2\n\nquit\n", &client, dir.path());
        let entry = s.history().list_reversed().next().unwrap();
        assert_eq!(entry.airport, "SKBO");
        let prompt = &client.prompts.borrow()[0];
        assert!(prompt.contains("Arrival airport: N/A"));
        assert!(prompt.contains("85% safety margin"));
    }

    #[test]
    fn missing_quarters_warns_and_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::answering("unused");
        let (out, s) = run("query\nSKBO\n\n\n\n\n\n\nquit\n", &client, dir.path());
        assert!(out.contains("Warning: Fill in all required fields"));
        assert!(out.contains("quarters"));
        assert!(client.prompts.borrow().is_empty());
        assert!(s.history().is_empty());
    }

    #[test]
    fn invalid_quarter_warns_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::answering("unused");
        let (out, _) = run("query\nSKBO\n\n\n\n\nQ7\n\nhelp\nquit\n", &client, dir.path());
        assert!(out.contains("Warning: Invalid quarter \"Q7\""));
        assert!(out.contains("Commands:"));
    }

    #[test]
    fn export_latest_result() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::answering("Q1\nW/C M010     ISA DEV P02");
        let script = format!("{QUERY_SKBO}export xml brief\nexport YAML other\nquit\n");
        let (out, _) = run(&script, &client, dir.path());

        assert!(out.contains("Exported to"));
        let xml = std::fs::read_to_string(dir.path().join("brief.xml")).unwrap();
        assert!(xml.contains("<![CDATA[Q1\nW/C M010     ISA DEV P02]]>"));
        let txt = std::fs::read_to_string(dir.path().join("other.txt")).unwrap();
        assert_eq!(txt, "Q1\nW/C M010     ISA DEV P02");
    }

    #[test]
    fn export_before_query_warns() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::answering("unused");
        let (out, _) = run("export txt\nquit\n", &client, dir.path());
        assert!(out.contains("No result to export yet"));
    }

    #[test]
    fn failed_completion_is_shown_and_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::failing(CompletionFailure::Status { status: 401 });
        let script = format!("{QUERY_SKBO}history\n");
        let (out, s) = run(&script, &client, dir.path());
        assert!(out.contains("Briefing request failed:"));
        assert!(out.contains("API request failed: server responded with HTTP 401"));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn end_of_input_mid_form_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::answering("unused");
        let (_, s) = run("query\nSKBO\n", &client, dir.path());
        assert!(s.history().is_empty());
        assert!(client.prompts.borrow().is_empty());
    }

    #[test]
    fn empty_history_message() {
        let dir = tempfile::tempdir().unwrap();
        let client = FakeClient::answering("unused");
        let (out, _) = run("history\nbogus\n", &client, dir.path());
        assert!(out.contains("No queries recorded in this session."));
        assert!(out.contains("Unknown command: bogus"));
    }
}
