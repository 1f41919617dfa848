use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveTime, Timelike, Utc};

use crate::briefing::{BriefingMode, BriefingRequest, BriefingResult, build_prompt};
use crate::cli::{Commands, ExportArgs, FormArgs, QueryArgs};
use crate::completion::CompletionClient;
use crate::error::AppError;
use crate::export::{ExportFormat, default_base_name, deliver, export};
use crate::output::render_result;
use crate::session::Session;
use crate::shell::run_shell;
use crate::utils::Timezone;

pub(crate) struct CommandContext<'a> {
    pub(crate) client: &'a dyn CompletionClient,
    pub(crate) timezone: Timezone,
    pub(crate) default_mode: BriefingMode,
    pub(crate) out_dir: PathBuf,
    pub(crate) use_color: bool,
}

/// Current UTC time of day, truncated to the minute
pub(crate) fn now_time_of_day() -> NaiveTime {
    let now = Utc::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

/// Build the prompt, call the model, and record the exchange in the session
pub(crate) fn run_briefing(
    request: &BriefingRequest,
    ctx: &CommandContext<'_>,
    session: &mut Session,
) -> BriefingResult {
    let prompt = build_prompt(request);
    tracing::debug!(airport = %request.departure, chars = prompt.len(), "built prompt");

    let outcome = ctx.client.complete(&prompt);
    let result = BriefingResult {
        airport: request.departure.clone(),
        prompt,
        outcome,
    };
    session.record(result.clone(), Utc::now(), ctx.timezone);
    result
}

/// Export text and write it to `out_dir`, returning the written path
pub(crate) fn export_to_dir(
    content: &str,
    format: &ExportFormat,
    base_name: &str,
    out_dir: &Path,
) -> Result<PathBuf, AppError> {
    let artifact = export(content, format, base_name)?;
    Ok(deliver(&artifact, out_dir)?)
}

fn handle_prompt(form: &FormArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let request = form
        .to_form(ctx.default_mode)?
        .into_request(now_time_of_day())?;
    print!("{}", build_prompt(&request));
    Ok(())
}

fn handle_query(
    args: &QueryArgs,
    ctx: &CommandContext<'_>,
    session: &mut Session,
) -> Result<(), AppError> {
    let request = args
        .form
        .to_form(ctx.default_mode)?
        .into_request(now_time_of_day())?;
    let result = run_briefing(&request, ctx, session);
    tracing::debug!("prompt sent:\n{}", result.prompt);
    print!("{}", render_result(&result, request.mode));

    if let Some(format) = &args.export {
        let base_name = args
            .name
            .clone()
            .unwrap_or_else(|| default_base_name(&result.airport, Utc::now(), ctx.timezone));
        let out_dir = args.out_dir.as_deref().unwrap_or(&ctx.out_dir);
        let path = export_to_dir(
            &result.response_text(),
            &ExportFormat::from(format.as_str()),
            &base_name,
            out_dir,
        )?;
        eprintln!("Exported to {}", path.display());
    }
    Ok(())
}

fn handle_export(args: &ExportArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let content = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let base_name = args
        .name
        .clone()
        .unwrap_or_else(|| default_base_name("export", Utc::now(), ctx.timezone));
    let out_dir = args.out_dir.as_deref().unwrap_or(&ctx.out_dir);
    let path = export_to_dir(
        &content,
        &ExportFormat::from(args.format.as_str()),
        &base_name,
        out_dir,
    )?;
    eprintln!("Exported to {}", path.display());
    Ok(())
}

/// Handle one top-level command for an admitted session
pub(crate) fn handle_command(
    command: &Commands,
    ctx: &CommandContext<'_>,
    session: &mut Session,
) -> Result<(), AppError> {
    match command {
        Commands::Prompt(form) => handle_prompt(form, ctx),
        Commands::Query(args) => handle_query(args, ctx, session),
        Commands::Export(args) => handle_export(args, ctx),
        Commands::Shell => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_shell(stdin.lock(), &mut stdout, ctx, session)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
