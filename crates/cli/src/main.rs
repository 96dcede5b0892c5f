mod render;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hl7_toolchain_core::{
    EmitConfig, ParseOptions, ParsedMessage, SchemaSet, SegmentTerminator, check_message,
    emit_hl7, get_all_segments_of_type, get_segment_of_type, has_segment, parse_with_options,
    split_data_field_with, to_pretty_json,
};
use hl7_toolchain_diagnostics::{self as diag, Diagnostic, Severity};

use crate::render::{Format, print_summary, render_diagnostics, to_json};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "hl7",
    version,
    about = "HL7 toolchain: parse, check, query, and format HL7 v2 messages"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Extra segment schemas (JSON file). May be repeated; later files
    /// replace schemas registered by earlier ones.
    #[arg(long = "schemas", global = true, value_name = "PATH")]
    schemas: Vec<String>,

    /// Segment separator of the input. "auto" picks CR when the input
    /// contains one and LF otherwise.
    #[arg(long, global = true, value_enum, default_value_t = SeparatorArg::Auto)]
    segment_separator: SeparatorArg,

    /// Verbosity level (-v for info, -vv for debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Message commands (`-` reads stdin) ──────────────────────────
    /// Parse a message and print it as JSON.
    Parse { file: String },

    /// Parse a message and report non-fatal issues.
    #[command(alias = "validate")]
    Check { file: String },

    /// Look up segments by type code.
    ///
    /// Prints the first matching segment by default. Exits 1 when nothing
    /// matches.
    Query {
        file: String,
        /// Segment type code, e.g. PID.
        code: String,
        /// Print every matching segment, in source order.
        #[arg(long, conflicts_with_all = ["exists", "once"])]
        all: bool,
        /// Only report whether the segment type is present.
        #[arg(long, conflicts_with = "once")]
        exists: bool,
        /// Only report whether the segment type is present exactly once.
        #[arg(long)]
        once: bool,
    },

    /// Re-emit a message with normalized segment terminators.
    Format {
        file: String,
        /// Terminator written after each segment.
        #[arg(long, value_enum, default_value_t = TerminatorArg::Cr)]
        terminator: TerminatorArg,
        /// Write formatted output back to the file (in-place).
        #[arg(long, short, conflicts_with = "check")]
        write: bool,
        /// Check if the file is already formatted (exit 1 if not). For CI.
        #[arg(long, conflicts_with = "write")]
        check: bool,
    },

    // ── Values and reference ────────────────────────────────────────
    /// Split a field value into repetitions and components.
    Split {
        value: String,
        /// Component separator.
        #[arg(long, default_value_t = '^')]
        component: char,
        /// Repetition separator.
        #[arg(long, default_value_t = '~')]
        repetition: char,
    },

    /// List the active segment schemas.
    Schemas,

    /// Explain a diagnostic ID (e.g. HL71002).
    Explain { id: String },
}

/// Input segment separator.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeparatorArg {
    /// Detect from the input.
    Auto,
    /// Carriage return.
    Cr,
    /// Line feed.
    Lf,
    /// Carriage return + line feed.
    Crlf,
}

impl SeparatorArg {
    fn resolve(self, input: &str) -> SegmentTerminator {
        match self {
            SeparatorArg::Auto => SegmentTerminator::detect(input),
            SeparatorArg::Cr => SegmentTerminator::Cr,
            SeparatorArg::Lf => SegmentTerminator::Lf,
            SeparatorArg::Crlf => SegmentTerminator::CrLf,
        }
    }
}

/// Output segment terminator for `format`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TerminatorArg {
    /// Carriage return (HL7 standard).
    Cr,
    /// Line feed.
    Lf,
    /// Carriage return + line feed.
    Crlf,
}

impl From<TerminatorArg> for SegmentTerminator {
    fn from(t: TerminatorArg) -> Self {
        match t {
            TerminatorArg::Cr => SegmentTerminator::Cr,
            TerminatorArg::Lf => SegmentTerminator::Lf,
            TerminatorArg::Crlf => SegmentTerminator::CrLf,
        }
    }
}

/// Settings shared by every message command.
struct Session {
    schemas: SchemaSet,
    separator: SeparatorArg,
    format: Format,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli, format) {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "success": false,
                    "error": "command_failed",
                    "message": format!("{err:#}"),
                });
                println!("{}", to_json(&out));
            }
            Format::Pretty => eprintln!("error: {err:#}"),
        }
        process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let session = || -> Result<Session> {
        Ok(Session {
            schemas: load_schemas(&cli.schemas)?,
            separator: cli.segment_separator,
            format,
        })
    };

    match &cli.cmd {
        Cmd::Parse { file } => cmd_parse(file, &session()?),
        Cmd::Check { file } => cmd_check(file, &session()?),
        Cmd::Query {
            file,
            code,
            all,
            exists,
            once,
        } => {
            let mode = if *all {
                QueryMode::All
            } else if *exists {
                QueryMode::Exists
            } else if *once {
                QueryMode::Once
            } else {
                QueryMode::First
            };
            cmd_query(file, code, mode, &session()?)
        }
        Cmd::Format {
            file,
            terminator,
            write,
            check,
        } => cmd_format(file, *terminator, *write, *check, &session()?),
        Cmd::Split {
            value,
            component,
            repetition,
        } => cmd_split(value, *component, *repetition, format),
        Cmd::Schemas => cmd_schemas(&session()?.schemas, format),
        Cmd::Explain { id } => cmd_explain(id, format),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(file: &str, session: &Session) -> Result<()> {
    let input = read_input(file)?;
    let Some(message) = parse_or_report(&input, file, session) else {
        process::exit(1);
    };

    match session.format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": true,
                "message": message,
            });
            println!("{}", to_json(&out));
        }
        Format::Pretty => println!("{}", to_pretty_json(&message)),
    }
    Ok(())
}

fn cmd_check(file: &str, session: &Session) -> Result<()> {
    let input = read_input(file)?;
    let Some(message) = parse_or_report(&input, file, session) else {
        process::exit(1);
    };
    let issues = check_message(&message, &session.schemas);
    let ok = !issues.iter().any(Diagnostic::is_error);

    match session.format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "diagnostics": issues,
            });
            println!("{}", to_json(&out));
        }
        Format::Pretty => {
            render_diagnostics(&input, display_name(file), &issues);
            print_summary(&issues);
            if ok {
                eprintln!("check ok");
            }
        }
    }

    exit_on_errors(&issues);
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum QueryMode {
    First,
    All,
    Exists,
    Once,
}

fn cmd_query(file: &str, code: &str, mode: QueryMode, session: &Session) -> Result<()> {
    let input = read_input(file)?;
    let Some(message) = parse_or_report(&input, file, session) else {
        process::exit(1);
    };

    let (found, out) = match mode {
        QueryMode::First => {
            let segment = get_segment_of_type(code, &message);
            (
                segment.is_some(),
                serde_json::json!({ "code": code, "segment": segment }),
            )
        }
        QueryMode::All => {
            let segments = get_all_segments_of_type(code, &message);
            (
                !segments.is_empty(),
                serde_json::json!({
                    "code": code,
                    "count": segments.len(),
                    "segments": segments,
                }),
            )
        }
        QueryMode::Exists | QueryMode::Once => {
            let only_once = matches!(mode, QueryMode::Once);
            let present = has_segment(code, &message, only_once);
            (
                present,
                serde_json::json!({
                    "code": code,
                    "onlyOnce": only_once,
                    "present": present,
                }),
            )
        }
    };

    match session.format {
        Format::Json => println!("{}", to_json(&out)),
        Format::Pretty => match mode {
            QueryMode::First => println!("{}", to_json(&out["segment"])),
            QueryMode::All => println!("{}", to_json(&out["segments"])),
            QueryMode::Exists | QueryMode::Once => println!("{found}"),
        },
    }

    if !found {
        log::info!("no match for {code}");
        process::exit(1);
    }
    Ok(())
}

fn cmd_format(
    file: &str,
    terminator: TerminatorArg,
    write: bool,
    check: bool,
    session: &Session,
) -> Result<()> {
    let input = read_input(file)?;
    let Some(message) = parse_or_report(&input, file, session) else {
        process::exit(1);
    };

    let config = EmitConfig {
        terminator: terminator.into(),
        trailing_terminator: true,
    };
    let formatted = emit_hl7(&message, &config);
    let already_formatted = formatted == input;

    if check {
        status_message(
            session.format,
            already_formatted,
            "already formatted",
            "not formatted",
            file,
        );
        if !already_formatted {
            process::exit(1);
        }
    } else if write {
        anyhow::ensure!(file != "-", "--write needs a file path, not stdin");
        if !already_formatted {
            fs::write(file, &formatted).with_context(|| format!("failed to write {file}"))?;
        }
        status_message(
            session.format,
            !already_formatted,
            "formatted",
            "already formatted",
            file,
        );
    } else {
        print!("{formatted}");
    }

    Ok(())
}

/// Emit a status message for --check / --write in the appropriate format.
fn status_message(format: Format, condition: bool, if_true: &str, if_false: &str, file: &str) {
    let msg = if condition { if_true } else { if_false };
    match format {
        Format::Json => {
            let out = serde_json::json!({ "status": msg, "file": file });
            println!("{}", to_json(&out));
        }
        Format::Pretty => eprintln!("{msg}: {file}"),
    }
}

fn cmd_split(value: &str, component: char, repetition: char, format: Format) -> Result<()> {
    anyhow::ensure!(
        component != repetition,
        "component and repetition separators must differ"
    );
    let field = split_data_field_with(value, component, repetition);
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "value": value,
                "parts": field.len(),
                "split": field,
            });
            println!("{}", to_json(&out));
        }
        Format::Pretty => println!("{}", to_json(&field)),
    }
    Ok(())
}

fn cmd_schemas(schemas: &SchemaSet, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", to_json(schemas)),
        Format::Pretty => {
            use ariadne::Fmt;
            for schema in schemas.iter() {
                println!(
                    "{}  {} ({} fields)",
                    schema.code.as_str().fg(ariadne::Color::Cyan),
                    schema.description.as_deref().unwrap_or("-"),
                    schema.fields.len()
                );
            }
        }
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", to_json(&out));
        }
        Format::Pretty => {
            // Explanation is the expected output, so stdout rather than stderr.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read a message from a file, or from stdin when the path is `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

fn display_name(file: &str) -> &str {
    if file == "-" { "<stdin>" } else { file }
}

/// Built-in schemas extended by each `--schemas` file, in order.
fn load_schemas(paths: &[String]) -> Result<SchemaSet> {
    let mut schemas = SchemaSet::default();
    for path in paths {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read schemas file {path}"))?;
        let n = schemas
            .extend_from_json_str(&json)
            .with_context(|| format!("invalid schemas file {path}"))?;
        log::info!("loaded {n} schemas from {path}");
    }
    Ok(schemas)
}

/// Parse the input, or render the fatal error and return `None`.
fn parse_or_report(input: &str, file: &str, session: &Session) -> Option<ParsedMessage> {
    let options = ParseOptions {
        segment_separator: session.separator.resolve(input),
    };
    log::debug!(
        "parsing {} with {:?} separator",
        display_name(file),
        options.segment_separator
    );

    match parse_with_options(input, &session.schemas, &options) {
        Ok(message) => Some(message),
        Err(err) => {
            let diagnostics = [err.to_diagnostic()];
            match session.format {
                Format::Json => {
                    let out = serde_json::json!({
                        "ok": false,
                        "diagnostics": diagnostics,
                    });
                    println!("{}", to_json(&out));
                }
                Format::Pretty => {
                    render_diagnostics(input, display_name(file), &diagnostics);
                    print_summary(&diagnostics);
                }
            }
            None
        }
    }
}

/// Exit with code 1 if any diagnostic is an error.
/// Warnings and info do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics
        .iter()
        .any(|d| matches!(d.severity, Severity::Error))
    {
        process::exit(1);
    }
}
