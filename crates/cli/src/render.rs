//! Diagnostic rendering for the `hl7` binary.
//!
//! Pretty output goes through ariadne with the offending segment underlined.
//! JSON output is left to each command, which embeds the diagnostics in its
//! own result object.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use hl7_toolchain_diagnostics::{Diagnostic, LineIndex, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or pretty for a terminal and JSON for a pipe.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ if io::stdout().is_terminal() => Format::Pretty,
            _ => Format::Json,
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics with source context to stderr.
///
/// HL7 lines are CR-terminated, which most terminals treat as "return to
/// column 0", so the source is shown with line feeds instead. Byte offsets
/// are unchanged because both terminators are one byte.
pub(crate) fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let display = source.replace('\r', "\n");
    let lines = LineIndex::new(source);
    let mut cache = (filename, Source::from(display.as_str()));
    let config = Config::default().with_compact(false);

    for diag in diagnostics {
        let Some(span) = diag.span else {
            render_plain(diag);
            continue;
        };
        let start = span.start.min(display.len());
        let end = span.end.min(display.len()).max(start);

        // Label with the segment's line number when the context has none.
        let label = context_note(diag).unwrap_or_else(|| {
            let (line, _) = lines.line_col(start);
            format!("line {}", line + 1)
        });

        let mut report = Report::build(report_kind(&diag.severity), (filename, start..end))
            .with_config(config)
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(label)
                    .with_color(severity_color(&diag.severity)),
            );
        if let Some(help) = diag.explain() {
            report = report.with_help(help);
        }
        report.finish().eprint(&mut cache).ok();
    }
}

fn render_plain(diag: &Diagnostic) {
    eprintln!(
        "{}[{}]: {}",
        diag.severity.to_string().fg(severity_color(&diag.severity)),
        diag.id,
        diag.message
    );
    if let Some(note) = context_note(diag) {
        eprintln!("  = note: {note}");
    }
    if let Some(help) = diag.explain() {
        eprintln!("  = help: {help}");
    }
}

// ── JSON ────────────────────────────────────────────────────────────────

/// Pretty-printed JSON for a value that is always serializable.
pub(crate) fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).expect("CLI output serialization cannot fail")
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured `N errors, N warnings, N info` line to stderr.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let count = |sev: Severity| diagnostics.iter().filter(|d| d.severity == sev).count();
    let (errors, warnings, infos) = (
        count(Severity::Error),
        count(Severity::Warn),
        count(Severity::Info),
    );

    let plural = |n: usize| if n == 1 { "" } else { "s" };
    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{errors} error{}", plural(errors)).fg(Color::Red).to_string());
    }
    if warnings > 0 {
        parts.push(
            format!("{warnings} warning{}", plural(warnings))
                .fg(Color::Yellow)
                .to_string(),
        );
    }
    if infos > 0 {
        parts.push(format!("{infos} info").fg(Color::Blue).to_string());
    }
    if !parts.is_empty() {
        eprintln!("{}", parts.join(", "));
    }
}
