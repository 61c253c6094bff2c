//! The diagnostic manager: the one piece of long-lived shared mutable state
//! that crosses pipeline stages (spec §5, §7).
//!
//! Lexer, parser, and emitter all accumulate [`Diagnostic`] values here
//! instead of aborting outright; the driver prints everything at the end,
//! with ANSI color via `ariadne` when stderr is a terminal, followed by a
//! total count, and exits non-zero if any error was reported. Grounded in
//! the teacher's `diagnostics::report_error` (same `ariadne::Report`
//! construction), generalized from one-error-at-a-time reporting of a
//! single `CompileError` to an accumulating multi-diagnostic manager, since
//! this language's parser recovers from a missing semicolon and keeps
//! going (spec §4.2, §7).

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::token::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: String, span: Option<Span>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message,
            span,
            help: None,
        }
    }

    pub fn warning(message: String, span: Option<Span>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message,
            span,
            help: None,
        }
    }

    pub fn note(message: String, span: Option<Span>) -> Self {
        Diagnostic {
            severity: Severity::Note,
            message,
            span,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Collects diagnostics across the whole pipeline run and prints them once,
/// at the end, against the original source text.
pub struct DiagnosticManager {
    filename: String,
    source: String,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticManager {
    pub fn new(filename: impl Into<String>, source: impl Into<String>) -> Self {
        DiagnosticManager {
            filename: filename.into(),
            source: source.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    /// Every diagnostic accumulated so far, in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Prints every accumulated diagnostic, then a summary line. Returns the
    /// number of errors reported, which the caller uses as the process exit
    /// signal (non-zero if any error occurred — spec §6, §7).
    pub fn report_all(&self) -> usize {
        for diagnostic in &self.diagnostics {
            print_diagnostic(&self.filename, &self.source, diagnostic);
        }
        let errors = self.error_count();
        let warnings = self.diagnostics.len() - errors;
        eprintln!("{errors} error(s), {warnings} warning(s) generated.");
        errors
    }
}

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Note => ReportKind::Advice,
    }
}

fn color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Note => Color::Blue,
    }
}

fn span_range(span: Span, source_len: usize) -> Range<usize> {
    if source_len == 0 {
        0..0
    } else {
        span.start.min(source_len - 1)..span.end.max(span.start + 1).min(source_len)
    }
}

fn print_diagnostic(filename: &str, source: &str, diagnostic: &Diagnostic) {
    let range = match diagnostic.span {
        Some(span) => span_range(span, source.len()),
        None => 0..source.len().min(1),
    };

    let mut report = Report::build(report_kind(diagnostic.severity), (filename, range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((filename, range))
                .with_message(&diagnostic.message)
                .with_color(color(diagnostic.severity)),
        );

    if let Some(help) = &diagnostic.help {
        report = report.with_help(help);
    }

    if let Err(err) = report.finish().eprint((filename, Source::from(source))) {
        eprintln!("{filename}: {}", diagnostic.message);
        eprintln!("(failed to render diagnostic: {err})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_errors_only_true_with_error_severity() {
        let mut manager = DiagnosticManager::new("t.c", "int main(){}");
        manager.push(Diagnostic::warning("unused variable".to_string(), None));
        assert!(!manager.has_errors());
        manager.push(Diagnostic::error("undefined symbol".to_string(), None));
        assert!(manager.has_errors());
        assert_eq!(manager.error_count(), 1);
    }

    #[test]
    fn test_span_range_clamped_to_source_length() {
        let span = Span::new(100, 200, 1, 1);
        assert_eq!(span_range(span, 10), 9..10);
    }

    #[test]
    fn test_empty_source_span_range() {
        let span = Span::new(0, 0, 1, 1);
        assert_eq!(span_range(span, 0), 0..0);
    }
}
