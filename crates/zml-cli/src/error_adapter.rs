//! Miette reports for ZML errors and parser warnings.
//!
//! Parse errors and warnings carry spans into the document and are rendered
//! with source snippets. Everything else is a one-line report with a code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceCode, SourceSpan};

use zml::ZmlError;
use zml_parser::{Span, error::Diagnostic};

/// One report for miette's graphical handler.
#[derive(Debug)]
pub enum Report<'a> {
    /// A parser diagnostic rendered against the document.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// An error with no source location.
    Error(&'a ZmlError),
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Diagnostic { diag, .. } => f.write_str(diag.message()),
            Report::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Report::Diagnostic { .. } => None,
            Report::Error(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Diagnostic { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Report::Error(err) => {
                error_code(err).map(|code| Box::new(code) as Box<dyn fmt::Display>)
            }
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Report::Diagnostic { diag, .. } if diag.severity().is_warning() => {
                Some(Severity::Warning)
            }
            _ => Some(Severity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Diagnostic { diag, .. } => diag
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display>),
            Report::Error(ZmlError::Config(_)) => Some(Box::new(
                "check the configuration file and command-line options",
            )),
            Report::Error(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Report::Diagnostic { src, .. } => Some(src as &dyn SourceCode),
            Report::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Report::Diagnostic { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let span = source_span(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn error_code(err: &ZmlError) -> Option<&'static str> {
    match err {
        ZmlError::Io(_) => Some("zml::io"),
        ZmlError::Parse { .. } => None,
        ZmlError::Config(_) => Some("zml::config"),
        ZmlError::Layout(_) => Some("zml::layout"),
        ZmlError::Export(_) => Some("zml::export"),
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Reports for a failed run: one per diagnostic of a parse error, or a
/// single report for any other error.
pub fn reports(err: &ZmlError) -> Vec<Report<'_>> {
    match err {
        ZmlError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::Diagnostic { diag, src })
            .collect(),
        _ => vec![Report::Error(err)],
    }
}

/// Reports for the warnings of a successful parse.
pub fn warning_reports<'a>(warnings: &'a [Diagnostic], src: &'a str) -> Vec<Report<'a>> {
    warnings
        .iter()
        .map(|diag| Report::Diagnostic { diag, src })
        .collect()
}

#[cfg(test)]
mod tests {
    use zml_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_undefined_element_report() {
        let diag = Diagnostic::error("element `C` not found")
            .with_code(ErrorCode::E200)
            .with_label(Span::new(0..4), "referenced here")
            .with_help("declare it in a relation");
        let err = ZmlError::new_parse_error(ParseError::from(diag), "A->C");

        let reports = reports(&err);
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert!(matches!(report, Report::Diagnostic { .. }));
        assert_eq!(report.to_string(), "element `C` not found");
        assert_eq!(report.code().unwrap().to_string(), "E200");
        assert_eq!(report.severity(), Some(Severity::Error));
        assert!(report.source_code().is_some());
    }

    #[test]
    fn test_one_report_per_diagnostic() {
        let diags = vec![
            Diagnostic::error("first error").with_label(Span::new(0..5), "first"),
            Diagnostic::error("second error").with_label(Span::new(10..15), "second"),
        ];
        let err = ZmlError::new_parse_error(ParseError::from(diags), "source code here...");

        let messages: Vec<_> = reports(&err).iter().map(|r| r.to_string()).collect();
        assert_eq!(messages, ["first error", "second error"]);
    }

    #[test]
    fn test_config_error_has_code_and_help() {
        let err = ZmlError::Config("bad canvas".to_string());

        let reports = reports(&err);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), "Config error: bad canvas");
        assert_eq!(reports[0].code().unwrap().to_string(), "zml::config");
        assert!(reports[0].help().is_some());
        assert!(reports[0].labels().is_none());
    }

    #[test]
    fn test_io_error_code() {
        let err = ZmlError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let reports = reports(&err);
        assert_eq!(reports[0].code().unwrap().to_string(), "zml::io");
        assert!(reports[0].help().is_none());
    }

    #[test]
    fn test_unrecognized_line_warning() {
        let source = "A->B\n???";
        let document = zml_parser::parse(source);
        let reports = warning_reports(document.warnings(), source);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity(), Some(Severity::Warning));
        assert_eq!(reports[0].code().unwrap().to_string(), "W100");

        let labels: Vec<_> = reports[0].labels().unwrap().collect();
        assert_eq!(labels[0].offset(), 5);
        assert_eq!(labels[0].len(), 3);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_secondary_labels_keep_flag() {
        let diag = Diagnostic::error("error with labels")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(10..15), "secondary");
        let report = Report::Diagnostic {
            diag: &diag,
            src: "some source code",
        };

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }
}
