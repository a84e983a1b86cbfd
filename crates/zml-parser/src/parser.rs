//! Line-oriented parser for ZML documents.
//!
//! A document is a sequence of lines. The first line may be a title; every
//! other line is blank, a comment, or a relation:
//!
//! ```text
//! document      := [title-line LF] relation-line*
//! title-line    := "["? "title" "]"? space* ":" (word | space | "." | "," | "-")+
//! relation-line := comment | blank | relation
//! relation      := "["? name "]"? "-"+ ">"{0,2} "["? name "]"? [":"] label
//! comment       := "#" rest | "//" rest
//! name          := (ascii-letter | space)+
//! ```
//!
//! Lines that match none of these are skipped and reported as warnings.

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{delimited, opt, preceded},
    error::{ContextError, ErrMode},
    token::{rest, take_while},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::{Span, Spanned},
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// A single `from -> to: label` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecl {
    from: String,
    to: String,
    directional: bool,
    label: String,
}

impl RelationDecl {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        directional: bool,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            directional,
            label: label.into(),
        }
    }

    /// Source element name, trimmed.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Target element name, trimmed.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// `true` when the dash run ends in `>`.
    pub fn is_directional(&self) -> bool {
        self.directional
    }

    /// Label text after the optional colon, trimmed. Empty when absent.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The result of parsing a ZML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    title: Option<Spanned<String>>,
    declarations: Vec<Spanned<RelationDecl>>,
    warnings: Vec<Diagnostic>,
}

impl Document {
    /// The title, if line 1 declared one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(|title| title.inner().as_str())
    }

    /// The title together with the span of its line.
    pub fn spanned_title(&self) -> Option<&Spanned<String>> {
        self.title.as_ref()
    }

    /// Relations in source order.
    pub fn declarations(&self) -> &[Spanned<RelationDecl>] {
        &self.declarations
    }

    /// Diagnostics for skipped lines.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub(crate) fn into_warnings(self) -> Vec<Diagnostic> {
        self.warnings
    }
}

/// Parse a ZML document.
///
/// Parsing never fails: lines that are not understood are dropped and a
/// [`ErrorCode::W100`] warning is recorded for each of them.
pub fn parse_document(source: &str) -> Document {
    let mut document = Document::default();
    let mut lines = lines_with_spans(source).peekable();

    let title = lines
        .peek()
        .and_then(|&(first, span)| parse_title(first).map(|title| (title, span)));
    if let Some((title, span)) = title {
        debug!(title; "Found title");
        document.title = Some(Spanned::new(title.to_string(), span));
        lines.next();
    }

    for (line, span) in lines {
        if is_blank(line) || is_comment(line) {
            continue;
        }

        match parse_relation(line) {
            Some(decl) => {
                trace!(
                    from = decl.from(),
                    to = decl.to(),
                    directional = decl.is_directional(),
                    label = decl.label();
                    "Parsed relation"
                );
                document.declarations.push(Spanned::new(decl, span));
            }
            None => {
                debug!(line; "Skipping unrecognized line");
                document.warnings.push(unrecognized_line(span));
            }
        }
    }

    document
}

/// Splits on `\n`, pairing each line with its byte span.
fn lines_with_spans(source: &str) -> impl Iterator<Item = (&str, Span)> {
    let mut offset = 0;
    source.split('\n').map(move |line| {
        let span = Span::new(offset..offset + line.len());
        offset += line.len() + 1;
        (line, span)
    })
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//")
}

fn unrecognized_line(span: Span) -> Diagnostic {
    Diagnostic::warning("line does not describe a relation")
        .with_code(ErrorCode::W100)
        .with_label(span, "ignored")
        .with_help("relations look like `Alice->Bob: hello`; comments start with `#` or `//`")
}

/// Whitespace as understood by the grammar: space, tab, CR, LF and form feed.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || is_space(c)
}

fn is_title_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || matches!(c, '.' | ',' | '-') || is_space(c)
}

/// Matches a title line prefix and returns the trimmed title.
///
/// Anything after the first character outside the title alphabet is
/// ignored, so `title: Hello!` yields `Hello`.
pub(crate) fn parse_title(line: &str) -> Option<&str> {
    let mut input = line;
    title.parse_next(&mut input).ok().map(str::trim)
}

fn title<'s>(input: &mut &'s str) -> IResult<&'s str> {
    preceded(
        (opt('['), "title", opt(']'), take_while(0.., is_space), ':'),
        take_while(1.., is_title_char),
    )
    .parse_next(input)
}

/// Matches a relation line.
pub(crate) fn parse_relation(line: &str) -> Option<RelationDecl> {
    let mut input = line;
    let (from, arrow, to, label) = relation.parse_next(&mut input).ok()?;

    Some(RelationDecl::new(
        from.trim(),
        to.trim(),
        arrow.ends_with('>'),
        label.trim(),
    ))
}

fn relation<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str, &'s str, &'s str)> {
    (
        delimited(opt('['), element_name, opt(']')),
        arrow,
        delimited(opt('['), element_name, opt(']')),
        preceded(opt(':'), rest),
    )
        .parse_next(input)
}

fn element_name<'s>(input: &mut &'s str) -> IResult<&'s str> {
    take_while(1.., is_name_char).parse_next(input)
}

/// One or more dashes followed by at most two `>`.
fn arrow<'s>(input: &mut &'s str) -> IResult<&'s str> {
    (take_while(1.., '-'), take_while(0..=2, '>'))
        .take()
        .parse_next(input)
}
