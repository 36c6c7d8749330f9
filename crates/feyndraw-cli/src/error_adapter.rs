//! Error adapter for converting CliError to miette diagnostics.
//!
//! Script errors carry their source text and the byte range at fault, and
//! are rendered with a labeled snippet. Every other error is rendered as a
//! plain diagnostic with an error code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use feyndraw::EditError;

use crate::error::CliError;

/// Adapter for a script error with source location.
pub struct ScriptAdapter<'a> {
    message: &'a str,
    src: &'a str,
    span: Option<SourceSpan>,
}

impl<'a> ScriptAdapter<'a> {
    pub fn new(message: &'a str, src: &'a str, span: Option<SourceSpan>) -> Self {
        Self { message, src, span }
    }
}

impl fmt::Debug for ScriptAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for ScriptAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid script: {}", self.message)
    }
}

impl std::error::Error for ScriptAdapter<'_> {}

impl MietteDiagnostic for ScriptAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("feyndraw::script"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for [`CliError`] variants without source location.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

fn edit_help(err: &EditError) -> &'static str {
    match err {
        EditError::NotFound { .. } => "check the element ids used by the script events",
        EditError::Exhausted(_) => "the numeric id space is used up; rename some elements",
        EditError::InvariantViolation(_) => {
            "every propagator must join two distinct, existing anchors"
        }
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "feyndraw::io",
            CliError::Config(_) => "feyndraw::config",
            CliError::Script { .. } => "feyndraw::script",
            CliError::Edit(_) => "feyndraw::diagram",
            CliError::Event { .. } => "feyndraw::event",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CliError::Edit(err) | CliError::Event { source: err, .. } => {
                Some(Box::new(edit_help(err)))
            }
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A script error with source location information.
    Script(ScriptAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Script(s) => fmt::Display::fmt(s, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Script(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Script(s) => s.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Script(s) => s.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Script(s) => s.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Script(s) => s.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into something miette can render.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Script { message, src, span } => Reportable::Script(ScriptAdapter::new(
            message,
            src,
            span.clone().map(SourceSpan::from),
        )),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
