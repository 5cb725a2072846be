//! Engine diagnostics with colored terminal output.
//!
//! Every computation owns one [`Diagnostics`] sink. Degenerate input never
//! fails a computation; it is reported here instead and handed back to the
//! caller alongside the result. Deduplication avoids reporting the same
//! problem once per element.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

use owo_colors::OwoColorize;
use serde::Serialize;
use strum_macros::Display;

/// What kind of problem a [`Diagnostic`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum DiagnosticKind {
    /// A length carried a unit suffix the resolver does not understand.
    #[strum(serialize = "unsupported unit")]
    UnsupportedUnit,
    /// A length's numeric portion could not be parsed.
    #[strum(serialize = "not numeric")]
    NotNumeric,
    /// A selector compound the label matcher cannot express.
    #[strum(serialize = "unsupported selector")]
    UnsupportedSelector,
    /// A configured color could not be parsed.
    #[strum(serialize = "invalid color")]
    InvalidColor,
    /// A feature was requested that the engine deliberately leaves unimplemented.
    #[strum(serialize = "unimplemented")]
    Unimplemented,
}

/// A single warning raised during a computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The engine component that raised it (e.g. `"Length"`).
    pub component: String,
    /// Problem category.
    pub kind: DiagnosticKind,
    /// Human-readable detail.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.component, self.kind, self.message)
    }
}

/// Per-computation diagnostic sink.
///
/// Uses interior mutability so resolvers holding `&self` can report
/// problems. Not shared between computations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    echo: bool,
    seen: RefCell<HashSet<String>>,
    entries: RefCell<Vec<Diagnostic>>,
}

impl Diagnostics {
    /// Create a silent sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that also prints each new warning to stderr.
    #[must_use]
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Record a warning (once per unique message).
    ///
    /// # Example
    /// ```
    /// use isle_common::{DiagnosticKind, Diagnostics};
    ///
    /// let diagnostics = Diagnostics::new();
    /// diagnostics.warn("Length", DiagnosticKind::UnsupportedUnit, "unsupported unit 'vmin'");
    /// diagnostics.warn("Length", DiagnosticKind::UnsupportedUnit, "unsupported unit 'vmin'");
    /// assert_eq!(diagnostics.len(), 1);
    /// ```
    pub fn warn(&self, component: &str, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            component: component.to_string(),
            kind,
            message: message.into(),
        };

        if !self.seen.borrow_mut().insert(diagnostic.to_string()) {
            return;
        }

        if self.echo {
            let line = format!("[Isle {component}] ⚠ {}", diagnostic.message);
            eprintln!("{}", line.yellow());
        }

        self.entries.borrow_mut().push(diagnostic);
    }

    /// Number of distinct warnings recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Whether any recorded warning has the given kind.
    #[must_use]
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.borrow().iter().any(|d| d.kind == kind)
    }

    /// Consume the sink, returning its warnings in the order they were raised.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries.into_inner()
    }
}
