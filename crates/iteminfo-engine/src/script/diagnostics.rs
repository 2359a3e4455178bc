use std::fmt;

/// Why a line was flagged during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A body line that matches no known shape.
    MalformedLine,
    /// A list element with no open list to attach to.
    OrphanEmbedValue,
    /// A field line seen before any item header.
    OrphanField,
    /// The input ended without an end-of-data marker.
    MissingEndMarker,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedLine => "unrecognized line",
            Self::OrphanEmbedValue => "list value outside a list",
            Self::OrphanField => "field outside an item",
            Self::MissingEndMarker => "missing end-of-data marker",
        }
    }
}

/// A non-fatal finding attached to a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
    /// The offending line without its line ending. Empty for end-of-input findings.
    pub text: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "line {}: {}", self.line, self.kind.as_str())
        } else {
            write!(f, "line {}: {}: {}", self.line, self.kind.as_str(), self.text)
        }
    }
}
