//! Compiler problems reported by the style subsystem.
//!
//! Construction and resolution never abort on user-data-shaped input; they
//! accumulate problems into a caller-supplied collection and keep going.

use crate::location::SourceSpan;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The kinds of problems the style models and resolver can report.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProblemKind {
    #[error("unable to resolve class reference '{qname}'")]
    UnresolvedClassReference { qname: String },

    #[error("unable to transcode asset 'Embed({arguments})'")]
    EmbedAsset { arguments: String },

    #[error("@font-face is missing the required '{property}' property")]
    FontFaceMissingProperty { property: String },

    #[error("duplicate @namespace prefix '{prefix}'")]
    DuplicateNamespacePrefix { prefix: String },

    #[error("problem building style document: {message}")]
    ParseProblem { message: String },
}

impl ProblemKind {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            ProblemKind::DuplicateNamespacePrefix { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A single reported problem: what went wrong and where.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub kind: ProblemKind,
    pub severity: Severity,
    /// Path of the source file the problem was found in
    pub path: String,
    /// Line number, starting with 1
    pub line: usize,
}

impl Problem {
    #[must_use]
    pub fn new(kind: ProblemKind, span: &SourceSpan) -> Self {
        let severity = kind.severity();
        Self {
            kind,
            severity,
            path: span.path().to_string(),
            line: span.line(),
        }
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}: {}", self.path, self.line, self.severity, self.kind)
    }
}

pub type Problems = Vec<Problem>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Location, SourceSpan};

    #[test]
    fn problem_takes_path_and_line_from_span() {
        let span = SourceSpan::new("themes/spark.css", Location::new(12, 5, 301), Location::new(12, 40, 336));
        let problem = Problem::new(
            ProblemKind::UnresolvedClassReference {
                qname: "spark.skins.ButtonSkin".to_string(),
            },
            &span,
        );

        assert_eq!(problem.path, "themes/spark.css");
        assert_eq!(problem.line, 12);
        assert_eq!(problem.severity, Severity::Error);
        assert_eq!(
            problem.to_string(),
            "themes/spark.css:12: error: unable to resolve class reference 'spark.skins.ButtonSkin'"
        );
    }

    #[test]
    fn duplicate_namespace_is_a_warning() {
        let kind = ProblemKind::DuplicateNamespacePrefix { prefix: "s".to_string() };
        assert_eq!(kind.severity(), Severity::Warning);
    }
}
