use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Machine-readable reason a candidate topic was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationErrorKind {
    MissingField,
    EmptyField,
    RowLengthMismatch,
    InvalidUrl,
    /// Only raised under `UnknownFieldPolicy::Reject`; otherwise a warning.
    UnknownField,
    InvalidType,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingField => "MissingField",
            ValidationErrorKind::EmptyField => "EmptyField",
            ValidationErrorKind::RowLengthMismatch => "RowLengthMismatch",
            ValidationErrorKind::InvalidUrl => "InvalidUrl",
            ValidationErrorKind::UnknownField => "UnknownField",
            ValidationErrorKind::InvalidType => "InvalidType",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated rule, located by a dotted path such as `comparisonTable.rows[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{path}: {kind}: {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn missing(path: &str) -> Self {
        Self::new(ValidationErrorKind::MissingField, path, "required field is missing")
    }

    pub(crate) fn empty(path: &str) -> Self {
        Self::new(ValidationErrorKind::EmptyField, path, "must not be empty after trimming")
    }

    pub(crate) fn invalid_type(path: &str, expected: &str, actual: &str) -> Self {
        Self::new(
            ValidationErrorKind::InvalidType,
            path,
            format!("expected {expected}, got {actual}"),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarningKind {
    /// Field outside the schema; dropped from the stored document.
    UnknownField,
    /// Id differs from an already registered id only by letter case.
    ConfusableId,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnknownField => f.write_str("UnknownField"),
            WarningKind::ConfusableId => f.write_str("ConfusableId"),
        }
    }
}

/// Non-fatal finding attached to an accepted topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub kind: WarningKind,
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path, self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_leads_with_path_and_kind() {
        let err = ValidationError::empty("concepts[1].name");
        assert_eq!(
            err.to_string(),
            "concepts[1].name: EmptyField: must not be empty after trimming"
        );
    }

    #[test]
    fn warning_display_leads_with_path_and_kind() {
        let warning = ValidationWarning {
            kind: WarningKind::UnknownField,
            path: "approaches[0].notes".into(),
            message: "not part of the topic schema; dropped".into(),
        };
        assert_eq!(
            warning.to_string(),
            "approaches[0].notes: UnknownField: not part of the topic schema; dropped"
        );
    }

    #[test]
    fn kind_serializes_as_variant_name() {
        let json = serde_json::to_string(&ValidationErrorKind::RowLengthMismatch).unwrap();
        assert_eq!(json, "\"RowLengthMismatch\"");
    }
}
