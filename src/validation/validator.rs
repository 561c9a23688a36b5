//! Structural validation of authored topics.
//!
//! The validator walks a candidate JSON value field by field and collects
//! every violation it finds instead of stopping at the first one. Deeper
//! checks are skipped only where the parent is absent or of the wrong type.
//! Accepted topics come back normalized: strings trimmed (diagram excepted),
//! `null` and empty optional lists folded to `None`, unknown fields dropped.
//!
//! Validation performs no I/O and never panics, so it is safe to re-run on
//! untrusted or previously persisted data.

use serde_json::{Map, Value};
use url::Url;

use super::config::{UnknownFieldPolicy, ValidationConfig};
use super::errors::{ValidationError, ValidationErrorKind, ValidationWarning, WarningKind};
use crate::topic::{
    Approach, ComparisonTable, Complexity, Concept, Diagram, KeyPoint, TopicDocument, TutorialStep,
};
use crate::types::identifiers::TopicId;

const TOPIC_FIELDS: &[&str] = &[
    "title",
    "description",
    "complexity",
    "example",
    "diagram",
    "concepts",
    "approaches",
    "tutorialSteps",
    "keyPoints",
    "comparisonTable",
    "pitfalls",
    "videoUrl",
];

/// An accepted topic plus the non-fatal findings raised while accepting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub document: TopicDocument,
    pub warnings: Vec<ValidationWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check `candidate` against the topic schema and normalize it.
    ///
    /// Returns every violation found; the error list is never empty on `Err`.
    pub fn validate(&self, id: &str, candidate: &Value) -> Result<Validated, Vec<ValidationError>> {
        let mut walk = Walk::new(&self.config);

        let id = match TopicId::new(id) {
            Ok(id) => Some(id),
            Err(_) => {
                walk.errors.push(ValidationError::empty("id"));
                None
            }
        };

        let draft = walk.topic(candidate);

        match (id, draft) {
            (Some(id), Some(draft)) if walk.errors.is_empty() => Ok(Validated {
                document: draft.finish(id),
                warnings: walk.warnings,
            }),
            _ => {
                debug_assert!(!walk.errors.is_empty(), "rejected topic without errors");
                Err(walk.errors)
            }
        }
    }
}

/// Validate with the default configuration, discarding warnings.
pub fn validate(id: &str, candidate: &Value) -> Result<TopicDocument, Vec<ValidationError>> {
    Validator::default()
        .validate(id, candidate)
        .map(|validated| validated.document)
}

// Everything but the id, which is checked separately.
struct Draft {
    title: String,
    description: String,
    complexity: Option<Complexity>,
    example: Option<String>,
    diagram: Option<Diagram>,
    concepts: Option<Vec<Concept>>,
    approaches: Option<Vec<Approach>>,
    tutorial_steps: Option<Vec<TutorialStep>>,
    key_points: Option<Vec<KeyPoint>>,
    comparison_table: Option<ComparisonTable>,
    pitfalls: Option<Vec<String>>,
    video_url: Option<String>,
}

impl Draft {
    fn finish(self, id: TopicId) -> TopicDocument {
        TopicDocument {
            id,
            title: self.title,
            description: self.description,
            complexity: self.complexity,
            example: self.example,
            diagram: self.diagram,
            concepts: self.concepts,
            approaches: self.approaches,
            tutorial_steps: self.tutorial_steps,
            key_points: self.key_points,
            comparison_table: self.comparison_table,
            pitfalls: self.pitfalls,
            video_url: self.video_url,
        }
    }
}

struct Walk<'c> {
    config: &'c ValidationConfig,
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl<'c> Walk<'c> {
    fn new(config: &'c ValidationConfig) -> Self {
        Self {
            config,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn topic(&mut self, candidate: &Value) -> Option<Draft> {
        let obj = self.object(candidate, "$")?;
        self.unknown_keys(obj, TOPIC_FIELDS, "");

        let title = self.required_text(obj, "title", "");
        let description = self.required_text(obj, "description", "");
        let complexity = self.optional_section(obj, "complexity", "", Self::complexity);
        let example = self.optional_text(obj, "example", "");
        let diagram = self.diagram(obj);

        let concepts = self.optional_list(obj, "concepts", "", |w, item, path| {
            let fields = w.record(item, path, &["name", "details"])?;
            let name = w.required_text(fields, "name", path);
            let details = w.required_text(fields, "details", path);
            Some(Concept {
                name: name?,
                details: details?,
            })
        });

        let approaches = self.optional_list(obj, "approaches", "", |w, item, path| {
            let fields = w.record(item, path, &["title", "content", "complexity"])?;
            let title = w.required_text(fields, "title", path);
            let content = w.required_text(fields, "content", path);
            let complexity = w.optional_section(fields, "complexity", path, Self::complexity);
            Some(Approach {
                title: title?,
                content: content?,
                complexity,
            })
        });

        let tutorial_steps = self.optional_list(obj, "tutorialSteps", "", |w, item, path| {
            let fields = w.record(item, path, &["title", "content"])?;
            let title = w.required_text(fields, "title", path);
            let content = w.required_text(fields, "content", path);
            Some(TutorialStep {
                title: title?,
                content: content?,
            })
        });

        let key_points = self.optional_list(obj, "keyPoints", "", |w, item, path| {
            let fields = w.record(item, path, &["title", "description"])?;
            let title = w.required_text(fields, "title", path);
            let description = w.required_text(fields, "description", path);
            Some(KeyPoint {
                title: title?,
                description: description?,
            })
        });

        let comparison_table =
            self.optional_section(obj, "comparisonTable", "", Self::comparison_table);

        let pitfalls = self.optional_list(obj, "pitfalls", "", |w, item, path| {
            w.text_value(item, path)
        });

        let video_url = self.video_url(obj);

        Some(Draft {
            title: title?,
            description: description?,
            complexity,
            example,
            diagram,
            concepts,
            approaches,
            tutorial_steps,
            key_points,
            comparison_table,
            pitfalls,
            video_url,
        })
    }

    fn complexity(&mut self, value: &Value, path: &str) -> Option<Complexity> {
        let fields = self.record(value, path, &["time", "space"])?;
        let time = self.required_text(fields, "time", path);
        let space = self.required_text(fields, "space", path);
        Some(Complexity {
            time: time?,
            space: space?,
        })
    }

    fn comparison_table(&mut self, value: &Value, path: &str) -> Option<ComparisonTable> {
        let fields = self.record(value, path, &["headers", "rows"])?;

        let headers_path = child(path, "headers");
        let (headers, width) = match present(fields, "headers") {
            None => {
                self.errors.push(ValidationError::missing(&headers_path));
                (None, None)
            }
            Some(Value::Array(items)) => {
                if items.is_empty() {
                    self.errors.push(ValidationError::empty(&headers_path));
                }
                let headers = self.collect(items, &headers_path, |w, item, path| {
                    w.text_value(item, path)
                });
                (headers, Some(items.len()))
            }
            Some(other) => {
                self.errors.push(ValidationError::invalid_type(
                    &headers_path,
                    "array",
                    type_name(other),
                ));
                (None, None)
            }
        };

        let rows_path = child(path, "rows");
        let rows = match present(fields, "rows") {
            None => {
                self.errors.push(ValidationError::missing(&rows_path));
                None
            }
            Some(Value::Array(rows)) => self.collect(rows, &rows_path, |w, row, row_path| {
                w.table_row(row, row_path, width)
            }),
            Some(other) => {
                self.errors.push(ValidationError::invalid_type(
                    &rows_path,
                    "array",
                    type_name(other),
                ));
                None
            }
        };

        Some(ComparisonTable {
            headers: headers?,
            rows: rows?,
        })
    }

    fn table_row(&mut self, row: &Value, path: &str, width: Option<usize>) -> Option<Vec<String>> {
        let Value::Array(cells) = row else {
            self.errors
                .push(ValidationError::invalid_type(path, "array", type_name(row)));
            return None;
        };

        let mut mismatched = false;
        if let Some(width) = width {
            if cells.len() != width {
                self.errors.push(ValidationError::new(
                    ValidationErrorKind::RowLengthMismatch,
                    path,
                    format!("row has {} cells, headers have {}", cells.len(), width),
                ));
                mismatched = true;
            }
        }

        // Cells may be blank; only their type is checked.
        let cells = self.collect(cells, path, |w, cell, cell_path| match cell {
            Value::String(s) => Some(s.trim().to_string()),
            other => {
                w.errors.push(ValidationError::invalid_type(
                    cell_path,
                    "string",
                    type_name(other),
                ));
                None
            }
        });

        if mismatched {
            None
        } else {
            cells
        }
    }

    fn diagram(&mut self, obj: &Map<String, Value>) -> Option<Diagram> {
        match present(obj, "diagram")? {
            Value::String(markup) if markup.trim().is_empty() => {
                self.errors.push(ValidationError::empty("diagram"));
                None
            }
            Value::String(markup) => Some(Diagram::new(markup.clone())),
            other => {
                self.errors
                    .push(ValidationError::invalid_type("diagram", "string", type_name(other)));
                None
            }
        }
    }

    fn video_url(&mut self, obj: &Map<String, Value>) -> Option<String> {
        let raw = self.optional_text(obj, "videoUrl", "")?;
        match Url::parse(&raw) {
            Ok(url) if self.config.allows_scheme(url.scheme()) => Some(raw),
            Ok(url) => {
                self.errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidUrl,
                    "videoUrl",
                    format!("scheme '{}' is not allowed", url.scheme()),
                ));
                None
            }
            Err(err) => {
                self.errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidUrl,
                    "videoUrl",
                    err.to_string(),
                ));
                None
            }
        }
    }

    /// Object with only `known` keys retained; others are reported.
    fn record<'v>(
        &mut self,
        value: &'v Value,
        path: &str,
        known: &[&str],
    ) -> Option<&'v Map<String, Value>> {
        let obj = self.object(value, path)?;
        self.unknown_keys(obj, known, path);
        Some(obj)
    }

    fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(obj) => Some(obj),
            other => {
                self.errors
                    .push(ValidationError::invalid_type(path, "object", type_name(other)));
                None
            }
        }
    }

    fn unknown_keys(&mut self, obj: &Map<String, Value>, known: &[&str], path: &str) {
        for key in obj.keys().filter(|k| !known.contains(&k.as_str())) {
            let field_path = child(path, key);
            match self.config.unknown_fields {
                UnknownFieldPolicy::Drop => self.warnings.push(ValidationWarning {
                    kind: WarningKind::UnknownField,
                    path: field_path,
                    message: "not part of the topic schema; dropped".into(),
                }),
                UnknownFieldPolicy::Reject => self.errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownField,
                    field_path,
                    "not part of the topic schema",
                )),
            }
        }
    }

    fn required_text(&mut self, obj: &Map<String, Value>, key: &str, parent: &str) -> Option<String> {
        let path = child(parent, key);
        match present(obj, key) {
            Some(value) => self.text_value(value, &path),
            None => {
                self.errors.push(ValidationError::missing(&path));
                None
            }
        }
    }

    fn optional_text(&mut self, obj: &Map<String, Value>, key: &str, parent: &str) -> Option<String> {
        let value = present(obj, key)?;
        self.text_value(value, &child(parent, key))
    }

    fn text_value(&mut self, value: &Value, path: &str) -> Option<String> {
        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    self.errors.push(ValidationError::empty(path));
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            other => {
                self.errors
                    .push(ValidationError::invalid_type(path, "string", type_name(other)));
                None
            }
        }
    }

    fn optional_section<T>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        parent: &str,
        section: fn(&mut Self, &Value, &str) -> Option<T>,
    ) -> Option<T> {
        let value = present(obj, key)?;
        section(self, value, &child(parent, key))
    }

    /// Absent, `null` and `[]` all normalize to `None`.
    fn optional_list<T>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        parent: &str,
        item: impl FnMut(&mut Self, &Value, &str) -> Option<T>,
    ) -> Option<Vec<T>> {
        let path = child(parent, key);
        match present(obj, key)? {
            Value::Array(items) if items.is_empty() => None,
            Value::Array(items) => self.collect(items, &path, item),
            other => {
                self.errors
                    .push(ValidationError::invalid_type(&path, "array", type_name(other)));
                None
            }
        }
    }

    /// Visit every item, even after a failure, so all defects are reported.
    fn collect<T>(
        &mut self,
        items: &[Value],
        path: &str,
        mut item: impl FnMut(&mut Self, &Value, &str) -> Option<T>,
    ) -> Option<Vec<T>> {
        let mut out = Vec::with_capacity(items.len());
        let mut complete = true;
        for (i, value) in items.iter().enumerate() {
            match item(&mut *self, value, &format!("{path}[{i}]")) {
                Some(v) => out.push(v),
                None => complete = false,
            }
        }
        complete.then_some(out)
    }
}

fn present<'v>(obj: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
