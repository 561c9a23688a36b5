use serde::Serialize;

/// Free-form asymptotic bounds, e.g. `O(n log n)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub time: String,
    pub space: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concept {
    pub name: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Approach {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialStep {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPoint {
    pub title: String,
    pub description: String,
}

/// Tabular comparison. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ComparisonTable {
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

/// Diagram markup handed to the renderer untouched.
///
/// The catalog never parses or trims it; equality is byte equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagram(String);

impl Diagram {
    pub(crate) fn new(markup: String) -> Self {
        Diagram(markup)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
