use serde::Serialize;
use sha2::{Digest, Sha256};

use super::sections::{
    Approach, ComparisonTable, Complexity, Concept, Diagram, KeyPoint, TutorialStep,
};
use crate::types::identifiers::{TopicId, TopicVersion};

/// One structured topic, as accepted by the validator.
///
/// Instances handed out by the catalog are normalized: strings are trimmed
/// (the diagram excepted), empty optional lists are `None`, and every table
/// row matches the header width. The `id` is registration metadata and is not
/// part of the serialized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDocument {
    #[serde(skip)]
    pub id: TopicId,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<Diagram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concepts: Option<Vec<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approaches: Option<Vec<Approach>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutorial_steps: Option<Vec<TutorialStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<KeyPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_table: Option<ComparisonTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitfalls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl TopicDocument {
    /// Content hash over every field except the id.
    ///
    /// Fields are fed to the hasher tagged and length-prefixed, so distinct
    /// documents cannot collide by shifting text between adjacent fields.
    pub fn version(&self) -> TopicVersion {
        let mut digest = ContentDigest::new();

        digest.text("title", &self.title);
        digest.text("description", &self.description);
        digest.complexity("complexity", self.complexity.as_ref());
        digest.optional("example", self.example.as_deref());
        digest.optional("diagram", self.diagram.as_ref().map(Diagram::as_str));

        digest.list("concepts", self.concepts.as_deref(), |d, c| {
            d.text("name", &c.name);
            d.text("details", &c.details);
        });
        digest.list("approaches", self.approaches.as_deref(), |d, a| {
            d.text("title", &a.title);
            d.text("content", &a.content);
            d.complexity("complexity", a.complexity.as_ref());
        });
        digest.list("tutorialSteps", self.tutorial_steps.as_deref(), |d, s| {
            d.text("title", &s.title);
            d.text("content", &s.content);
        });
        digest.list("keyPoints", self.key_points.as_deref(), |d, k| {
            d.text("title", &k.title);
            d.text("description", &k.description);
        });

        match &self.comparison_table {
            Some(table) => {
                digest.present("comparisonTable");
                digest.list("headers", Some(table.headers.as_slice()), |d, h| d.text("h", h));
                digest.list("rows", Some(table.rows.as_slice()), |d, row| {
                    d.list("cells", Some(row.as_slice()), |d, cell| d.text("c", cell));
                });
            }
            None => digest.absent("comparisonTable"),
        }

        digest.list("pitfalls", self.pitfalls.as_deref(), |d, p| d.text("p", p));
        digest.optional("videoUrl", self.video_url.as_deref());

        digest.finish()
    }

    pub fn has_pitfalls(&self) -> bool {
        self.pitfalls.as_ref().is_some_and(|p| !p.is_empty())
    }
}

struct ContentDigest {
    hasher: Sha256,
}

impl ContentDigest {
    fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    fn tag(&mut self, marker: u8, name: &str) {
        self.hasher.update([marker]);
        self.hasher.update((name.len() as u64).to_le_bytes());
        self.hasher.update(name.as_bytes());
    }

    fn present(&mut self, name: &str) {
        self.tag(1, name);
    }

    fn absent(&mut self, name: &str) {
        self.tag(0, name);
    }

    fn text(&mut self, name: &str, value: &str) {
        self.present(name);
        self.hasher.update((value.len() as u64).to_le_bytes());
        self.hasher.update(value.as_bytes());
    }

    fn optional(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.text(name, value),
            None => self.absent(name),
        }
    }

    fn complexity(&mut self, name: &str, value: Option<&Complexity>) {
        match value {
            Some(c) => {
                self.present(name);
                self.text("time", &c.time);
                self.text("space", &c.space);
            }
            None => self.absent(name),
        }
    }

    fn list<T>(&mut self, name: &str, items: Option<&[T]>, mut each: impl FnMut(&mut Self, &T)) {
        match items {
            Some(items) => {
                self.present(name);
                self.hasher.update((items.len() as u64).to_le_bytes());
                for item in items {
                    each(&mut *self, item);
                }
            }
            None => self.absent(name),
        }
    }

    fn finish(self) -> TopicVersion {
        TopicVersion::from_hasher(self.hasher)
    }
}
