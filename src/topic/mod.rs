pub mod document;
pub mod sections;

pub use crate::types::identifiers::{TopicId, TopicVersion};
pub use document::TopicDocument;
pub use sections::{
    Approach, ComparisonTable, Complexity, Concept, Diagram, KeyPoint, TutorialStep,
};
