pub mod identifiers;

pub use identifiers::{TopicId, TopicIdError, TopicVersion};
