use serde::{Deserialize, Serialize};

/// What to do with fields the topic schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Drop the field and report a warning.
    Drop,
    /// Reject the topic with an `UnknownField` error.
    Reject,
}

// Serializable so a snapshot can record the rules its topics were accepted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub version: String,
    pub unknown_fields: UnknownFieldPolicy,
    /// Accepted `videoUrl` schemes, lowercase.
    pub url_schemes: Vec<String>,
}

impl ValidationConfig {
    pub fn v0() -> Self {
        Self {
            version: "1".into(),
            unknown_fields: UnknownFieldPolicy::Drop,
            url_schemes: vec!["http".into(), "https".into()],
        }
    }

    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Reject,
            ..Self::v0()
        }
    }

    pub(crate) fn allows_scheme(&self, scheme: &str) -> bool {
        self.url_schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::v0()
    }
}
