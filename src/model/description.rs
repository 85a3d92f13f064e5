use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Concrete use case attached to an advanced description.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(
        default,
        deserialize_with = "crate::model::present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub input: Option<Value>,
    #[serde(
        default,
        deserialize_with = "crate::model::present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub output: Option<Value>,
    #[serde(
        default,
        deserialize_with = "crate::model::present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

/// Structured description with a mandatory intent.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedDescription {
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Example>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
}

/// Either a plain string or an [`AdvancedDescription`].
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Advanced(AdvancedDescription),
}

impl Description {
    /// Returns the searchable text of the description.
    ///
    pub fn text(&self) -> &str {
        match self {
            Description::Text(text) => text,
            Description::Advanced(advanced) => &advanced.intent,
        }
    }

    /// Same as [`Description::text`] but empty for a missing description.
    ///
    pub fn text_of(description: Option<&Description>) -> &str {
        description.map(Description::text).unwrap_or("")
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::Text(text.to_string())
    }
}
