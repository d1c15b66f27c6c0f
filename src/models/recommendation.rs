use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Temperature,
    Humidity,
    Irrigation,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::Temperature => "Temperature",
            RecommendationCategory::Humidity => "Humidity",
            RecommendationCategory::Irrigation => "Irrigation",
        }
    }
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Priority::Medium => "→",
            Priority::High => "!",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single actionable item. Emitted in rule order, not sorted by priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub message: String,
}

impl Recommendation {
    pub fn new(
        category: RecommendationCategory,
        priority: Priority,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            priority,
            message: message.into(),
        }
    }
}
