use super::crop::CropType;
use super::recommendation::Recommendation;
use serde::{Deserialize, Serialize};

/// Classification of a single current-weather metric against a crop profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionStatus {
    Optimal,
    Good,
    Warning,
    Critical,
    // Precipitation only
    Low,
    Excessive,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::Optimal => "optimal",
            ConditionStatus::Good => "good",
            ConditionStatus::Warning => "warning",
            ConditionStatus::Critical => "critical",
            ConditionStatus::Low => "low",
            ConditionStatus::Excessive => "excessive",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionStatus::Optimal => "✓",
            ConditionStatus::Good => "·",
            ConditionStatus::Warning | ConditionStatus::Low => "⚠",
            ConditionStatus::Critical | ConditionStatus::Excessive => "!",
        }
    }
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAssessment {
    pub value: f64,
    pub status: ConditionStatus,
    pub message: String,
}

impl MetricAssessment {
    pub fn new(value: f64, status: ConditionStatus, message: impl Into<String>) -> Self {
        Self {
            value,
            status,
            message: message.into(),
        }
    }
}

/// Per-metric assessment of current conditions. Field order is the
/// presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionReport {
    pub temperature: MetricAssessment,
    pub humidity: MetricAssessment,
    pub precipitation: MetricAssessment,
    pub wind_speed: MetricAssessment,
    pub uv_index: MetricAssessment,
}

impl ConditionReport {
    pub fn entries(&self) -> [(&'static str, &MetricAssessment); 5] {
        [
            ("Temperature", &self.temperature),
            ("Humidity", &self.humidity),
            ("Precipitation", &self.precipitation),
            ("Wind Speed", &self.wind_speed),
            ("UV Index", &self.uv_index),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRecommendation {
    pub needed: bool,
    pub urgency: Urgency,
    /// Supplemental water in mm
    pub amount: u32,
    pub timing: String,
    pub message: String,
}

/// Qualitative risk band derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 60 {
            RiskBand::Critical
        } else if score >= 40 {
            RiskBand::High
        } else if score >= 20 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
            RiskBand::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskKind {
    #[serde(rename = "Fungal Diseases")]
    FungalDiseases,
    #[serde(rename = "Pest Infestation")]
    PestInfestation,
    #[serde(rename = "Root Rot")]
    RootRot,
}

impl RiskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskKind::FungalDiseases => "Fungal Diseases",
            RiskKind::PestInfestation => "Pest Infestation",
            RiskKind::RootRot => "Root Rot",
        }
    }
}

impl std::fmt::Display for RiskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    Medium,
    High,
}

impl RiskSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSeverity::Medium => "medium",
            RiskSeverity::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub severity: RiskSeverity,
    pub message: String,
    pub prevention: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PestDiseaseRisk {
    pub overall_risk: RiskBand,
    pub risk_score: u32,
    pub risks: Vec<RiskEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDay {
    pub day: String,
    pub score: u32,
    pub reason: String,
    /// Position in the forecast, `None` for the synthetic "Today" baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPlan {
    pub harvest: ActivityDay,
    pub spray: ActivityDay,
    pub fertilize: ActivityDay,
}

impl ActivityPlan {
    pub fn entries(&self) -> [(&'static str, &ActivityDay); 3] {
        [
            ("Harvest", &self.harvest),
            ("Spray", &self.spray),
            ("Fertilize", &self.fertilize),
        ]
    }
}

/// Everything the advisor derives for one crop from one weather report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub crop_type: CropType,
    pub crop_name: String,
    pub current_conditions: ConditionReport,
    pub irrigation_recommendation: IrrigationRecommendation,
    pub pest_disease_risk: PestDiseaseRisk,
    pub activity_planner: ActivityPlan,
    /// Composite 0-100 score
    pub crop_loss_risk: u8,
    pub recommendations: Vec<Recommendation>,
}
