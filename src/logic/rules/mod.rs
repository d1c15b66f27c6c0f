pub mod engine;
pub mod humidity;
pub mod irrigation;
pub mod temperature;

pub use engine::RulesEngine;

use crate::models::{
    CropProfile, ForecastDay, IrrigationRecommendation, Recommendation, WeatherSnapshot,
};

/// Inputs shared by every recommendation rule for one advisory request.
pub struct RuleContext<'a> {
    pub current: &'a WeatherSnapshot,
    pub forecast: &'a [ForecastDay],
    pub profile: &'a CropProfile,
    pub irrigation: &'a IrrigationRecommendation,
}

/// Trait for advisory rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation>;
}
