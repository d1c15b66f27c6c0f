use super::{
    humidity::HumidityRule, irrigation::IrrigationRule, temperature::TemperatureRule, Rule,
    RuleContext,
};
use crate::models::Recommendation;

/// Ordered rule set. Output follows rule order, not priority.
pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(TemperatureRule),
            Box::new(HumidityRule),
            Box::new(IrrigationRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let rec = rule.evaluate(ctx);
                if rec.is_some() {
                    tracing::debug!(rule = rule.id(), "Rule produced a recommendation");
                }
                rec
            })
            .collect()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::irrigation;
    use crate::models::{
        CropProfile, CropType, ForecastDay, Priority, RecommendationCategory, WeatherSnapshot,
    };

    fn run(current: &WeatherSnapshot, forecast: &[ForecastDay]) -> Vec<Recommendation> {
        let profile = CropProfile::builtin(CropType::Wheat);
        let irrigation = irrigation::plan(current, forecast, &profile);
        let ctx = RuleContext {
            current,
            forecast,
            profile: &profile,
            irrigation: &irrigation,
        };
        RulesEngine::new().evaluate(&ctx)
    }

    #[test]
    fn rules_are_listed_in_evaluation_order() {
        let ids: Vec<_> = RulesEngine::new()
            .list_rules()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["temperature", "humidity", "irrigation"]);
    }

    #[test]
    fn output_follows_rule_order_not_priority() {
        // Humid (medium) plus dry forecast (high irrigation) plus cold (high)
        let current = WeatherSnapshot::new(5.0, 85.0);
        let recs = run(&current, &[]);

        let categories: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                RecommendationCategory::Temperature,
                RecommendationCategory::Humidity,
                RecommendationCategory::Irrigation,
            ]
        );
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].priority, Priority::Medium);
        assert_eq!(recs[2].priority, Priority::High);
    }

    #[test]
    fn nothing_to_say_in_good_conditions() {
        // Wheat needs 420mm; enough rain means no irrigation entry
        let current = WeatherSnapshot::new(18.0, 55.0).with_precipitation(200.0);
        let forecast = vec![ForecastDay::new(20.0, 50.0, 5.0); 5];
        assert!(run(&current, &forecast).is_empty());
    }
}
