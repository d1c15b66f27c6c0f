use super::calculations::mean_precipitation;
use crate::models::{
    CropProfile, ForecastDay, PestDiseaseRisk, RiskBand, RiskEntry, RiskKind, RiskSeverity,
    WeatherSnapshot,
};

/// One tier of a risk syndrome. Tiers of the same kind are listed highest
/// first and only the first match contributes.
struct RiskTier {
    kind: RiskKind,
    severity: RiskSeverity,
    points: u32,
    applies: fn(&WeatherSnapshot, &[ForecastDay], &CropProfile) -> bool,
    message: &'static str,
    prevention: &'static str,
}

const FUNGAL: &[RiskTier] = &[
    RiskTier {
        kind: RiskKind::FungalDiseases,
        severity: RiskSeverity::High,
        points: 40,
        applies: |w, _, _| w.humidity > 75.0 && w.temperature > 25.0,
        message: "High humidity and warm temperature create ideal conditions for fungal \
                  diseases like powdery mildew and rust.",
        prevention: "Apply fungicide preventively, ensure good air circulation, avoid \
                     overhead watering.",
    },
    RiskTier {
        kind: RiskKind::FungalDiseases,
        severity: RiskSeverity::Medium,
        points: 20,
        applies: |w, _, _| w.humidity > 70.0 && w.temperature > 22.0,
        message: "Moderate risk of fungal diseases. Monitor crops closely.",
        prevention: "Maintain proper spacing, avoid wetting leaves during irrigation.",
    },
];

const PESTS: &[RiskTier] = &[
    RiskTier {
        kind: RiskKind::PestInfestation,
        severity: RiskSeverity::High,
        points: 35,
        applies: |w, _, _| w.temperature > 28.0 && w.humidity < 50.0,
        message: "Hot and dry conditions favor pest activity (aphids, spider mites).",
        prevention: "Increase humidity if possible, apply organic pest control, monitor \
                     regularly.",
    },
    RiskTier {
        kind: RiskKind::PestInfestation,
        severity: RiskSeverity::Medium,
        points: 15,
        applies: |w, _, _| w.temperature > 25.0 && w.humidity < 55.0,
        message: "Moderate pest risk. Keep fields clean and monitor.",
        prevention: "Use beneficial insects, maintain field hygiene.",
    },
];

const ROOT_ROT: &[RiskTier] = &[RiskTier {
    kind: RiskKind::RootRot,
    severity: RiskSeverity::High,
    points: 30,
    applies: |_, forecast, profile| {
        mean_precipitation(forecast) > profile.rainfall_optimal.1 * 1.5
    },
    message: "Excessive rainfall predicted. Risk of waterlogging and root diseases.",
    prevention: "Improve drainage, avoid overwatering, use raised beds if possible.",
}];

const SYNDROMES: [&[RiskTier]; 3] = [FUNGAL, PESTS, ROOT_ROT];

/// Pattern-match current conditions and the forecast against known pest and
/// disease syndromes.
pub fn assess(
    current: &WeatherSnapshot,
    forecast: &[ForecastDay],
    profile: &CropProfile,
) -> PestDiseaseRisk {
    let mut risks = Vec::new();
    let mut score: u32 = 0;

    for tiers in SYNDROMES {
        if let Some(tier) = tiers
            .iter()
            .find(|tier| (tier.applies)(current, forecast, profile))
        {
            tracing::debug!(
                kind = tier.kind.as_str(),
                severity = tier.severity.as_str(),
                points = tier.points,
                "Risk syndrome matched"
            );
            score += tier.points;
            risks.push(RiskEntry {
                kind: tier.kind,
                severity: tier.severity,
                message: tier.message.to_string(),
                prevention: tier.prevention.to_string(),
            });
        }
    }

    let risk_score = score.min(100);

    PestDiseaseRisk {
        overall_risk: RiskBand::from_score(risk_score),
        risk_score,
        risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropType;
    use proptest::prelude::*;

    fn rice() -> CropProfile {
        CropProfile::builtin(CropType::Rice)
    }

    #[test]
    fn rice_humid_scenario_is_high() {
        let current = WeatherSnapshot::new(27.0, 80.0).with_wind(5.0).with_uv(4.0);
        let forecast = vec![ForecastDay::new(30.0, 0.0, 5.0); 5];
        let risk = assess(&current, &forecast, &rice());

        assert_eq!(risk.risk_score, 40);
        assert_eq!(risk.overall_risk, RiskBand::High);
        assert_eq!(risk.risks.len(), 1);
        assert_eq!(risk.risks[0].kind, RiskKind::FungalDiseases);
        assert_eq!(risk.risks[0].severity, RiskSeverity::High);
    }

    #[test]
    fn only_highest_fungal_tier_is_reported() {
        // Satisfies both fungal tiers
        let risk = assess(&WeatherSnapshot::new(30.0, 90.0), &[], &rice());
        let fungal: Vec<_> = risk
            .risks
            .iter()
            .filter(|r| r.kind == RiskKind::FungalDiseases)
            .collect();
        assert_eq!(fungal.len(), 1);
        assert_eq!(fungal[0].severity, RiskSeverity::High);
    }

    #[test]
    fn medium_tiers() {
        let fungal = assess(&WeatherSnapshot::new(23.0, 72.0), &[], &rice());
        assert_eq!(fungal.risk_score, 20);
        assert_eq!(fungal.overall_risk, RiskBand::Medium);
        assert_eq!(fungal.risks[0].severity, RiskSeverity::Medium);

        let pests = assess(&WeatherSnapshot::new(26.0, 52.0), &[], &rice());
        assert_eq!(pests.risk_score, 15);
        assert_eq!(pests.overall_risk, RiskBand::Low);
        assert_eq!(pests.risks[0].kind, RiskKind::PestInfestation);
    }

    #[test]
    fn hot_dry_with_flooding_forecast_is_critical() {
        let wheat = CropProfile::builtin(CropType::Wheat);
        // Mean forecast rain 100 > 60 * 1.5
        let forecast = vec![ForecastDay::new(30.0, 100.0, 5.0); 3];
        let risk = assess(&WeatherSnapshot::new(32.0, 40.0), &forecast, &wheat);

        assert_eq!(risk.risk_score, 65);
        assert_eq!(risk.overall_risk, RiskBand::Critical);
        let kinds: Vec<_> = risk.risks.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RiskKind::PestInfestation, RiskKind::RootRot]);
    }

    #[test]
    fn mild_conditions_are_low() {
        let risk = assess(&WeatherSnapshot::new(18.0, 60.0), &[], &rice());
        assert_eq!(risk.risk_score, 0);
        assert_eq!(risk.overall_risk, RiskBand::Low);
        assert!(risk.risks.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_score_in_range(
            temp in -20.0f64..50.0,
            humidity in 0.0f64..100.0,
            rain in 0.0f64..500.0,
        ) {
            let forecast = vec![ForecastDay::new(temp, rain, 5.0); 5];
            let risk = assess(&WeatherSnapshot::new(temp, humidity), &forecast, &rice());
            prop_assert!(risk.risk_score <= 100);
            prop_assert_eq!(risk.overall_risk, RiskBand::from_score(risk.risk_score));
        }

        /// Past the fungal thresholds, warmer and more humid never lowers the score.
        #[test]
        fn prop_fungal_monotonic(
            temp in 25.01f64..45.0,
            humidity in 75.01f64..100.0,
            dt in 0.0f64..10.0,
            dh in 0.0f64..10.0,
        ) {
            let profile = rice();
            let before = assess(&WeatherSnapshot::new(temp, humidity), &[], &profile);
            let after = assess(
                &WeatherSnapshot::new(temp + dt, (humidity + dh).min(100.0)),
                &[],
                &profile,
            );
            prop_assert!(after.risk_score >= before.risk_score);
        }
    }
}
