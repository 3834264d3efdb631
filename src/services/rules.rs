use crate::models::{AlertLevel, CandidateAlert, SensorReading};

/// Soil moisture percentage below which irrigation is recommended.
pub const SOIL_MOISTURE_MIN: f64 = 30.0;
/// Temperature (°C) above which heat stress becomes a risk when the air is dry.
pub const HEAT_STRESS_TEMP: f64 = 35.0;
/// Relative humidity percentage below which heat cannot dissipate.
pub const HEAT_STRESS_HUMIDITY: f64 = 40.0;
/// Optimal soil pH window for most crops.
pub const PH_MIN: f64 = 6.0;
pub const PH_MAX: f64 = 7.5;

/// The fixed threshold rules, evaluated against every reading in declaration
/// order. Titles are stable identifiers: open-alert deduplication keys on
/// them, so renaming one orphans any alerts already stored under the old name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdRule {
    LowSoilMoisture,
    HeatStress,
    PhOutOfRange,
}

impl ThresholdRule {
    pub const ALL: [ThresholdRule; 3] = [
        ThresholdRule::LowSoilMoisture,
        ThresholdRule::HeatStress,
        ThresholdRule::PhOutOfRange,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ThresholdRule::LowSoilMoisture => "Low Soil Moisture",
            ThresholdRule::HeatStress => "Heat Stress Risk",
            ThresholdRule::PhOutOfRange => "pH Out of Optimal Range",
        }
    }

    pub fn level(self) -> AlertLevel {
        match self {
            ThresholdRule::LowSoilMoisture => AlertLevel::High,
            ThresholdRule::HeatStress | ThresholdRule::PhOutOfRange => AlertLevel::Medium,
        }
    }

    /// Produce the alert description when the rule fires. A reading that
    /// lacks a field a rule needs never satisfies that rule.
    fn fire(self, reading: &SensorReading) -> Option<String> {
        match self {
            ThresholdRule::LowSoilMoisture => {
                let moisture = reading.soil_moisture?;
                (moisture < SOIL_MOISTURE_MIN).then(|| {
                    format!(
                        "Moisture level is {}%. Consider irrigating the crops.",
                        moisture
                    )
                })
            }
            ThresholdRule::HeatStress => {
                let temperature = reading.temperature?;
                let humidity = reading.humidity?;
                (temperature > HEAT_STRESS_TEMP && humidity < HEAT_STRESS_HUMIDITY).then(|| {
                    format!(
                        "High temp ({}°C) and low humidity ({}%). Protect crops from heat stress.",
                        temperature, humidity
                    )
                })
            }
            ThresholdRule::PhOutOfRange => {
                let ph = reading.ph?;
                (ph < PH_MIN || ph > PH_MAX).then(|| {
                    format!(
                        "Current pH is {}. Optimal range is 6.0 - 7.5. Consider soil treatment.",
                        ph
                    )
                })
            }
        }
    }

    pub fn evaluate(self, reading: &SensorReading) -> Option<CandidateAlert> {
        self.fire(reading).map(|description| CandidateAlert {
            title: self.title(),
            description,
            level: self.level(),
        })
    }
}

/// Evaluate every rule against one reading. Candidates come back in rule
/// declaration order.
pub fn evaluate(reading: &SensorReading) -> Vec<CandidateAlert> {
    ThresholdRule::ALL
        .iter()
        .filter_map(|rule| rule.evaluate(reading))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn reading() -> SensorReading {
        SensorReading {
            id: 1,
            device_id: 1,
            ts: Utc::now(),
            soil_moisture: None,
            temperature: None,
            humidity: None,
            nitrogen: None,
            phosphorus: None,
            potassium: None,
            ph: None,
            light_intensity: None,
            rainfall: None,
        }
    }

    #[test]
    fn test_healthy_reading_produces_no_candidates() {
        let mut r = reading();
        r.soil_moisture = Some(45.0);
        r.temperature = Some(28.0);
        r.humidity = Some(55.0);
        r.ph = Some(6.8);

        assert_eq!(evaluate(&r), vec![]);
    }

    #[test]
    fn test_empty_reading_produces_no_candidates() {
        assert_eq!(evaluate(&reading()), vec![]);
    }

    #[test]
    fn test_low_soil_moisture_fires_high_severity() {
        let mut r = reading();
        r.soil_moisture = Some(20.0);

        let candidates = evaluate(&r);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Low Soil Moisture");
        assert_eq!(candidates[0].level, AlertLevel::High);
        assert_eq!(
            candidates[0].description,
            "Moisture level is 20%. Consider irrigating the crops."
        );
    }

    #[test]
    fn test_soil_moisture_threshold_is_exclusive() {
        let mut r = reading();
        r.soil_moisture = Some(SOIL_MOISTURE_MIN);

        assert_eq!(evaluate(&r), vec![]);
    }

    #[test]
    fn test_heat_stress_requires_heat_and_dryness_together() {
        let mut hot_and_dry = reading();
        hot_and_dry.temperature = Some(40.0);
        hot_and_dry.humidity = Some(30.0);

        let candidates = evaluate(&hot_and_dry);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Heat Stress Risk");
        assert_eq!(candidates[0].level, AlertLevel::Medium);
        assert_eq!(
            candidates[0].description,
            "High temp (40°C) and low humidity (30%). Protect crops from heat stress."
        );

        let mut hot_but_humid = reading();
        hot_but_humid.temperature = Some(40.0);
        hot_but_humid.humidity = Some(55.0);
        assert_eq!(evaluate(&hot_but_humid), vec![]);

        let mut dry_but_mild = reading();
        dry_but_mild.temperature = Some(30.0);
        dry_but_mild.humidity = Some(30.0);
        assert_eq!(evaluate(&dry_but_mild), vec![]);
    }

    #[test]
    fn test_heat_stress_boundaries_are_exclusive() {
        let mut r = reading();
        r.temperature = Some(HEAT_STRESS_TEMP);
        r.humidity = Some(30.0);
        assert_eq!(evaluate(&r), vec![]);

        r.temperature = Some(40.0);
        r.humidity = Some(HEAT_STRESS_HUMIDITY);
        assert_eq!(evaluate(&r), vec![]);
    }

    #[test]
    fn test_ph_fires_outside_optimal_range_only() {
        for (ph, fires) in [
            (5.0, true),
            (6.0, false),
            (6.5, false),
            (7.5, false),
            (8.0, true),
        ] {
            let mut r = reading();
            r.ph = Some(ph);

            let candidates = evaluate(&r);
            assert_eq!(candidates.len(), usize::from(fires), "pH {}", ph);

            if fires {
                assert_eq!(candidates[0].title, "pH Out of Optimal Range");
                assert_eq!(candidates[0].level, AlertLevel::Medium);
            }
        }
    }

    #[test]
    fn test_ph_description_mentions_range() {
        let mut r = reading();
        r.ph = Some(5.2);

        let candidates = evaluate(&r);
        assert_eq!(
            candidates[0].description,
            "Current pH is 5.2. Optimal range is 6.0 - 7.5. Consider soil treatment."
        );
    }

    #[test]
    fn test_missing_fields_never_satisfy_a_rule() {
        // Dry air plus heat, but the temperature field is absent.
        let mut r = reading();
        r.humidity = Some(10.0);
        assert_eq!(evaluate(&r), vec![]);

        let mut r = reading();
        r.temperature = Some(45.0);
        assert_eq!(evaluate(&r), vec![]);
    }

    #[test]
    fn test_multiple_rules_fire_in_declaration_order() {
        let mut r = reading();
        r.soil_moisture = Some(10.0);
        r.temperature = Some(40.0);
        r.humidity = Some(20.0);
        r.ph = Some(5.0);

        let titles: Vec<&str> = evaluate(&r).iter().map(|c| c.title).collect();

        assert_eq!(
            titles,
            vec!["Low Soil Moisture", "Heat Stress Risk", "pH Out of Optimal Range"]
        );
    }
}
