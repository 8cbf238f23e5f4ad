//! Core Web Vitals aggregation.
//!
//! Each device class is reduced to one score from the mean "good" share of
//! its three metrics; the two device scores are then averaged.

use crate::model::{DeviceClass, DeviceVitals, RealUserExperience, PERCENT_MAX};

/// Mean good percentage at which a device earns full marks.
pub const PASSING_GOOD_PERCENTAGE: f64 = 75.0;

/// Map a mean good percentage to a 0-100 device score.
///
/// Linear from 0 up to the passing threshold, flat at 100 above it.
#[must_use]
pub fn score_from_good_average(average: f64) -> f64 {
    if average.is_nan() {
        return 0.0;
    }
    if average >= PASSING_GOOD_PERCENTAGE {
        return 100.0;
    }
    average.max(0.0) / PASSING_GOOD_PERCENTAGE * 100.0
}

/// Mean good percentage of one device's three metrics.
#[must_use]
pub fn good_average(vitals: &DeviceVitals) -> f64 {
    let total: f64 = vitals
        .metrics()
        .iter()
        .map(|(_, sample)| f64::from(sample.good_percentage.min(PERCENT_MAX)))
        .sum();
    total / 3.0
}

/// Score for a single device class.
#[must_use]
pub fn device_score(vitals: &DeviceVitals) -> f64 {
    score_from_good_average(good_average(vitals))
}

/// Arithmetic mean of the mobile and desktop scores.
#[must_use]
pub fn real_user_score(experience: &RealUserExperience) -> f64 {
    let total: f64 = DeviceClass::ALL
        .iter()
        .map(|class| device_score(experience.device(*class)))
        .sum();
    total / DeviceClass::ALL.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricSample;

    fn uniform(good: u8) -> DeviceVitals {
        DeviceVitals::new(
            MetricSample::new(2000.0, good),
            MetricSample::new(0.05, good),
            MetricSample::new(150.0, good),
        )
    }

    #[test]
    fn test_curve_reference_points() {
        assert_eq!(score_from_good_average(75.0), 100.0);
        assert_eq!(score_from_good_average(37.5), 50.0);
        assert_eq!(score_from_good_average(0.0), 0.0);
        assert_eq!(score_from_good_average(100.0), 100.0);
    }

    #[test]
    fn test_curve_degenerate_inputs() {
        assert_eq!(score_from_good_average(f64::NAN), 0.0);
        assert_eq!(score_from_good_average(-5.0), 0.0);
        assert_eq!(score_from_good_average(f64::INFINITY), 100.0);
    }

    #[test]
    fn test_device_score_averages_metrics() {
        let vitals = DeviceVitals::new(
            MetricSample::new(3100.0, 30),
            MetricSample::new(0.3, 45),
            MetricSample::new(400.0, 37),
        );
        // mean good share is 37.33
        assert!((device_score(&vitals) - 49.78).abs() < 0.01);
    }

    #[test]
    fn test_device_score_clamps_percentages() {
        assert_eq!(device_score(&uniform(200)), 100.0);
    }

    #[test]
    fn test_real_user_score_is_device_mean() {
        let experience = RealUserExperience {
            mobile: uniform(30),
            desktop: uniform(90),
        };
        // mobile 40, desktop 100
        assert!((real_user_score(&experience) - 70.0).abs() < 1e-9);
    }
}
