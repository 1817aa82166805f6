//! Roast profile generator
//!
//! Synthesizes a deterministic bean-temperature curve from the roast
//! parameters. The curve has two phases:
//!
//! - **Drying/Maillard** (`0 ..= first_crack`): concave ease-out rise from the
//!   charge temperature to the first-crack temperature.
//! - **Development** (`first_crack ..= end`): linear rise from first crack to
//!   the drop temperature, occupying the final `development_time_pct` percent
//!   of the roast.
//!
//! Both phases are non-decreasing, so every profile peaks at its final sample.
//! Bean type is carried for provenance only and never shapes the curve.

use crate::error::RoastResult;
use crate::models::{BeanType, ProfileSample, RoastLevel, RoastProfile};
use crate::validation::{validate_charge_temperature, validate_development_time};

/// Fixed sampling resolution of generated profiles
pub const SAMPLE_INTERVAL_MINUTES: f64 = 0.5;

/// Share of the total rise reached at first crack
const FIRST_CRACK_RISE_FRACTION: f64 = 0.75;

/// Curve targets for a roast level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTargets {
    /// Rise from charge to drop temperature (°C)
    pub temperature_rise: f64,
    /// Total roast duration, a multiple of the sample interval
    pub duration_minutes: f64,
}

/// Darker levels roast longer and finish hotter
pub fn level_targets(level: RoastLevel) -> LevelTargets {
    let (temperature_rise, duration_minutes) = match level {
        RoastLevel::Light => (22.0, 10.0),
        RoastLevel::Medium => (30.0, 11.5),
        RoastLevel::Dark => (38.0, 13.0),
        RoastLevel::French => (44.0, 14.0),
        RoastLevel::Italian => (50.0, 15.0),
    };
    LevelTargets {
        temperature_rise,
        duration_minutes,
    }
}

/// Generate a roast profile.
///
/// Same inputs always produce the same profile. Out-of-range charge
/// temperature or development percentage fail with `InvalidParameter`.
pub fn generate(
    bean_type: BeanType,
    roast_level: RoastLevel,
    charge_temp: f64,
    development_time_pct: f64,
) -> RoastResult<RoastProfile> {
    validate_charge_temperature(charge_temp)?;
    validate_development_time(development_time_pct)?;

    let targets = level_targets(roast_level);
    let duration = targets.duration_minutes;
    let drop_temp = charge_temp + targets.temperature_rise;
    let first_crack_temp = charge_temp + targets.temperature_rise * FIRST_CRACK_RISE_FRACTION;
    let first_crack_minute = duration * (1.0 - development_time_pct / 100.0);

    let steps = (duration / SAMPLE_INTERVAL_MINUTES).round() as usize;
    let samples = (0..=steps)
        .map(|i| {
            let t = i as f64 * SAMPLE_INTERVAL_MINUTES;
            let temperature = if t <= first_crack_minute {
                let remaining = 1.0 - t / first_crack_minute;
                charge_temp + (first_crack_temp - charge_temp) * (1.0 - remaining * remaining)
            } else {
                let to_drop = (duration - t) / (duration - first_crack_minute);
                drop_temp - (drop_temp - first_crack_temp) * to_drop
            };
            ProfileSample {
                elapsed_minutes: t,
                temperature_celsius: temperature,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        %bean_type,
        %roast_level,
        charge_temp,
        development_time_pct,
        samples = samples.len(),
        "Generated roast profile"
    );

    Ok(RoastProfile {
        samples,
        bean_type,
        target_roast_level: roast_level,
        charge_temperature: charge_temp,
        development_time_pct,
        drop_temperature: drop_temp,
        total_duration_minutes: duration,
        first_crack_minute,
    })
}

/// Generate from string labels, as submitted by a form
pub fn generate_from_labels(
    bean_type: &str,
    roast_level: &str,
    charge_temp: f64,
    development_time_pct: f64,
) -> RoastResult<RoastProfile> {
    generate(
        bean_type.parse()?,
        roast_level.parse()?,
        charge_temp,
        development_time_pct,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoastError;

    #[test]
    fn test_medium_profile_shape() {
        let profile = generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 20.0).unwrap();

        assert_eq!(profile.len(), 24);
        assert_eq!(profile.samples()[0].elapsed_minutes, 0.0);
        assert_eq!(profile.samples()[0].temperature_celsius, 190.0);
        assert_eq!(profile.total_duration_minutes, 11.5);
        assert_eq!(profile.drop_temperature, 220.0);
        assert!((profile.first_crack_minute - 9.2).abs() < 1e-9);

        let last = profile.last_sample().unwrap();
        assert_eq!(last.elapsed_minutes, 11.5);
        assert_eq!(last.temperature_celsius, 220.0);
    }

    #[test]
    fn test_samples_on_fixed_grid() {
        let profile = generate(BeanType::Robusta, RoastLevel::Dark, 200.0, 25.0).unwrap();
        for (i, sample) in profile.samples().iter().enumerate() {
            assert_eq!(sample.elapsed_minutes, i as f64 * SAMPLE_INTERVAL_MINUTES);
        }
    }

    #[test]
    fn test_first_crack_temperature_reached_at_development_start() {
        let profile = generate(BeanType::Arabica, RoastLevel::Light, 180.0, 20.0).unwrap();
        // Light: 10 min, first crack at 8.0 min, rise 22 °C
        let at_crack = profile.temperature_at(8.0).unwrap();
        assert!((at_crack - (180.0 + 22.0 * 0.75)).abs() < 1e-9);
    }

    #[test]
    fn test_concave_before_first_crack() {
        let profile = generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 20.0).unwrap();
        let early: Vec<f64> = profile
            .samples()
            .iter()
            .take_while(|s| s.elapsed_minutes <= profile.first_crack_minute)
            .map(|s| s.temperature_celsius)
            .collect();
        let increments: Vec<f64> = early.windows(2).map(|w| w[1] - w[0]).collect();
        for pair in increments.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-9, "rise should slow toward first crack");
        }
    }

    #[test]
    fn test_bean_type_does_not_change_curve() {
        let arabica = generate(BeanType::Arabica, RoastLevel::French, 210.0, 22.0).unwrap();
        let liberica = generate(BeanType::Liberica, RoastLevel::French, 210.0, 22.0).unwrap();
        assert_eq!(arabica.samples(), liberica.samples());
        assert_ne!(arabica.bean_type, liberica.bean_type);
    }

    #[test]
    fn test_rejects_out_of_range_charge() {
        let err = generate(BeanType::Arabica, RoastLevel::Medium, 120.0, 20.0).unwrap_err();
        assert!(matches!(
            err,
            RoastError::InvalidParameter {
                parameter: "charge_temp",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_development() {
        let err = generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            RoastError::InvalidParameter {
                parameter: "development_time_pct",
                ..
            }
        ));
    }

    #[test]
    fn test_generate_from_labels() {
        let profile = generate_from_labels("Blend", "Italian", 200.0, 30.0).unwrap();
        assert_eq!(profile.bean_type, BeanType::Blend);
        assert_eq!(profile.target_roast_level, RoastLevel::Italian);

        assert!(generate_from_labels("Blend", "Cinnamon", 200.0, 30.0).is_err());
        assert!(generate_from_labels("Geisha", "Light", 200.0, 30.0).is_err());
    }

    #[test]
    fn test_level_targets_increase_with_darkness() {
        for pair in RoastLevel::ALL.windows(2) {
            let lighter = level_targets(pair[0]);
            let darker = level_targets(pair[1]);
            assert!(darker.temperature_rise > lighter.temperature_rise);
            assert!(darker.duration_minutes > lighter.duration_minutes);
        }
    }
}
