//! Night-shift scaling.
//!
//! Night-shift employees (`A_NIGHT`, `B_NIGHT`) receive 70% of the bonus per
//! liter their team or deviation lookup produced.

use rust_decimal::Decimal;

use crate::models::{AuditStep, TeamTag};

/// Returns the night-shift multiplier (0.7).
pub fn night_shift_factor() -> Decimal {
    Decimal::new(7, 1)
}

/// The result of night-shift scaling, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct NightShiftResult {
    /// Bonus per liter in cents after scaling.
    pub bonus_per_liter: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Scales a bonus per liter for night-shift tags; other tags pass through.
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::calculation::apply_night_shift;
/// use mix_bonus_engine::models::TeamTag;
/// use rust_decimal::Decimal;
///
/// let result = apply_night_shift(Decimal::new(150, 2), TeamTag::ANight, 1);
/// assert_eq!(result.bonus_per_liter, Decimal::new(105, 2));
/// ```
pub fn apply_night_shift(
    bonus_per_liter: Decimal,
    tag: TeamTag,
    step_number: u32,
) -> NightShiftResult {
    if tag.is_night() {
        let factor = night_shift_factor();
        let scaled = bonus_per_liter * factor;

        let audit_step = AuditStep {
            step_number,
            rule_id: "night_shift".to_string(),
            rule_name: "Night Shift Scaling".to_string(),
            input: serde_json::json!({
                "bonus_per_liter": bonus_per_liter.normalize().to_string(),
                "team": tag
            }),
            output: serde_json::json!({
                "bonus_per_liter": scaled.normalize().to_string(),
                "scaling_applied": true,
                "factor": factor.normalize().to_string()
            }),
            reasoning: format!(
                "{} cents/L x {} = {} cents/L",
                bonus_per_liter.normalize(),
                factor.normalize(),
                scaled.normalize()
            ),
        };

        NightShiftResult {
            bonus_per_liter: scaled,
            audit_step,
        }
    } else {
        let audit_step = AuditStep {
            step_number,
            rule_id: "night_shift".to_string(),
            rule_name: "Night Shift Scaling".to_string(),
            input: serde_json::json!({
                "bonus_per_liter": bonus_per_liter.normalize().to_string(),
                "team": tag
            }),
            output: serde_json::json!({
                "bonus_per_liter": bonus_per_liter.normalize().to_string(),
                "scaling_applied": false
            }),
            reasoning: format!("No night scaling - employee is on team {}", tag),
        };

        NightShiftResult {
            bonus_per_liter,
            audit_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_night_shift_gets_70_percent() {
        let result = apply_night_shift(dec("2.25"), TeamTag::BNight, 3);

        assert_eq!(result.bonus_per_liter, dec("1.575"));
        assert_eq!(result.audit_step.rule_id, "night_shift");
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.input["team"].as_str().unwrap(), "B_NIGHT");
        assert!(result.audit_step.output["scaling_applied"].as_bool().unwrap());
        assert!(result.audit_step.reasoning.contains("0.7"));
    }

    #[test]
    fn test_day_shift_is_unchanged() {
        let result = apply_night_shift(dec("1.50"), TeamTag::A, 1);

        assert_eq!(result.bonus_per_liter, dec("1.50"));
        assert!(!result.audit_step.output["scaling_applied"].as_bool().unwrap());
    }

    #[test]
    fn test_zero_stays_zero() {
        let result = apply_night_shift(Decimal::ZERO, TeamTag::ANight, 1);
        assert_eq!(result.bonus_per_liter, Decimal::ZERO);
    }
}
