//! Calculation result models for the Mix Bonus Engine.
//!
//! This module contains the [`BonusResult`] produced for every employee, the
//! [`RosterCalculation`] wrapping a full report pass, and the
//! [`SimpleBonusResult`] used by the single-employee lookup.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{TeamMixResult, TeamStanding, TeamTag};

/// Which lookup produced an employee's bonus per liter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusSource {
    /// The team tier table, chosen by the team's winner/loser standing.
    Team,
    /// The individual-deviation table, chosen by the employee's own mix.
    Deviation,
    /// The employee is excluded from team computations.
    Excluded,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The bonus computed for one employee.
///
/// Monetary fields are in currency units; `bonus_per_liter` is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusResult {
    /// The employee code.
    pub employee_id: String,
    /// The employee name.
    pub employee_name: String,
    /// The team tag the employee was evaluated under.
    pub team: TeamTag,
    /// The employee's own mix. Absent for excluded employees.
    pub own_mix: Option<Decimal>,
    /// The mix of the employee's base team. Absent for excluded employees.
    pub team_mix: Option<Decimal>,
    /// The base team's standing. Absent for excluded employees.
    pub standing: Option<TeamStanding>,
    /// Which lookup produced `bonus_per_liter`.
    pub bonus_source: BonusSource,
    /// Bonus per liter of premium fuel, in cents, after night scaling.
    pub bonus_per_liter: Decimal,
    /// Premium volume times bonus per liter.
    pub base_bonus: Decimal,
    /// Supplement for selling above the peer average.
    pub effort_bonus: Decimal,
    /// `base_bonus + effort_bonus`.
    pub total_bonus: Decimal,
    /// Every rule decision taken for this employee.
    pub audit_steps: Vec<AuditStep>,
}

impl BonusResult {
    /// Returns true when the employee took part in the team computation.
    pub fn is_eligible(&self) -> bool {
        self.bonus_source != BonusSource::Excluded
    }
}

/// The complete result of one calculation pass over a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Team mix figures used for every employee.
    pub team_mix: TeamMixResult,
    /// One result per employee, in report order.
    pub results: Vec<BonusResult>,
    /// Sum of `total_bonus` over all employees.
    pub total_payout: Decimal,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The single-employee view driven by the configured bonus rules.
///
/// # Example
///
/// ```
/// use mix_bonus_engine::models::SimpleBonusResult;
/// use rust_decimal::Decimal;
///
/// let view = SimpleBonusResult {
///     employee_id: "101".to_string(),
///     employee_name: "JOAO".to_string(),
///     common_gasoline_volume: Decimal::from(60),
///     premium_gasoline_volume: Decimal::from(40),
///     premium_ethanol_volume: Decimal::ZERO,
///     total_volume: Decimal::from(100),
///     mix: Decimal::from(40),
///     bonus_per_liter: Decimal::new(2, 2),
///     total_bonus: Decimal::new(80, 2),
/// };
/// assert_eq!(view.total_bonus, Decimal::new(8, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleBonusResult {
    /// The employee code.
    pub employee_id: String,
    /// The employee name.
    pub employee_name: String,
    /// Common gasoline volume.
    pub common_gasoline_volume: Decimal,
    /// Premium gasoline volume.
    pub premium_gasoline_volume: Decimal,
    /// Premium ethanol volume.
    pub premium_ethanol_volume: Decimal,
    /// Total recognized volume.
    pub total_volume: Decimal,
    /// The employee's own mix.
    pub mix: Decimal,
    /// Bonus per liter in currency units, after the ceiling.
    pub bonus_per_liter: Decimal,
    /// Premium volume times bonus per liter.
    pub total_bonus: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaseTeam;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_result(total: Decimal, source: BonusSource) -> BonusResult {
        BonusResult {
            employee_id: "101".to_string(),
            employee_name: "JOAO".to_string(),
            team: TeamTag::A,
            own_mix: Some(dec("40")),
            team_mix: Some(dec("40")),
            standing: Some(TeamStanding::Winner),
            bonus_source: source,
            bonus_per_liter: dec("1.50"),
            base_bonus: total,
            effort_bonus: Decimal::ZERO,
            total_bonus: total,
            audit_steps: vec![],
        }
    }

    #[test]
    fn test_bonus_source_serialization() {
        assert_eq!(
            serde_json::to_string(&BonusSource::Deviation).unwrap(),
            "\"deviation\""
        );
        let source: BonusSource = serde_json::from_str("\"excluded\"").unwrap();
        assert_eq!(source, BonusSource::Excluded);
    }

    #[test]
    fn test_is_eligible() {
        assert!(create_sample_result(dec("0.6"), BonusSource::Team).is_eligible());
        assert!(!create_sample_result(Decimal::ZERO, BonusSource::Excluded).is_eligible());
    }

    #[test]
    fn test_bonus_result_serialization() {
        let result = create_sample_result(dec("0.60"), BonusSource::Team);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"team\":\"A\""));
        assert!(json.contains("\"standing\":\"winner\""));
        assert!(json.contains("\"bonus_per_liter\":\"1.50\""));
        assert!(json.contains("\"total_bonus\":\"0.60\""));
    }

    #[test]
    fn test_roster_calculation_serialization() {
        let roster = RosterCalculation {
            calculation_id: Uuid::nil(),
            timestamp: DateTime::parse_from_rfc3339("2026-01-15T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            engine_version: "0.1.0".to_string(),
            team_mix: TeamMixResult {
                mix_a: dec("40"),
                mix_b: dec("30"),
                winner: Some(BaseTeam::A),
                loser: Some(BaseTeam::B),
            },
            results: vec![create_sample_result(dec("0.60"), BonusSource::Team)],
            total_payout: dec("0.60"),
            duration_us: 12,
        };

        let json = serde_json::to_string(&roster).unwrap();
        assert!(json.contains("\"calculation_id\":\"00000000-0000-0000-0000-000000000000\""));
        assert!(json.contains("\"winner\":\"A\""));
        assert!(json.contains("\"results\":["));

        let back: RosterCalculation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roster);
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "team_tier".to_string(),
            rule_name: "Team Tier Lookup".to_string(),
            input: serde_json::json!({"team_mix": "40"}),
            output: serde_json::json!({"bonus_per_liter": "1.50"}),
            reasoning: "Winner at 40% earns 1.50 cents".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"team_tier\""));
    }
}
