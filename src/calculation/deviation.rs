//! Individual-deviation override.
//!
//! When an employee's own mix is more than [`DEVIATION_THRESHOLD`] points away
//! from the aggregate mix of the other members of their base team, the team
//! tier is replaced by the deviation table looked up at the employee's own
//! mix. Winner/loser standing is ignored for the override.

use rust_decimal::Decimal;

use crate::models::{AuditStep, BaseTeam, EmployeeAggregate, TeamAssignment};

use super::team_mix::{group_mix, team_members};
use super::tier_table::deviation_table;

/// Percentage points of difference that trigger the override.
pub const DEVIATION_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The outcome of the deviation check.
#[derive(Debug, Clone)]
pub struct DeviationCheck {
    /// Aggregate mix of the other base-team members; `None` without peers.
    pub peer_mix: Option<Decimal>,
    /// Deviation-table bonus per liter in cents when the override applies.
    pub bonus_per_liter: Option<Decimal>,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

impl DeviationCheck {
    /// Returns true when the deviation table replaces the team tier.
    pub fn applies(&self) -> bool {
        self.bonus_per_liter.is_some()
    }
}

/// Compares an employee's mix with the rest of their base team.
///
/// An employee with no other team members is never overridden.
pub fn check_deviation(
    employee: &EmployeeAggregate,
    base_team: BaseTeam,
    roster: &[EmployeeAggregate],
    assignment: &TeamAssignment,
    step_number: u32,
) -> DeviationCheck {
    let own_mix = employee.mix();
    let peers: Vec<&EmployeeAggregate> = team_members(roster, assignment, base_team)
        .filter(|peer| peer.id != employee.id)
        .collect();

    if peers.is_empty() {
        let audit_step = AuditStep {
            step_number,
            rule_id: "deviation_override".to_string(),
            rule_name: "Individual Deviation Override".to_string(),
            input: serde_json::json!({
                "own_mix": own_mix.normalize().to_string(),
                "peer_count": 0
            }),
            output: serde_json::json!({ "applied": false }),
            reasoning: format!("No other members on team {} - no comparison", base_team),
        };
        return DeviationCheck {
            peer_mix: None,
            bonus_per_liter: None,
            audit_step,
        };
    }

    let peer_mix = group_mix(peers.iter().copied());
    // Only mixes far outside 0..=100 of opposite sign can overflow here.
    let deviation = own_mix
        .checked_sub(peer_mix)
        .map(|difference| difference.abs())
        .unwrap_or(Decimal::MAX);
    let bonus_per_liter =
        (deviation > DEVIATION_THRESHOLD).then(|| deviation_table().lookup(own_mix));

    let reasoning = match bonus_per_liter {
        Some(rate) => format!(
            "Own mix {}% differs from peer mix {}% by {} points (> {}) - deviation table gives {} cents/L",
            own_mix.round_dp(2).normalize(),
            peer_mix.round_dp(2).normalize(),
            deviation.round_dp(2).normalize(),
            DEVIATION_THRESHOLD,
            rate.normalize()
        ),
        None => format!(
            "Own mix {}% within {} points of peer mix {}% - team tier kept",
            own_mix.round_dp(2).normalize(),
            DEVIATION_THRESHOLD,
            peer_mix.round_dp(2).normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "deviation_override".to_string(),
        rule_name: "Individual Deviation Override".to_string(),
        input: serde_json::json!({
            "own_mix": own_mix.normalize().to_string(),
            "peer_mix": peer_mix.normalize().to_string(),
            "peer_count": peers.len()
        }),
        output: serde_json::json!({
            "applied": bonus_per_liter.is_some(),
            "deviation": deviation.normalize().to_string(),
            "bonus_per_liter": bonus_per_liter.map(|rate| rate.normalize().to_string())
        }),
        reasoning,
    };

    DeviationCheck {
        peer_mix: Some(peer_mix),
        bonus_per_liter,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamTag;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, premium: &str, total: &str) -> EmployeeAggregate {
        let mut employee = EmployeeAggregate::new(id, format!("EMP {id}"), 1);
        employee.premium_gasoline_volume = dec(premium);
        employee.common_gasoline_volume = dec(total) - dec(premium);
        employee.total_volume = dec(total);
        employee
    }

    #[test]
    fn test_deviation_above_peers_applies() {
        let roster = vec![
            employee("1", "60", "100"),
            employee("2", "40", "100"),
            employee("3", "40", "100"),
        ];
        let assignment = TeamAssignment::default();
        let check = check_deviation(&roster[0], BaseTeam::A, &roster, &assignment, 1);

        assert_eq!(check.peer_mix, Some(dec("40")));
        assert!(check.applies());
        assert_eq!(check.bonus_per_liter, Some(dec("2.00")));
        assert!(check.audit_step.output["applied"].as_bool().unwrap());
    }

    #[test]
    fn test_deviation_below_peers_applies() {
        let roster = vec![employee("1", "38", "100"), employee("2", "55", "100")];
        let assignment = TeamAssignment::default();
        let check = check_deviation(&roster[0], BaseTeam::A, &roster, &assignment, 1);

        assert!(check.applies());
        assert_eq!(check.bonus_per_liter, Some(dec("0.75")));
    }

    #[test]
    fn test_exactly_eight_points_does_not_apply() {
        let roster = vec![employee("1", "48", "100"), employee("2", "40", "100")];
        let assignment = TeamAssignment::default();
        let check = check_deviation(&roster[0], BaseTeam::A, &roster, &assignment, 1);

        assert!(!check.applies());
        assert_eq!(check.peer_mix, Some(dec("40")));
    }

    #[test]
    fn test_unrepresentable_gap_applies() {
        let roster = vec![
            employee("1", "700000000000000000000000000", "1"),
            employee("2", "-700000000000000000000000000", "1"),
        ];
        let assignment = TeamAssignment::default();
        let check = check_deviation(&roster[0], BaseTeam::A, &roster, &assignment, 1);

        assert_eq!(check.peer_mix, Some(dec("-70000000000000000000000000000")));
        assert!(check.applies());
        assert_eq!(check.bonus_per_liter, Some(dec("2.00")));
    }

    #[test]
    fn test_no_peers_never_applies() {
        let roster = vec![employee("1", "90", "100"), employee("2", "0", "100")];
        let assignment = TeamAssignment::default().with("2", TeamTag::B);
        let check = check_deviation(&roster[0], BaseTeam::A, &roster, &assignment, 1);

        assert!(!check.applies());
        assert_eq!(check.peer_mix, None);
    }

    #[test]
    fn test_peers_include_night_shift_and_skip_excluded() {
        let roster = vec![
            employee("1", "40", "100"),
            employee("2", "40", "100"),
            employee("3", "0", "1000"),
        ];
        let assignment = TeamAssignment::default()
            .with("2", TeamTag::ANight)
            .with("3", TeamTag::Oil);
        let check = check_deviation(&roster[0], BaseTeam::A, &roster, &assignment, 1);

        assert_eq!(check.peer_mix, Some(dec("40")));
        assert!(!check.applies());
    }

    #[test]
    fn test_peers_without_volume_count_as_zero_mix() {
        let roster = vec![employee("1", "50", "100"), employee("2", "0", "0")];
        let assignment = TeamAssignment::default();
        let check = check_deviation(&roster[0], BaseTeam::A, &roster, &assignment, 1);

        assert_eq!(check.peer_mix, Some(Decimal::ZERO));
        assert_eq!(check.bonus_per_liter, Some(dec("2.00")));
    }
}
