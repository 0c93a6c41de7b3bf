//! Effort ("empenho") bonus.
//!
//! Day-shift employees who sell more total volume than the average of the
//! other employees on exactly the same tag earn a supplement proportional to
//! how far above that average they are.
//!
//! The peer set here is the exact tag (`A` or `B`), while the deviation check
//! compares against the whole base team including night shift. The two peer
//! sets are deliberately kept distinct.

use rust_decimal::Decimal;

use crate::models::{AuditStep, EmployeeAggregate, TeamAssignment, TeamTag};

/// The result of the effort bonus calculation.
#[derive(Debug, Clone)]
pub struct EffortBonusResult {
    /// The effort bonus in currency units.
    pub amount: Decimal,
    /// Mean total volume of same-tag peers, when there are any.
    pub peer_average_volume: Option<Decimal>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the effort bonus on top of `base_bonus`.
///
/// Only `A` and `B` tags qualify, and only with at least one other employee
/// on the same tag. When the employee's total volume exceeds the positive
/// peer average, the bonus is `(own - avg) / avg * base_bonus`.
pub fn calculate_effort_bonus(
    employee: &EmployeeAggregate,
    tag: TeamTag,
    base_bonus: Decimal,
    roster: &[EmployeeAggregate],
    assignment: &TeamAssignment,
    step_number: u32,
) -> EffortBonusResult {
    if !matches!(tag, TeamTag::A | TeamTag::B) {
        return no_effort(
            employee,
            tag,
            None,
            step_number,
            format!("Team {} does not qualify for the effort bonus", tag),
        );
    }

    let peer_volumes: Vec<Decimal> = roster
        .iter()
        .filter(|peer| peer.id != employee.id && assignment.team_of(&peer.id) == tag)
        .map(|peer| peer.total_volume)
        .collect();

    if peer_volumes.is_empty() {
        return no_effort(
            employee,
            tag,
            None,
            step_number,
            format!("No other employees on team {} to compare with", tag),
        );
    }

    let Some(peer_total) = peer_volumes
        .iter()
        .try_fold(Decimal::ZERO, |sum, volume| sum.checked_add(*volume))
    else {
        return no_effort(
            employee,
            tag,
            None,
            step_number,
            format!("Peer volumes on team {} are out of range", tag),
        );
    };
    let average = peer_total / Decimal::from(peer_volumes.len());
    let own = employee.total_volume;

    if average <= Decimal::ZERO || own <= average {
        return no_effort(
            employee,
            tag,
            Some(average),
            step_number,
            format!(
                "Volume {} L does not exceed peer average {} L",
                own.normalize(),
                average.round_dp(3).normalize()
            ),
        );
    }

    let effort = own
        .checked_sub(average)
        .and_then(|diff| diff.checked_div(average))
        .and_then(|ratio| ratio.checked_mul(base_bonus).map(|amount| (ratio, amount)));
    let Some((diff_ratio, amount)) = effort else {
        return no_effort(
            employee,
            tag,
            Some(average),
            step_number,
            format!(
                "Volume {} L over peer average {} L is out of range",
                own.normalize(),
                average.round_dp(3).normalize()
            ),
        );
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "effort_bonus".to_string(),
        rule_name: "Effort Bonus".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "team": tag,
            "own_volume": own.normalize().to_string(),
            "peer_average_volume": average.normalize().to_string(),
            "peer_count": peer_volumes.len(),
            "base_bonus": base_bonus.normalize().to_string()
        }),
        output: serde_json::json!({
            "eligible": true,
            "diff_ratio": diff_ratio.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "({} - {}) / {} = {} x ${} = ${}",
            own.normalize(),
            average.round_dp(3).normalize(),
            average.round_dp(3).normalize(),
            diff_ratio.round_dp(4).normalize(),
            base_bonus.round_dp(2).normalize(),
            amount.round_dp(2).normalize()
        ),
    };

    EffortBonusResult {
        amount,
        peer_average_volume: Some(average),
        audit_step,
    }
}

fn no_effort(
    employee: &EmployeeAggregate,
    tag: TeamTag,
    peer_average_volume: Option<Decimal>,
    step_number: u32,
    reasoning: String,
) -> EffortBonusResult {
    let audit_step = AuditStep {
        step_number,
        rule_id: "effort_bonus".to_string(),
        rule_name: "Effort Bonus".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "team": tag,
            "own_volume": employee.total_volume.normalize().to_string()
        }),
        output: serde_json::json!({
            "eligible": false,
            "amount": "0"
        }),
        reasoning,
    };

    EffortBonusResult {
        amount: Decimal::ZERO,
        peer_average_volume,
        audit_step,
    }
}
