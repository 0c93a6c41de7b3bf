//! Per-employee bonus calculation.
//!
//! Chains the individual rules in order: team tier, deviation override,
//! night scaling, base bonus and effort bonus. Every rule contributes an
//! audit step to the result.

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, BonusResult, BonusSource, EmployeeAggregate, TeamAssignment, TeamMixResult, TeamTag,
};

use super::deviation::check_deviation;
use super::effort::calculate_effort_bonus;
use super::night_shift::apply_night_shift;
use super::team_tier::lookup_team_tier;

/// Calculates the bonus for one employee under `tag`.
///
/// `OIL` and `INACTIVE` employees get a status-only result with every bonus
/// field zero and no mixes.
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::calculation::{calculate_employee_bonus, calculate_team_mix};
/// use mix_bonus_engine::models::{EmployeeAggregate, TeamAssignment, TeamTag};
/// use rust_decimal::Decimal;
///
/// let mut a = EmployeeAggregate::new("1", "ANA", 1);
/// a.premium_gasoline_volume = Decimal::from(40);
/// a.total_volume = Decimal::from(100);
/// let mut b = EmployeeAggregate::new("2", "BIA", 1);
/// b.premium_gasoline_volume = Decimal::from(30);
/// b.total_volume = Decimal::from(100);
///
/// let roster = vec![a, b];
/// let assignment = TeamAssignment::default().with("2", TeamTag::B);
/// let team_mix = calculate_team_mix(&roster, &assignment);
///
/// let result = calculate_employee_bonus(&roster[0], TeamTag::A, &team_mix, &roster, &assignment);
/// assert_eq!(result.bonus_per_liter, Decimal::new(150, 2));
/// assert_eq!(result.base_bonus, Decimal::new(60, 2));
/// ```
pub fn calculate_employee_bonus(
    employee: &EmployeeAggregate,
    tag: TeamTag,
    team_mix: &TeamMixResult,
    roster: &[EmployeeAggregate],
    assignment: &TeamAssignment,
) -> BonusResult {
    let Some(base_team) = tag.base_team() else {
        return excluded_result(employee, tag);
    };

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let own_mix = employee.mix();
    let base_team_mix = team_mix.mix_for(base_team);
    let standing = team_mix.standing(base_team);

    let team_tier = lookup_team_tier(base_team_mix, standing, step_number);
    audit_steps.push(team_tier.audit_step);
    step_number += 1;

    let deviation = check_deviation(employee, base_team, roster, assignment, step_number);
    audit_steps.push(deviation.audit_step.clone());
    step_number += 1;

    let (unscaled_rate, bonus_source) = match deviation.bonus_per_liter {
        Some(rate) => (rate, BonusSource::Deviation),
        None => (team_tier.bonus_per_liter, BonusSource::Team),
    };

    let night = apply_night_shift(unscaled_rate, tag, step_number);
    let bonus_per_liter = night.bonus_per_liter;
    audit_steps.push(night.audit_step);
    step_number += 1;

    let premium_volume = employee.premium_volume();
    let base_bonus = premium_volume
        .checked_mul(bonus_per_liter / Decimal::ONE_HUNDRED)
        .unwrap_or_else(|| {
            tracing::warn!(
                employee_id = %employee.id,
                %premium_volume,
                "Base bonus out of range, using zero"
            );
            Decimal::ZERO
        });
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "base_bonus".to_string(),
        rule_name: "Base Bonus".to_string(),
        input: serde_json::json!({
            "premium_volume": premium_volume.normalize().to_string(),
            "bonus_per_liter": bonus_per_liter.normalize().to_string(),
            "source": bonus_source
        }),
        output: serde_json::json!({
            "base_bonus": base_bonus.normalize().to_string()
        }),
        reasoning: format!(
            "{} L x {} cents/L = ${}",
            premium_volume.normalize(),
            bonus_per_liter.normalize(),
            base_bonus.round_dp(2).normalize()
        ),
    });
    step_number += 1;

    let effort = calculate_effort_bonus(employee, tag, base_bonus, roster, assignment, step_number);
    let mut effort_bonus = effort.amount;
    audit_steps.push(effort.audit_step);

    let total_bonus = match base_bonus.checked_add(effort_bonus) {
        Some(total) => total,
        None => {
            tracing::warn!(
                employee_id = %employee.id,
                %effort_bonus,
                "Total bonus out of range, dropping the effort bonus"
            );
            effort_bonus = Decimal::ZERO;
            base_bonus
        }
    };

    tracing::debug!(
        employee_id = %employee.id,
        team = %tag,
        %own_mix,
        %bonus_per_liter,
        %total_bonus,
        "Employee bonus computed"
    );

    BonusResult {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        team: tag,
        own_mix: Some(own_mix),
        team_mix: Some(base_team_mix),
        standing: Some(standing),
        bonus_source,
        bonus_per_liter,
        base_bonus,
        effort_bonus,
        total_bonus,
        audit_steps,
    }
}

fn excluded_result(employee: &EmployeeAggregate, tag: TeamTag) -> BonusResult {
    let audit_step = AuditStep {
        step_number: 1,
        rule_id: "team_exclusion".to_string(),
        rule_name: "Team Exclusion".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "team": tag
        }),
        output: serde_json::json!({ "excluded": true }),
        reasoning: format!("Team {} takes no part in the mix bonus", tag),
    };

    BonusResult {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        team: tag,
        own_mix: None,
        team_mix: None,
        standing: None,
        bonus_source: BonusSource::Excluded,
        bonus_per_liter: Decimal::ZERO,
        base_bonus: Decimal::ZERO,
        effort_bonus: Decimal::ZERO,
        total_bonus: Decimal::ZERO,
        audit_steps: vec![audit_step],
    }
}
