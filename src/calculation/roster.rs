//! Whole-report calculation.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{BonusResult, EmployeeAggregate, RosterCalculation, TeamAssignment};

use super::bonus::calculate_employee_bonus;
use super::team_mix::calculate_team_mix;

/// Runs the team aggregation and every employee's bonus, in report order.
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::calculation::calculate_roster;
/// use mix_bonus_engine::models::{EmployeeAggregate, TeamAssignment};
/// use rust_decimal::Decimal;
///
/// let mut employee = EmployeeAggregate::new("1", "ANA", 1);
/// employee.premium_gasoline_volume = Decimal::from(40);
/// employee.total_volume = Decimal::from(100);
///
/// let calculation = calculate_roster(&[employee], &TeamAssignment::default());
/// assert_eq!(calculation.results.len(), 1);
/// assert_eq!(calculation.total_payout, Decimal::new(60, 2));
/// ```
pub fn calculate_roster(
    employees: &[EmployeeAggregate],
    assignment: &TeamAssignment,
) -> RosterCalculation {
    let start_time = Instant::now();
    let team_mix = calculate_team_mix(employees, assignment);

    let results: Vec<BonusResult> = employees
        .iter()
        .map(|employee| {
            let tag = assignment.team_of(&employee.id);
            calculate_employee_bonus(employee, tag, &team_mix, employees, assignment)
        })
        .collect();

    let total_payout = results
        .iter()
        .try_fold(Decimal::ZERO, |sum, r| sum.checked_add(r.total_bonus))
        .unwrap_or_else(|| {
            tracing::warn!("Total payout out of range, using zero");
            Decimal::ZERO
        });
    let duration_us = start_time.elapsed().as_micros() as u64;

    tracing::debug!(
        employees = results.len(),
        %total_payout,
        duration_us,
        "Roster calculation completed"
    );

    RosterCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        team_mix,
        results,
        total_payout,
        duration_us,
    }
}
