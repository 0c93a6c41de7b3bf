//! Single-employee bonus view driven by the configured bonus rules.

use rust_decimal::Decimal;

use crate::config::BonusRule;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeAggregate, SimpleBonusResult};

use super::tier_table::TierTable;

/// Highest bonus per liter the simple view pays, in currency units.
pub const SIMPLE_BONUS_CEILING: Decimal = Decimal::from_parts(225, 0, 0, false, 4);

/// Finds an employee by code. Surrounding whitespace in `code` is ignored.
pub fn find_employee<'a>(
    employees: &'a [EmployeeAggregate],
    code: &str,
) -> EngineResult<&'a EmployeeAggregate> {
    let code = code.trim();
    employees
        .iter()
        .find(|employee| employee.id == code)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            id: code.to_string(),
        })
}

/// Computes the simple bonus view for one employee.
///
/// The rate is the first `[min, max)` rule containing the employee's mix,
/// capped at [`SIMPLE_BONUS_CEILING`].
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::calculation::calculate_simple_bonus;
/// use mix_bonus_engine::config::AppConfig;
/// use mix_bonus_engine::models::EmployeeAggregate;
/// use rust_decimal::Decimal;
///
/// let mut employee = EmployeeAggregate::new("101", "JOAO", 2);
/// employee.premium_gasoline_volume = Decimal::from(40);
/// employee.common_gasoline_volume = Decimal::from(60);
/// employee.total_volume = Decimal::from(100);
///
/// let view = calculate_simple_bonus(&employee, &AppConfig::default().bonus_rules);
/// assert_eq!(view.bonus_per_liter, Decimal::new(2, 2));
/// assert_eq!(view.total_bonus, Decimal::new(80, 2));
/// ```
pub fn calculate_simple_bonus(
    employee: &EmployeeAggregate,
    rules: &[BonusRule],
) -> SimpleBonusResult {
    let mix = employee.mix();
    let rule_value = TierTable::from_rules(rules).lookup(mix);
    let bonus_per_liter = rule_value.min(SIMPLE_BONUS_CEILING);
    let total_bonus = employee
        .premium_volume()
        .checked_mul(bonus_per_liter)
        .unwrap_or_else(|| {
            tracing::warn!(employee_id = %employee.id, "Simple bonus out of range, using zero");
            Decimal::ZERO
        });

    tracing::debug!(
        employee_id = %employee.id,
        %mix,
        %rule_value,
        %bonus_per_liter,
        "Simple bonus computed"
    );

    SimpleBonusResult {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        common_gasoline_volume: employee.common_gasoline_volume,
        premium_gasoline_volume: employee.premium_gasoline_volume,
        premium_ethanol_volume: employee.premium_ethanol_volume,
        total_volume: employee.total_volume,
        mix,
        bonus_per_liter,
        total_bonus,
    }
}
