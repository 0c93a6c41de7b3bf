//! Employee aggregate model and related types.
//!
//! This module defines the per-employee fuel aggregate produced by the
//! report parser, together with the raw product rows it was built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product row of the sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    /// The product code column.
    pub code: String,
    /// The product name, upper-cased.
    pub name: String,
    /// The volume sold, in liters.
    pub quantity: Decimal,
    /// The value sold; zero when the column could not be parsed.
    pub value: Decimal,
}

/// Fuel sales accumulated for one employee of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAggregate {
    /// Employee code, unique within a report.
    pub id: String,
    /// Employee name as printed in the report header.
    pub name: String,
    /// Number of sales printed in the header. Informational only.
    pub sales_count: u64,
    /// Accumulated common gasoline volume.
    pub common_gasoline_volume: Decimal,
    /// Premium (V-Power) gasoline volume.
    pub premium_gasoline_volume: Decimal,
    /// Premium (V-Power) ethanol volume.
    pub premium_ethanol_volume: Decimal,
    /// Volume across all recognized products.
    pub total_volume: Decimal,
    /// Value across all recognized products.
    pub total_value: Decimal,
    /// Every accepted product row, recognized or not.
    #[serde(default)]
    pub products: Vec<ProductLine>,
}

impl EmployeeAggregate {
    /// Creates an employee with no sales accumulated yet.
    pub fn new(id: impl Into<String>, name: impl Into<String>, sales_count: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sales_count,
            common_gasoline_volume: Decimal::ZERO,
            premium_gasoline_volume: Decimal::ZERO,
            premium_ethanol_volume: Decimal::ZERO,
            total_volume: Decimal::ZERO,
            total_value: Decimal::ZERO,
            products: Vec::new(),
        }
    }

    /// Returns the premium gasoline plus premium ethanol volume.
    ///
    /// The parser keeps this sum representable; for hand-built aggregates an
    /// overflowing sum counts as zero.
    pub fn premium_volume(&self) -> Decimal {
        self.premium_gasoline_volume
            .checked_add(self.premium_ethanol_volume)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the employee's own mix as a percentage.
    ///
    /// # Examples
    ///
    /// ```
    /// use mix_bonus_engine::models::EmployeeAggregate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = EmployeeAggregate::new("101", "JOAO", 3);
    /// employee.premium_gasoline_volume = Decimal::from(40);
    /// employee.total_volume = Decimal::from(100);
    /// assert_eq!(employee.mix(), Decimal::from(40));
    /// ```
    pub fn mix(&self) -> Decimal {
        mix_percentage(self.premium_volume(), self.total_volume)
    }
}

/// Computes `premium / total * 100`.
///
/// Returns zero when `total` is zero or the result is not representable.
pub fn mix_percentage(premium: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    // Scaling first keeps terminating ratios exact; dividing first avoids
    // overflow for very large premium volumes.
    premium
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .or_else(|| {
            premium
                .checked_div(total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_employee_starts_empty() {
        let employee = EmployeeAggregate::new("101", "MARIA SILVA", 12);
        assert_eq!(employee.id, "101");
        assert_eq!(employee.sales_count, 12);
        assert_eq!(employee.total_volume, Decimal::ZERO);
        assert!(employee.products.is_empty());
    }

    #[test]
    fn test_premium_volume_sums_both_premium_fuels() {
        let mut employee = EmployeeAggregate::new("101", "MARIA SILVA", 1);
        employee.premium_gasoline_volume = dec("12.5");
        employee.premium_ethanol_volume = dec("7.25");
        assert_eq!(employee.premium_volume(), dec("19.75"));
    }

    #[test]
    fn test_mix_is_zero_without_volume() {
        let employee = EmployeeAggregate::new("101", "MARIA SILVA", 0);
        assert_eq!(employee.mix(), Decimal::ZERO);
    }

    #[test]
    fn test_mix_percentage() {
        assert_eq!(mix_percentage(dec("30"), dec("120")), dec("25"));
        assert_eq!(mix_percentage(dec("5"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_mix_percentage_of_huge_volumes() {
        let huge = dec("1000000000000000000000000000");
        assert_eq!(mix_percentage(huge, huge), dec("100"));
        assert_eq!(mix_percentage(huge, huge * dec("4")), dec("25"));
    }

    #[test]
    fn test_mix_percentage_unrepresentable_is_zero() {
        assert_eq!(mix_percentage(Decimal::MAX, dec("0.001")), Decimal::ZERO);
        assert_eq!(mix_percentage(Decimal::MIN, dec("0.5")), Decimal::ZERO);
    }

    #[test]
    fn test_premium_volume_overflow_counts_as_zero() {
        let mut employee = EmployeeAggregate::new("101", "MARIA SILVA", 1);
        employee.premium_gasoline_volume = Decimal::MAX;
        employee.premium_ethanol_volume = Decimal::MAX;
        employee.total_volume = Decimal::MAX;
        assert_eq!(employee.premium_volume(), Decimal::ZERO);
        assert_eq!(employee.mix(), Decimal::ZERO);
    }

    #[test]
    fn test_serialize_employee_uses_string_decimals() {
        let mut employee = EmployeeAggregate::new("101", "MARIA SILVA", 1);
        employee.total_volume = dec("10.5");
        let json = serde_json::to_string(&employee).unwrap();
        assert!(json.contains("\"total_volume\":\"10.5\""));

        let deserialized: EmployeeAggregate = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }
}
