//! Configuration types for the mix bonus engine.
//!
//! This module contains the strongly-typed configuration document that is
//! read from and written back to `config.json` (or a YAML equivalent).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{TeamAssignment, TeamTag};

/// One `[min, max)` rule of the simple bonus view.
///
/// `value` is the bonus per liter in currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRule {
    /// Inclusive lower mix bound.
    pub min: Decimal,
    /// Exclusive upper mix bound.
    pub max: Decimal,
    /// Bonus per liter for mixes in range.
    pub value: Decimal,
}

/// Per-employee settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSetting {
    /// The employee's team tag.
    #[serde(default)]
    pub team: TeamTag,
}

/// The configuration document.
///
/// # Example
///
/// ```
/// use mix_bonus_engine::config::AppConfig;
/// use mix_bonus_engine::models::TeamTag;
///
/// let config: AppConfig = serde_json::from_str(r#"{
///     "bonus_rules": [{"min": 0, "max": 50, "value": 0.01}],
///     "employee_settings": {"7": {"team": "B_NIGHT"}}
/// }"#).unwrap();
///
/// assert_eq!(config.bonus_rules.len(), 1);
/// assert_eq!(config.assignment().team_of("7"), TeamTag::BNight);
/// assert_eq!(config.assignment().team_of("8"), TeamTag::A);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rules for the simple bonus view, in lookup order.
    pub bonus_rules: Vec<BonusRule>,
    /// Directory the last report was opened from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_directory: Option<String>,
    /// Team settings keyed by employee code.
    #[serde(default)]
    pub employee_settings: BTreeMap<String, EmployeeSetting>,
}

impl AppConfig {
    /// Builds the team assignment from `employee_settings`.
    pub fn assignment(&self) -> TeamAssignment {
        TeamAssignment::new(
            self.employee_settings
                .iter()
                .map(|(id, setting)| (id.clone(), setting.team))
                .collect(),
        )
    }
}

impl Default for AppConfig {
    /// Fourteen rules in 5-point steps, from 0 to 100 percent. The first
    /// band spans 0 to 35 and pays nothing.
    fn default() -> Self {
        let mut bonus_rules = vec![BonusRule {
            min: Decimal::ZERO,
            max: Decimal::from(35),
            value: Decimal::ZERO,
        }];
        bonus_rules.extend((0..13i64).map(|step| BonusRule {
            min: Decimal::from(35 + step * 5),
            max: Decimal::from(40 + step * 5),
            value: Decimal::new(step + 1, 2),
        }));

        Self {
            bonus_rules,
            last_directory: None,
            employee_settings: BTreeMap::new(),
        }
    }
}
