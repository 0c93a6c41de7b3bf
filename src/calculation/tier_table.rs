//! Ordered range tables over mix percentage.
//!
//! Every bonus lookup in the engine is a [`TierTable`]: a list of half-open
//! `[min, max)` ranges, the last of which may be unbounded. Values outside
//! every range are zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BonusRule;

/// One `[min, max)` range of a tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Inclusive lower bound.
    pub min: Decimal,
    /// Exclusive upper bound; `None` means unbounded.
    pub max: Option<Decimal>,
    /// The value for mixes inside this range.
    pub value: Decimal,
}

impl Tier {
    /// Returns true if `mix` falls inside this range.
    pub fn contains(&self, mix: Decimal) -> bool {
        mix >= self.min && self.max.is_none_or(|max| mix < max)
    }
}

/// An ordered set of tiers; the first containing tier wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Creates a table from tiers in lookup order.
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    /// Builds a table from the configured simple bonus rules.
    pub fn from_rules(rules: &[BonusRule]) -> Self {
        Self::new(
            rules
                .iter()
                .map(|rule| Tier {
                    min: rule.min,
                    max: Some(rule.max),
                    value: rule.value,
                })
                .collect(),
        )
    }

    /// Returns the value of the first tier containing `mix`, or zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use mix_bonus_engine::calculation::team_winner_table;
    /// use rust_decimal::Decimal;
    ///
    /// let table = team_winner_table();
    /// assert_eq!(table.lookup(Decimal::from(42)), Decimal::new(150, 2));
    /// assert_eq!(table.lookup(Decimal::from(30)), Decimal::ZERO);
    /// ```
    pub fn lookup(&self, mix: Decimal) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| tier.contains(mix))
            .map(|tier| tier.value)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the tiers in lookup order.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}

/// Lower bounds shared by the team and deviation tables: 35, 37.5, 40, 45,
/// 47.5 and 50 percent. The 35 band pays nothing, so its inclusive bound is
/// indistinguishable from the open bound at 35.
fn breakpoints() -> [Decimal; 6] {
    [
        Decimal::new(35, 0),
        Decimal::new(375, 1),
        Decimal::new(40, 0),
        Decimal::new(45, 0),
        Decimal::new(475, 1),
        Decimal::new(50, 0),
    ]
}

/// Builds a table over [`breakpoints`] from values in cents.
fn table_over_breakpoints(cents: [i64; 6]) -> TierTable {
    let mins = breakpoints();
    let tiers = mins
        .iter()
        .enumerate()
        .map(|(i, &min)| Tier {
            min,
            max: mins.get(i + 1).copied(),
            value: Decimal::new(cents[i], 2),
        })
        .collect();
    TierTable::new(tiers)
}

/// Cents per liter for members of the winning team.
pub fn team_winner_table() -> TierTable {
    table_over_breakpoints([0, 125, 150, 175, 200, 225])
}

/// Cents per liter for members of the losing team.
pub fn team_loser_table() -> TierTable {
    table_over_breakpoints([0, 75, 100, 150, 175, 200])
}

/// Cents per liter when an employee's own mix deviates from their peers'.
pub fn deviation_table() -> TierTable {
    table_over_breakpoints([0, 75, 100, 150, 175, 200])
}
