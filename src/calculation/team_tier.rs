//! Team tier lookup.
//!
//! Members of the winning team are paid from the winner column of the tier
//! table, members of the losing team from the loser column. A tie pays
//! nothing.

use rust_decimal::Decimal;

use crate::models::{AuditStep, TeamStanding};

use super::tier_table::{team_loser_table, team_winner_table};

/// The result of the team tier lookup, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct TeamTierResult {
    /// Bonus per liter in cents, before night scaling.
    pub bonus_per_liter: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up the team bonus per liter for a team mix and standing.
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::calculation::lookup_team_tier;
/// use mix_bonus_engine::models::TeamStanding;
/// use rust_decimal::Decimal;
///
/// let winner = lookup_team_tier(Decimal::from(40), TeamStanding::Winner, 1);
/// assert_eq!(winner.bonus_per_liter, Decimal::new(150, 2));
///
/// let loser = lookup_team_tier(Decimal::from(40), TeamStanding::Loser, 1);
/// assert_eq!(loser.bonus_per_liter, Decimal::new(100, 2));
/// ```
pub fn lookup_team_tier(
    team_mix: Decimal,
    standing: TeamStanding,
    step_number: u32,
) -> TeamTierResult {
    let (bonus_per_liter, column) = match standing {
        TeamStanding::Winner => (team_winner_table().lookup(team_mix), "winner"),
        TeamStanding::Loser => (team_loser_table().lookup(team_mix), "loser"),
        TeamStanding::Tied => (Decimal::ZERO, "none"),
    };

    let reasoning = match standing {
        TeamStanding::Tied => format!(
            "Team mix {}% tied with the other team - no team bonus",
            team_mix.round_dp(2).normalize()
        ),
        _ => format!(
            "Team mix {}% on the {} column = {} cents/L",
            team_mix.round_dp(2).normalize(),
            column,
            bonus_per_liter.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "team_tier".to_string(),
        rule_name: "Team Tier Lookup".to_string(),
        input: serde_json::json!({
            "team_mix": team_mix.normalize().to_string(),
            "standing": standing,
        }),
        output: serde_json::json!({
            "column": column,
            "bonus_per_liter": bonus_per_liter.normalize().to_string()
        }),
        reasoning,
    };

    TeamTierResult {
        bonus_per_liter,
        audit_step,
    }
}
