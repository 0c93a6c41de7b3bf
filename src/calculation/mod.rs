//! Calculation logic for the Mix Bonus Engine.
//!
//! This module contains the rules that turn parsed employee aggregates into
//! bonuses: team mix aggregation, the tier tables, the individual-deviation
//! override, night-shift scaling and the effort bonus. Each rule records an
//! [`AuditStep`](crate::models::AuditStep) describing its decision.

mod bonus;
mod deviation;
mod effort;
mod night_shift;
mod roster;
mod simple_bonus;
mod team_mix;
mod team_tier;
mod tier_table;

pub use bonus::calculate_employee_bonus;
pub use deviation::{DEVIATION_THRESHOLD, DeviationCheck, check_deviation};
pub use effort::{EffortBonusResult, calculate_effort_bonus};
pub use night_shift::{NightShiftResult, apply_night_shift, night_shift_factor};
pub use roster::calculate_roster;
pub use simple_bonus::{SIMPLE_BONUS_CEILING, calculate_simple_bonus, find_employee};
pub use team_mix::{calculate_team_mix, group_mix, team_members};
pub use team_tier::{TeamTierResult, lookup_team_tier};
pub use tier_table::{Tier, TierTable, deviation_table, team_loser_table, team_winner_table};
