//! Team mix aggregation and winner/loser determination.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::models::{BaseTeam, EmployeeAggregate, TeamAssignment, TeamMixResult, mix_percentage};

/// Computes the aggregate mix of a set of employees.
///
/// The mix is the summed premium volume over the summed total volume, not the
/// mean of individual mixes. Sums beyond the `Decimal` range give a mix of
/// zero.
pub fn group_mix<'a, I>(members: I) -> Decimal
where
    I: IntoIterator<Item = &'a EmployeeAggregate>,
{
    let sums = members
        .into_iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(premium, total), e| {
            Some((
                premium.checked_add(e.premium_volume())?,
                total.checked_add(e.total_volume)?,
            ))
        });

    match sums {
        Some((premium, total)) => mix_percentage(premium, total),
        None => {
            tracing::warn!("Group volume out of range, mix taken as zero");
            Decimal::ZERO
        }
    }
}

/// Returns the employees whose tag folds into `team`.
pub fn team_members<'a>(
    employees: &'a [EmployeeAggregate],
    assignment: &'a TeamAssignment,
    team: BaseTeam,
) -> impl Iterator<Item = &'a EmployeeAggregate> + 'a {
    employees
        .iter()
        .filter(move |e| assignment.team_of(&e.id).base_team() == Some(team))
}

/// Computes both team mixes and designates the winner and loser.
///
/// `OIL` and `INACTIVE` employees are left out. Equal mixes produce neither a
/// winner nor a loser.
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::calculation::calculate_team_mix;
/// use mix_bonus_engine::models::{BaseTeam, EmployeeAggregate, TeamAssignment, TeamTag};
/// use rust_decimal::Decimal;
///
/// let mut a = EmployeeAggregate::new("1", "ANA", 1);
/// a.premium_gasoline_volume = Decimal::from(40);
/// a.total_volume = Decimal::from(100);
/// let mut b = EmployeeAggregate::new("2", "BIA", 1);
/// b.premium_gasoline_volume = Decimal::from(30);
/// b.total_volume = Decimal::from(100);
///
/// let assignment = TeamAssignment::default().with("2", TeamTag::B);
/// let result = calculate_team_mix(&[a, b], &assignment);
/// assert_eq!(result.winner, Some(BaseTeam::A));
/// assert_eq!(result.loser, Some(BaseTeam::B));
/// ```
pub fn calculate_team_mix(
    employees: &[EmployeeAggregate],
    assignment: &TeamAssignment,
) -> TeamMixResult {
    let mix_a = group_mix(team_members(employees, assignment, BaseTeam::A));
    let mix_b = group_mix(team_members(employees, assignment, BaseTeam::B));

    let (winner, loser) = match mix_a.cmp(&mix_b) {
        Ordering::Greater => (Some(BaseTeam::A), Some(BaseTeam::B)),
        Ordering::Less => (Some(BaseTeam::B), Some(BaseTeam::A)),
        Ordering::Equal => (None, None),
    };

    tracing::debug!(%mix_a, %mix_b, ?winner, "Team mix computed");

    TeamMixResult {
        mix_a,
        mix_b,
        winner,
        loser,
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
    fn test_group_mix_is_volume_weighted() {
        let members = [employee("1", "10", "100"), employee("2", "90", "100")];
        assert_eq!(group_mix(&members), dec("50"));

        let skewed = [employee("1", "0", "300"), employee("2", "100", "100")];
        assert_eq!(group_mix(&skewed), dec("25"));
    }

    #[test]
    fn test_group_mix_overflowing_volume_is_zero() {
        let huge = "50000000000000000000000000000";
        let members = [employee("1", huge, huge), employee("2", huge, huge)];
        assert_eq!(group_mix(&members), Decimal::ZERO);

        let single = [employee("1", huge, huge)];
        assert_eq!(group_mix(&single), dec("100"));
    }

    #[test]
    fn test_group_mix_empty_is_zero() {
        let nobody: [EmployeeAggregate; 0] = [];
        assert_eq!(group_mix(&nobody), Decimal::ZERO);
    }

    #[test]
    fn test_a_wins_with_higher_mix() {
        let employees = vec![employee("1", "40", "100"), employee("2", "30", "100")];
        let assignment = TeamAssignment::default().with("2", TeamTag::B);

        let result = calculate_team_mix(&employees, &assignment);
        assert_eq!(result.mix_a, dec("40"));
        assert_eq!(result.mix_b, dec("30"));
        assert_eq!(result.winner, Some(BaseTeam::A));
        assert_eq!(result.loser, Some(BaseTeam::B));
    }

    #[test]
    fn test_night_tags_fold_into_base_team() {
        let employees = vec![
            employee("1", "10", "100"),
            employee("2", "90", "100"),
            employee("3", "40", "100"),
        ];
        let assignment = TeamAssignment::default()
            .with("2", TeamTag::ANight)
            .with("3", TeamTag::BNight);

        let result = calculate_team_mix(&employees, &assignment);
        assert_eq!(result.mix_a, dec("50"));
        assert_eq!(result.mix_b, dec("40"));
        assert_eq!(result.winner, Some(BaseTeam::A));
    }

    #[test]
    fn test_excluded_tags_do_not_count() {
        let employees = vec![
            employee("1", "40", "100"),
            employee("2", "0", "900"),
            employee("3", "100", "100"),
            employee("4", "45", "100"),
        ];
        let assignment = TeamAssignment::default()
            .with("2", TeamTag::Oil)
            .with("3", TeamTag::Inactive)
            .with("4", TeamTag::B);

        let result = calculate_team_mix(&employees, &assignment);
        assert_eq!(result.mix_a, dec("40"));
        assert_eq!(result.mix_b, dec("45"));
        assert_eq!(result.winner, Some(BaseTeam::B));
        assert_eq!(result.loser, Some(BaseTeam::A));
    }

    #[test]
    fn test_equal_mixes_have_no_winner() {
        let employees = vec![employee("1", "40", "100"), employee("2", "20", "50")];
        let assignment = TeamAssignment::default().with("2", TeamTag::B);

        let result = calculate_team_mix(&employees, &assignment);
        assert_eq!(result.winner, None);
        assert_eq!(result.loser, None);
    }

    #[test]
    fn test_empty_team_has_zero_mix() {
        let employees = vec![employee("1", "40", "100")];
        let result = calculate_team_mix(&employees, &TeamAssignment::default());
        assert_eq!(result.mix_b, Decimal::ZERO);
        assert_eq!(result.winner, Some(BaseTeam::A));
    }
}
