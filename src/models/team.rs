//! Team tags, team assignment and team mix results.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The team and shift an employee is assigned to.
///
/// Tags are written exactly as `A`, `B`, `A_NIGHT`, `B_NIGHT`, `OIL` and
/// `INACTIVE`. Any other string reads back as [`TeamTag::A`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeamTag {
    /// Team A, day shift.
    #[default]
    A,
    /// Team B, day shift.
    B,
    /// Team A, night shift.
    ANight,
    /// Team B, night shift.
    BNight,
    /// Lubricant sales; excluded from team computations.
    Oil,
    /// Not currently working; excluded from team computations.
    Inactive,
}

impl TeamTag {
    /// Returns the canonical string for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamTag::A => "A",
            TeamTag::B => "B",
            TeamTag::ANight => "A_NIGHT",
            TeamTag::BNight => "B_NIGHT",
            TeamTag::Oil => "OIL",
            TeamTag::Inactive => "INACTIVE",
        }
    }

    /// Parses a tag, falling back to `A` for anything unrecognized.
    pub fn parse_lenient(text: &str) -> Self {
        match text.trim().to_uppercase().as_str() {
            "A" => TeamTag::A,
            "B" => TeamTag::B,
            "A_NIGHT" => TeamTag::ANight,
            "B_NIGHT" => TeamTag::BNight,
            "OIL" => TeamTag::Oil,
            "INACTIVE" => TeamTag::Inactive,
            other => {
                tracing::debug!(tag = other, "Unknown team tag, defaulting to A");
                TeamTag::A
            }
        }
    }

    /// Returns the base team this tag folds into, or `None` for excluded tags.
    pub fn base_team(&self) -> Option<BaseTeam> {
        match self {
            TeamTag::A | TeamTag::ANight => Some(BaseTeam::A),
            TeamTag::B | TeamTag::BNight => Some(BaseTeam::B),
            TeamTag::Oil | TeamTag::Inactive => None,
        }
    }

    /// Returns true for the `_NIGHT` variants.
    pub fn is_night(&self) -> bool {
        self.as_str().ends_with("_NIGHT")
    }

    /// Returns true for tags excluded from every team computation.
    pub fn is_excluded(&self) -> bool {
        matches!(self, TeamTag::Oil | TeamTag::Inactive)
    }
}

impl From<String> for TeamTag {
    fn from(value: String) -> Self {
        TeamTag::parse_lenient(&value)
    }
}

impl From<TeamTag> for String {
    fn from(value: TeamTag) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TeamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two competing teams, with shift variants folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseTeam {
    /// Team A.
    A,
    /// Team B.
    B,
}

impl fmt::Display for BaseTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseTeam::A => f.write_str("A"),
            BaseTeam::B => f.write_str("B"),
        }
    }
}

/// Maps every employee id to a team tag, defaulting to `A`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamAssignment {
    tags: HashMap<String, TeamTag>,
}

impl TeamAssignment {
    /// Creates an assignment from explicit `id -> tag` pairs.
    pub fn new(tags: HashMap<String, TeamTag>) -> Self {
        Self { tags }
    }

    /// Returns the tag for an employee. Unassigned employees are on team `A`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mix_bonus_engine::models::{TeamAssignment, TeamTag};
    ///
    /// let assignment = TeamAssignment::default().with("7", TeamTag::BNight);
    /// assert_eq!(assignment.team_of("7"), TeamTag::BNight);
    /// assert_eq!(assignment.team_of("8"), TeamTag::A);
    /// ```
    pub fn team_of(&self, employee_id: &str) -> TeamTag {
        self.tags.get(employee_id).copied().unwrap_or_default()
    }

    /// Returns a copy of this assignment with one more employee assigned.
    pub fn with(mut self, employee_id: impl Into<String>, tag: TeamTag) -> Self {
        self.tags.insert(employee_id.into(), tag);
        self
    }

    /// Overrides entries with those from `other`.
    pub fn merge(&mut self, other: TeamAssignment) {
        self.tags.extend(other.tags);
    }
}

/// Where a team stands after the mix comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStanding {
    /// The team with the strictly higher mix.
    Winner,
    /// The team with the strictly lower mix.
    Loser,
    /// Both mixes are equal.
    Tied,
}

/// Team-level mix figures and the winner/loser designation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMixResult {
    /// Mix percentage of team A.
    pub mix_a: Decimal,
    /// Mix percentage of team B.
    pub mix_b: Decimal,
    /// The team with the higher mix, if any.
    pub winner: Option<BaseTeam>,
    /// The team with the lower mix, if any.
    pub loser: Option<BaseTeam>,
}

impl TeamMixResult {
    /// Returns the mix of the given team.
    pub fn mix_for(&self, team: BaseTeam) -> Decimal {
        match team {
            BaseTeam::A => self.mix_a,
            BaseTeam::B => self.mix_b,
        }
    }

    /// Returns the standing of the given team.
    pub fn standing(&self, team: BaseTeam) -> TeamStanding {
        if self.winner == Some(team) {
            TeamStanding::Winner
        } else if self.loser == Some(team) {
            TeamStanding::Loser
        } else {
            TeamStanding::Tied
        }
    }
}
