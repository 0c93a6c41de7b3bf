//! Core data models for the Mix Bonus Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod team;

pub use calculation_result::{
    AuditStep, BonusResult, BonusSource, RosterCalculation, SimpleBonusResult,
};
pub use employee::{EmployeeAggregate, ProductLine, mix_percentage};
pub use team::{BaseTeam, TeamAssignment, TeamMixResult, TeamStanding, TeamTag};
