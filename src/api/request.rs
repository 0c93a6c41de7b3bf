//! Request types for the Mix Bonus Engine API.
//!
//! Every endpoint receives the raw report text; the calculation endpoints
//! may also override the configured team settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EmployeeSetting;
use crate::models::TeamAssignment;

/// Request body for the `/calculate` and `/summary` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The report text, already decoded.
    pub report: String,
    /// Team settings that take precedence over the configured ones.
    #[serde(default)]
    pub employee_settings: Option<BTreeMap<String, EmployeeSetting>>,
}

impl CalculationRequest {
    /// Applies the request's team settings on top of `configured`.
    pub fn assignment(&self, configured: TeamAssignment) -> TeamAssignment {
        let mut assignment = configured;
        if let Some(settings) = &self.employee_settings {
            assignment.merge(TeamAssignment::new(
                settings
                    .iter()
                    .map(|(id, setting)| (id.clone(), setting.team))
                    .collect(),
            ));
        }
        assignment
    }
}

/// Request body for the `/lookup` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRequest {
    /// The report text, already decoded.
    pub report: String,
    /// The employee code to look up.
    pub employee_id: String,
}
