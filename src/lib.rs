//! Sales-mix bonus engine for fuel station attendants.
//!
//! This crate reads the per-attendant fuel sales report, computes each
//! team's premium mix and derives every attendant's bonus from the team,
//! deviation and effort rules.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
