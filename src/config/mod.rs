//! Configuration loading and management for the Mix Bonus Engine.
//!
//! The configuration holds the simple bonus rules, the last report
//! directory and each employee's team tag.
//!
//! # Example
//!
//! ```no_run
//! use mix_bonus_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/config.json").unwrap();
//! println!("Team of employee 101: {}", config.assignment().team_of("101"));
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, BonusRule, EmployeeSetting};
