//! Report input and output.
//!
//! This module reads the fixed-layout sales report into per-employee
//! aggregates and renders the plain-text mix summary.
//!
//! # Example
//!
//! ```no_run
//! use mix_bonus_engine::report::{ensure_not_empty, read_report};
//!
//! let employees = read_report("./relatorio.txt")?;
//! ensure_not_empty(&employees)?;
//! println!("Loaded {} employees", employees.len());
//! # Ok::<(), mix_bonus_engine::error::EngineError>(())
//! ```

mod number;
mod parser;
mod summary;

pub use number::{format_locale_number, parse_locale_number};
pub use parser::{
    COMMON_GASOLINE_MARKER, FuelKind, PREMIUM_ETHANOL_MARKER, PREMIUM_GASOLINE_MARKER,
    classify_product, decode_report_bytes, ensure_not_empty, parse_report, read_report,
};
pub use summary::{render_simple_bonus, render_summary, write_summary};
