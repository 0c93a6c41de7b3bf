//! Sales report parsing.
//!
//! The report is a pipe-delimited pseudo-table. Each employee block starts
//! with a header line and is followed by product rows and a vendor total:
//!
//! ```text
//! | Funcionário: 101 - MARIA SILVA Vendas: 42 |
//! | 1 | GASOLINA COMUM | LT | 1.234,567 | 5,89 | 7.271,60 | |
//! | 2 | GASOLINA ADITIVADA V-POWER | LT | 321,000 | 6,19 | 1.986,99 | |
//! | Total do vendedor: ... |
//! ```
//!
//! Parsing is a fold over classified lines. The only state carried between
//! lines is the employee currently open, if any.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeAggregate, ProductLine};

use super::number::parse_locale_number;

const HEADER_LABEL: &str = "Funcionário:";
const SALES_LABEL: &str = "Vendas:";

/// Product rows carry 7 columns between 2 border pipes.
const MIN_PRODUCT_SEGMENTS: usize = 9;

/// Name markers, checked in this order; the first match wins.
pub const PREMIUM_ETHANOL_MARKER: &str = "ETANOL ADITIVADO SHELL V-POWER";
/// Marker for premium gasoline rows.
pub const PREMIUM_GASOLINE_MARKER: &str = "GASOLINA ADITIVADA V-POWER";
/// Marker for common gasoline rows.
pub const COMMON_GASOLINE_MARKER: &str = "GASOLINA COMUM";

/// The fuel categories tracked by the bonus engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelKind {
    /// Shell V-Power additive ethanol.
    PremiumEthanol,
    /// V-Power additive gasoline.
    PremiumGasoline,
    /// Regular gasoline.
    CommonGasoline,
}

/// Maps an upper-cased product name to a tracked fuel, if it is one.
///
/// Diesel and every other product return `None`.
pub fn classify_product(name: &str) -> Option<FuelKind> {
    let name = name.to_uppercase();
    if name.contains(PREMIUM_ETHANOL_MARKER) {
        Some(FuelKind::PremiumEthanol)
    } else if name.contains(PREMIUM_GASOLINE_MARKER) {
        Some(FuelKind::PremiumGasoline)
    } else if name.contains(COMMON_GASOLINE_MARKER) {
        Some(FuelKind::CommonGasoline)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EmployeeHeader {
    id: String,
    name: String,
    sales_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReportLine {
    Header(EmployeeHeader),
    Product(ProductLine),
    Ignored,
}

#[derive(Debug, Default)]
struct ParseState {
    open: Option<EmployeeAggregate>,
    finished: Vec<EmployeeAggregate>,
}

impl ParseState {
    fn step(mut self, line: ReportLine) -> Self {
        match line {
            ReportLine::Header(header) => {
                if let Some(done) = self.open.take() {
                    self.finished.push(done);
                }
                debug!(
                    employee_id = %header.id,
                    name = %header.name,
                    sales_count = header.sales_count,
                    "Employee header found"
                );
                self.open = Some(EmployeeAggregate::new(
                    header.id,
                    header.name,
                    header.sales_count,
                ));
            }
            ReportLine::Product(product) => match self.open.as_mut() {
                Some(employee) => apply_product(employee, product),
                None => debug!(code = %product.code, "Product row outside an employee block"),
            },
            ReportLine::Ignored => {}
        }
        self
    }

    fn finish(mut self) -> Vec<EmployeeAggregate> {
        if let Some(done) = self.open.take() {
            self.finished.push(done);
        }
        self.finished
    }
}

/// Parses report text into per-employee aggregates, in report order.
///
/// A report without employee headers yields an empty list, not an error.
///
/// # Examples
///
/// ```
/// use mix_bonus_engine::report::parse_report;
/// use rust_decimal::Decimal;
///
/// let text = "\
/// | Funcionário: 7 - ANA Vendas: 2 |
/// | 1 | GASOLINA COMUM | LT | 60,000 | 5,89 | 353,40 | |
/// | 2 | GASOLINA ADITIVADA V-POWER | LT | 40,000 | 6,19 | 247,60 | |
/// ";
/// let employees = parse_report(text);
/// assert_eq!(employees.len(), 1);
/// assert_eq!(employees[0].total_volume, Decimal::from(100));
/// assert_eq!(employees[0].mix(), Decimal::from(40));
/// ```
pub fn parse_report(text: &str) -> Vec<EmployeeAggregate> {
    let employees = text
        .lines()
        .map(str::trim)
        .map(classify_line)
        .fold(ParseState::default(), ParseState::step)
        .finish();

    debug!(employees = employees.len(), "Report parsed");
    employees
}

/// Decodes report bytes as UTF-8, falling back to Latin-1.
///
/// Latin-1 assigns a character to every byte, so decoding always succeeds.
pub fn decode_report_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(err) => {
            debug!(error = %err, "UTF-8 decoding failed, using Latin-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

/// Reads, decodes and parses a report file.
pub fn read_report<P: AsRef<Path>>(path: P) -> EngineResult<Vec<EmployeeAggregate>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|_| EngineError::ReportNotFound {
        path: path.display().to_string(),
    })?;

    let employees = parse_report(&decode_report_bytes(&bytes));
    info!(
        path = %path.display(),
        employees = employees.len(),
        "Report loaded"
    );
    Ok(employees)
}

/// Rejects a report that produced no employees.
pub fn ensure_not_empty(employees: &[EmployeeAggregate]) -> EngineResult<()> {
    if employees.is_empty() {
        return Err(EngineError::EmptyReport);
    }
    Ok(())
}

fn classify_line(line: &str) -> ReportLine {
    if let Some(header) = parse_employee_header(line) {
        return ReportLine::Header(header);
    }
    if let Some(product) = parse_product_row(line) {
        return ReportLine::Product(product);
    }
    ReportLine::Ignored
}

/// Matches `| Funcionário: <id> - <name> Vendas: <count> |`.
fn parse_employee_header(line: &str) -> Option<EmployeeHeader> {
    let rest = line.strip_prefix('|')?.trim_start();
    let rest = rest.strip_prefix(HEADER_LABEL)?.trim_start();
    let (id, rest) = split_leading_digits(rest)?;
    let rest = rest.trim_start().strip_prefix('-')?.trim_start();

    // The name ends at the first "Vendas:" that completes the pattern.
    rest.match_indices(SALES_LABEL).find_map(|(at, _)| {
        let name_part = &rest[..at];
        if name_part.contains('|') || !name_part.ends_with(char::is_whitespace) {
            return None;
        }
        let name = name_part.trim();
        if name.is_empty() {
            return None;
        }

        let (count, tail) = split_leading_digits(rest[at + SALES_LABEL.len()..].trim_start())?;
        if !tail.trim_start().starts_with('|') {
            return None;
        }

        Some(EmployeeHeader {
            id: id.to_string(),
            name: name.to_string(),
            sales_count: count.parse().ok()?,
        })
    })
}

/// Matches `| <digits> | ...` with enough segments and a parseable quantity.
fn parse_product_row(line: &str) -> Option<ProductLine> {
    let rest = line.strip_prefix('|')?.trim_start();
    let (_, rest) = split_leading_digits(rest)?;
    if !rest.trim_start().starts_with('|') {
        return None;
    }

    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() < MIN_PRODUCT_SEGMENTS {
        return None;
    }

    let code = segments[1].trim();
    let Some(quantity) = parse_locale_number(segments[4]) else {
        debug!(code, quantity = segments[4].trim(), "Dropping row with malformed quantity");
        return None;
    };
    let value = parse_locale_number(segments[6]).unwrap_or_else(|| {
        debug!(code, value = segments[6].trim(), "Malformed value, using zero");
        Decimal::ZERO
    });

    Some(ProductLine {
        code: code.to_string(),
        name: segments[2].trim().to_uppercase(),
        quantity,
        value,
    })
}

fn apply_product(employee: &mut EmployeeAggregate, product: ProductLine) {
    match classify_product(&product.name) {
        Some(kind) => {
            if accumulate(employee, kind, &product).is_none() {
                debug!(
                    employee_id = %employee.id,
                    code = %product.code,
                    quantity = %product.quantity,
                    "Dropping row that overflows the employee totals"
                );
                return;
            }
        }
        None => {
            debug!(
                employee_id = %employee.id,
                product = %product.name,
                "Untracked product excluded from totals"
            );
        }
    }
    employee.products.push(product);
}

/// Folds a tracked row into the employee's totals.
///
/// Leaves the employee untouched and returns `None` when any total, or the
/// premium volume, would leave the `Decimal` range.
fn accumulate(
    employee: &mut EmployeeAggregate,
    kind: FuelKind,
    product: &ProductLine,
) -> Option<()> {
    let total_volume = employee.total_volume.checked_add(product.quantity)?;
    let total_value = employee.total_value.checked_add(product.value)?;

    let mut common = employee.common_gasoline_volume;
    let mut gasoline = employee.premium_gasoline_volume;
    let mut ethanol = employee.premium_ethanol_volume;
    match kind {
        // Premium rows overwrite: a report carries one V-Power row per fuel.
        FuelKind::PremiumEthanol => ethanol = product.quantity,
        FuelKind::PremiumGasoline => gasoline = product.quantity,
        FuelKind::CommonGasoline => common = common.checked_add(product.quantity)?,
    }
    gasoline.checked_add(ethanol)?;

    employee.common_gasoline_volume = common;
    employee.premium_gasoline_volume = gasoline;
    employee.premium_ethanol_volume = ethanol;
    employee.total_volume = total_volume;
    employee.total_value = total_value;
    Some(())
}

fn split_leading_digits(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    (end > 0).then(|| text.split_at(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(code: &str, name: &str, quantity: &str, value: &str) -> String {
        format!("| {code} | {name} | LT | {quantity} | 5,89 | {value} | |")
    }

    #[test]
    fn test_parse_header_line() {
        let header = parse_employee_header("| Funcionário: 101 - MARIA DA SILVA Vendas: 42 |");
        assert_eq!(
            header,
            Some(EmployeeHeader {
                id: "101".to_string(),
                name: "MARIA DA SILVA".to_string(),
                sales_count: 42,
            })
        );
    }

    #[test]
    fn test_parse_header_tolerates_spacing() {
        let header =
            parse_employee_header("|Funcionário:7-JOSE   Vendas:3|").expect("header should match");
        assert_eq!(header.id, "7");
        assert_eq!(header.name, "JOSE");
        assert_eq!(header.sales_count, 3);
    }

    #[test]
    fn test_header_requires_sales_label() {
        assert_eq!(parse_employee_header("| Funcionário: 101 - MARIA |"), None);
        assert_eq!(parse_employee_header("| Funcionário: X - MARIA Vendas: 1 |"), None);
    }

    #[test]
    fn test_product_row_segments() {
        let product = parse_product_row(&row("12", "gasolina comum", "1.234,567", "7.271,60"))
            .expect("row should parse");
        assert_eq!(product.code, "12");
        assert_eq!(product.name, "GASOLINA COMUM");
        assert_eq!(product.quantity, dec("1234.567"));
        assert_eq!(product.value, dec("7271.60"));
    }

    #[test]
    fn test_product_row_with_bad_quantity_is_dropped() {
        assert_eq!(parse_product_row(&row("12", "GASOLINA COMUM", "n/d", "10,00")), None);
    }

    #[test]
    fn test_product_row_with_bad_value_defaults_to_zero() {
        let product = parse_product_row(&row("12", "GASOLINA COMUM", "10,000", ""))
            .expect("row should parse");
        assert_eq!(product.value, Decimal::ZERO);
    }

    #[test]
    fn test_product_row_needs_nine_segments() {
        assert_eq!(parse_product_row("| 12 | GASOLINA COMUM | LT | 10,000 |"), None);
    }

    #[test]
    fn test_classify_product_order() {
        assert_eq!(
            classify_product("ETANOL ADITIVADO SHELL V-POWER"),
            Some(FuelKind::PremiumEthanol)
        );
        assert_eq!(
            classify_product("GASOLINA ADITIVADA V-POWER RACING"),
            Some(FuelKind::PremiumGasoline)
        );
        assert_eq!(classify_product("gasolina comum"), Some(FuelKind::CommonGasoline));
        assert_eq!(classify_product("OLEO DIESEL S10"), None);
        assert_eq!(classify_product("ETANOL COMUM"), None);
    }

    #[test]
    fn test_parse_single_employee() {
        let text = [
            "| Funcionário: 101 - MARIA Vendas: 4 |".to_string(),
            row("1", "GASOLINA COMUM", "60,000", "353,40"),
            row("2", "GASOLINA ADITIVADA V-POWER", "30,000", "185,70"),
            row("3", "ETANOL ADITIVADO SHELL V-POWER", "10,000", "45,90"),
            "| Total do vendedor: 100,000 | 585,00 |".to_string(),
        ]
        .join("\n");

        let employees = parse_report(&text);
        assert_eq!(employees.len(), 1);
        let maria = &employees[0];
        assert_eq!(maria.common_gasoline_volume, dec("60"));
        assert_eq!(maria.premium_gasoline_volume, dec("30"));
        assert_eq!(maria.premium_ethanol_volume, dec("10"));
        assert_eq!(maria.total_volume, dec("100"));
        assert_eq!(maria.total_value, dec("585.00"));
        assert_eq!(maria.products.len(), 3);
    }

    #[test]
    fn test_common_gasoline_accumulates() {
        let text = [
            "| Funcionário: 1 - A Vendas: 2 |".to_string(),
            row("1", "GASOLINA COMUM", "10,000", "1,00"),
            row("1", "GASOLINA COMUM", "15,500", "1,00"),
        ]
        .join("\n");

        let employees = parse_report(&text);
        assert_eq!(employees[0].common_gasoline_volume, dec("25.5"));
        assert_eq!(employees[0].total_volume, dec("25.5"));
    }

    #[test]
    fn test_second_premium_row_overwrites() {
        let text = [
            "| Funcionário: 1 - A Vendas: 2 |".to_string(),
            row("2", "GASOLINA ADITIVADA V-POWER", "10,000", "1,00"),
            row("2", "GASOLINA ADITIVADA V-POWER", "4,000", "1,00"),
        ]
        .join("\n");

        let employees = parse_report(&text);
        assert_eq!(employees[0].premium_gasoline_volume, dec("4"));
        // Totals still see both rows.
        assert_eq!(employees[0].total_volume, dec("14"));
    }

    #[test]
    fn test_row_overflowing_totals_is_dropped() {
        let huge = "50.000.000.000.000.000.000.000.000.000";
        let text = [
            "| Funcionário: 1 - A Vendas: 3 |".to_string(),
            row("1", "GASOLINA COMUM", huge, "1,00"),
            row("1", "GASOLINA COMUM", huge, "1,00"),
            row("1", "GASOLINA COMUM", "10,000", "1,00"),
        ]
        .join("\n");

        let employees = parse_report(&text);
        let expected = dec("50000000000000000000000000010");
        assert_eq!(employees[0].common_gasoline_volume, expected);
        assert_eq!(employees[0].total_volume, expected);
        assert_eq!(employees[0].total_value, dec("2.00"));
        assert_eq!(employees[0].products.len(), 2);
    }

    #[test]
    fn test_row_overflowing_premium_volume_is_dropped() {
        let huge = "50.000.000.000.000.000.000.000.000.000";
        let text = [
            "| Funcionário: 1 - A Vendas: 3 |".to_string(),
            row("1", "GASOLINA COMUM", &format!("-{huge}"), "1,00"),
            row("2", "GASOLINA ADITIVADA V-POWER", huge, "1,00"),
            row("3", "ETANOL ADITIVADO SHELL V-POWER", huge, "1,00"),
        ]
        .join("\n");

        let employees = parse_report(&text);
        let employee = &employees[0];
        assert_eq!(employee.premium_gasoline_volume, dec("50000000000000000000000000000"));
        assert_eq!(employee.premium_ethanol_volume, Decimal::ZERO);
        assert_eq!(employee.total_volume, Decimal::ZERO);
        assert_eq!(employee.products.len(), 2);
        assert_eq!(employee.premium_volume(), employee.premium_gasoline_volume);
    }

    #[test]
    fn test_huge_premium_row_calculates_without_panicking() {
        let text = [
            "| Funcionário: 1 - A Vendas: 1 |".to_string(),
            row(
                "2",
                "GASOLINA ADITIVADA V-POWER",
                "1.000.000.000.000.000.000.000.000.000",
                "1,00",
            ),
        ]
        .join("\n");

        let employees = parse_report(&text);
        let calculation = crate::calculation::calculate_roster(
            &employees,
            &crate::models::TeamAssignment::default(),
        );
        assert_eq!(calculation.team_mix.mix_a, dec("100"));
        assert_eq!(calculation.results[0].base_bonus, dec("22500000000000000000000000"));
        assert_eq!(calculation.total_payout, calculation.results[0].total_bonus);
    }

    #[test]
    fn test_diesel_is_recorded_but_not_accumulated() {
        let text = [
            "| Funcionário: 1 - A Vendas: 2 |".to_string(),
            row("9", "OLEO DIESEL S10", "500,000", "2.900,00"),
            row("1", "GASOLINA COMUM", "10,000", "58,90"),
        ]
        .join("\n");

        let employees = parse_report(&text);
        assert_eq!(employees[0].total_volume, dec("10"));
        assert_eq!(employees[0].total_value, dec("58.90"));
        assert_eq!(employees[0].products.len(), 2);
    }

    #[test]
    fn test_rows_before_first_header_are_ignored() {
        let text = [
            row("1", "GASOLINA COMUM", "10,000", "58,90"),
            "| Funcionário: 1 - A Vendas: 1 |".to_string(),
        ]
        .join("\n");

        let employees = parse_report(&text);
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].total_volume, Decimal::ZERO);
        assert!(employees[0].products.is_empty());
    }

    #[test]
    fn test_multiple_employees_keep_report_order() {
        let text = [
            "| Funcionário: 20 - B Vendas: 1 |".to_string(),
            row("1", "GASOLINA COMUM", "1,000", "1,00"),
            "| Funcionário: 10 - A Vendas: 1 |".to_string(),
            row("1", "GASOLINA COMUM", "2,000", "1,00"),
        ]
        .join("\r\n");

        let employees = parse_report(&text);
        let ids: Vec<&str> = employees.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["20", "10"]);
        assert_eq!(employees[1].total_volume, dec("2"));
    }

    #[test]
    fn test_report_without_headers_is_empty() {
        assert!(parse_report("Relatorio de vendas\n\n| 1 | x |").is_empty());
        assert!(parse_report("").is_empty());
    }

    #[test]
    fn test_decode_utf8() {
        let text = decode_report_bytes("Funcionário".as_bytes());
        assert_eq!(text, "Funcionário");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // "Funcionário" in Latin-1: 'á' is the single byte 0xE1.
        let bytes = b"Funcion\xe1rio";
        assert_eq!(decode_report_bytes(bytes), "Funcionário");
    }

    #[test]
    fn test_latin1_report_parses() {
        let mut bytes = b"| Funcion\xe1rio: 5 - JO\xc3O Vendas: 1 |\n".to_vec();
        bytes.extend_from_slice(row("1", "GASOLINA COMUM", "3,000", "1,00").as_bytes());

        let employees = parse_report(&decode_report_bytes(&bytes));
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].name, "JOÃO");
        assert_eq!(employees[0].total_volume, dec("3"));
    }

    #[test]
    fn test_read_missing_report() {
        let result = read_report("/nonexistent/relatorio.txt");
        match result {
            Err(EngineError::ReportNotFound { path }) => {
                assert!(path.contains("relatorio.txt"));
            }
            _ => panic!("Expected ReportNotFound error"),
        }
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(matches!(ensure_not_empty(&[]), Err(EngineError::EmptyReport)));
        assert!(ensure_not_empty(&[EmployeeAggregate::new("1", "A", 0)]).is_ok());
    }
}
