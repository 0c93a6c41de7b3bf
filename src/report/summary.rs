//! Plain-text mix summary export.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeAggregate, SimpleBonusResult, TeamAssignment, TeamMixResult};

use super::number::format_locale_number;

/// Renders the summary document.
///
/// Two team-mix lines, a blank line, then one line per employee that takes
/// part in the team computation:
///
/// ```text
/// Mix Time A: 40,00%
/// Mix Time B: 30,00%
///
/// 101 - MARIA | Time: A | Mix: 40,00% | Total: 100,000 L
/// ```
pub fn render_summary(
    employees: &[EmployeeAggregate],
    assignment: &TeamAssignment,
    team_mix: &TeamMixResult,
) -> String {
    let mut lines = vec![
        format!("Mix Time A: {}%", format_locale_number(team_mix.mix_a, 2)),
        format!("Mix Time B: {}%", format_locale_number(team_mix.mix_b, 2)),
        String::new(),
    ];

    lines.extend(employees.iter().filter_map(|employee| {
        let tag = assignment.team_of(&employee.id);
        (!tag.is_excluded()).then(|| {
            format!(
                "{} - {} | Time: {} | Mix: {}% | Total: {} L",
                employee.id,
                employee.name,
                tag,
                format_locale_number(employee.mix(), 2),
                format_locale_number(employee.total_volume, 3),
            )
        })
    }));

    terminated(lines)
}

/// Renders the single-employee bonus view.
///
/// Volumes use 3 decimals, the mix 2, the rate per liter 4 and the bonus 2.
pub fn render_simple_bonus(view: &SimpleBonusResult) -> String {
    terminated(vec![
        format!("Funcionário: {} - {}", view.employee_id, view.employee_name),
        String::new(),
        format!(
            "Gasolina Comum: {} litros",
            format_locale_number(view.common_gasoline_volume, 3)
        ),
        format!(
            "Gasolina Aditivada V-Power: {} litros",
            format_locale_number(view.premium_gasoline_volume, 3)
        ),
        format!(
            "Etanol Aditivado Shell V-Power: {} litros",
            format_locale_number(view.premium_ethanol_volume, 3)
        ),
        format!("Total: {} litros", format_locale_number(view.total_volume, 3)),
        String::new(),
        format!("Mix de Vendas: {}%", format_locale_number(view.mix, 2)),
        format!(
            "Bonificação por litro: R$ {}",
            format_locale_number(view.bonus_per_liter, 4)
        ),
        format!(
            "Valor estimado da bonificação: R$ {}",
            format_locale_number(view.total_bonus, 2)
        ),
    ])
}

/// Joins `lines`, ending each one, the last included, with a newline.
fn terminated(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Renders the summary and writes it to `path`.
pub fn write_summary<P: AsRef<Path>>(
    path: P,
    employees: &[EmployeeAggregate],
    assignment: &TeamAssignment,
    team_mix: &TeamMixResult,
) -> EngineResult<()> {
    let path = path.as_ref();
    let document = render_summary(employees, assignment, team_mix);
    fs::write(path, document).map_err(|e| EngineError::SummaryWriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), "Summary written");
    Ok(())
}
