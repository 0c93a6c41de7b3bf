//! Command-line entry point for the mix bonus engine.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use mix_bonus_engine::api::{AppState, create_router};
use mix_bonus_engine::calculation::{
    calculate_roster, calculate_simple_bonus, calculate_team_mix, find_employee,
};
use mix_bonus_engine::config::ConfigLoader;
use mix_bonus_engine::models::{BonusSource, EmployeeAggregate, RosterCalculation};
use mix_bonus_engine::report::{
    ensure_not_empty, format_locale_number, read_report, render_simple_bonus, write_summary,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Report file looked up in the last used directory when none is given.
const DEFAULT_REPORT_NAME: &str = "relatorio.txt";

/// Sales-mix bonus calculator for fuel station attendants
#[derive(Parser)]
#[command(name = "mix-bonus")]
#[command(version, about = "Computes team mix and attendant bonuses from the sales report")]
struct Cli {
    /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Compute every employee's bonus
    Calculate(CalculateArgs),
    /// Export the team mix summary
    Summary(SummaryArgs),
    /// Show the simple bonus view for one employee
    Lookup(LookupArgs),
    /// Serve the HTTP API
    Serve(ServeArgs),
}

/// Report selection shared by the report commands
#[derive(Args)]
struct ReportArgs {
    /// Report file; defaults to relatorio.txt in the last used directory
    #[arg(long, short)]
    report: Option<PathBuf>,
}

/// Arguments for calculate command
#[derive(Args)]
struct CalculateArgs {
    #[command(flatten)]
    report: ReportArgs,

    /// Print the full calculation, audit trail included, as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for summary command
#[derive(Args)]
struct SummaryArgs {
    #[command(flatten)]
    report: ReportArgs,

    /// Destination of the summary document
    #[arg(long, short, default_value = "mix_summary.txt")]
    output: PathBuf,
}

/// Arguments for lookup command
#[derive(Args)]
struct LookupArgs {
    /// Employee code as printed in the report
    employee_id: String,

    #[command(flatten)]
    report: ReportArgs,
}

/// Arguments for serve command
#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ConfigLoader::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Calculate(args) => {
            let employees = load_employees(&mut config, args.report.report.as_deref())?;
            let calculation = calculate_roster(&employees, &config.assignment());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&calculation)?);
            } else {
                print_calculation(&calculation);
            }
        }
        Commands::Summary(args) => {
            let employees = load_employees(&mut config, args.report.report.as_deref())?;
            let assignment = config.assignment();
            let team_mix = calculate_team_mix(&employees, &assignment);
            write_summary(&args.output, &employees, &assignment, &team_mix)?;
            println!("Summary written to {}", args.output.display());
        }
        Commands::Lookup(args) => {
            let employees = load_employees(&mut config, args.report.report.as_deref())?;
            let employee = find_employee(&employees, &args.employee_id)?;
            let view = calculate_simple_bonus(employee, config.bonus_rules());
            print!("{}", render_simple_bonus(&view));
        }
        Commands::Serve(args) => serve(config, args.addr).await?,
    }

    Ok(())
}

/// Resolves, reads and validates the report, remembering its directory.
fn load_employees(
    config: &mut ConfigLoader,
    explicit: Option<&Path>,
) -> anyhow::Result<Vec<EmployeeAggregate>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config
            .last_directory()
            .map(|dir| dir.join(DEFAULT_REPORT_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_NAME)),
    };

    let employees = read_report(&path)?;
    ensure_not_empty(&employees).with_context(|| format!("reading {}", path.display()))?;

    if explicit.is_some() {
        if let Some(directory) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            config.set_last_directory(directory);
            if let Err(err) = config.save() {
                tracing::warn!(error = %err, "Could not remember report directory");
            }
        }
    }

    Ok(employees)
}

fn print_calculation(calculation: &RosterCalculation) {
    let team_mix = &calculation.team_mix;
    println!("Mix Time A: {}%", format_locale_number(team_mix.mix_a, 2));
    println!("Mix Time B: {}%", format_locale_number(team_mix.mix_b, 2));
    match team_mix.winner {
        Some(winner) => println!("Winner: Time {}", winner),
        None => println!("Winner: none (tie)"),
    }
    println!();

    for result in &calculation.results {
        if result.bonus_source == BonusSource::Excluded {
            println!(
                "{} - {} | Time: {} | excluded",
                result.employee_id, result.employee_name, result.team
            );
            continue;
        }
        println!(
            "{} - {} | Time: {} | Mix: {}% | {} c/L ({}) | Base: R$ {} | Empenho: R$ {} | Total: R$ {}",
            result.employee_id,
            result.employee_name,
            result.team,
            format_locale_number(result.own_mix.unwrap_or_default(), 2),
            format_locale_number(result.bonus_per_liter, 3),
            match result.bonus_source {
                BonusSource::Deviation => "individual",
                _ => "team",
            },
            format_locale_number(result.base_bonus, 2),
            format_locale_number(result.effort_bonus, 2),
            format_locale_number(result.total_bonus, 2),
        );
    }

    println!();
    println!(
        "Total payout: R$ {}",
        format_locale_number(calculation.total_payout, 2)
    );
}

async fn serve(config: ConfigLoader, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(AppState::new(config));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
