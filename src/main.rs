//! Attrition CLI
//!
//! Headless client for the attrition analytics backend. Renders the same
//! view models as the browser dashboard, to the terminal.

use anyhow::bail;
use attrition::logging::init_logging;
use attrition::views::{ChartPoint, TrendSeries};
use attrition::{
    generate_default_config, Config, Dashboard, DashboardRender, EmployeeField, HttpApiClient,
    PredictionPanel, QueryClient, SubmitOutcome, TrendRender,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "attrition", version, about = "Employee attrition analytics from the terminal")]
struct Cli {
    /// Config file (defaults to the user config dir, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show department metrics and the attrition trend
    Dashboard {
        /// Department to summarize (first department if absent or unknown)
        #[arg(long)]
        department: Option<String>,
    },
    /// Run the attrition risk calculator for one employee
    Predict {
        #[arg(long)]
        years: String,
        #[arg(long)]
        income: String,
        #[arg(long, default_value = "Entry Level")]
        level: String,
    },
    /// Print a default configuration file
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Config => {
            print!("{}", generate_default_config());
        }
        Command::Dashboard { department } => {
            let dashboard = connect(cli.config.as_deref(), cli.api_url)?;
            dashboard.mount().await;
            if let Some(department) = department {
                dashboard.select_department(department);
            }

            let render = dashboard.render();
            print_dashboard(&render);
            if let Some(banner) = render.banner {
                bail!(banner);
            }
        }
        Command::Predict {
            years,
            income,
            level,
        } => {
            let dashboard = connect(cli.config.as_deref(), cli.api_url)?;
            dashboard.set_field(EmployeeField::YearsAtCompany, years);
            dashboard.set_field(EmployeeField::MonthlyIncome, income);
            dashboard.set_field(EmployeeField::JobLevel, level);

            match dashboard.submit().await {
                SubmitOutcome::Invalid(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!("  {}: {}", field, message);
                    }
                    bail!("Invalid input");
                }
                SubmitOutcome::Predicted(_) => print_prediction(&dashboard.prediction_panel()),
                SubmitOutcome::Failed(err) => bail!(err),
            }
        }
    }

    Ok(())
}

/// Load config, start logging and build a dashboard against the backend
fn connect(
    config_path: Option<&Path>,
    api_url: Option<String>,
) -> anyhow::Result<Dashboard<HttpApiClient>> {
    let mut config = match config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging)?;
    tracing::info!("Attrition Analytics v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Backend: {}", config.api.normalized_base_url());

    let api = Rc::new(HttpApiClient::new(&config.api));
    Ok(Dashboard::new(api, QueryClient::new()))
}

fn print_dashboard(render: &DashboardRender) {
    println!("Employee Attrition Analytics");
    println!("============================");

    if let Some(banner) = &render.banner {
        println!("! {}", banner);
        if render.banner_retryable {
            println!("  The service may be temporarily down; try again shortly.");
        }
    }

    match &render.summary {
        Some(summary) => {
            println!("Department: {}", summary.department);
            println!("  Attrition Rate:                       {}", summary.attrition_rate);
            println!("  Total Employees:                      {}", summary.employee_count);
            println!(
                "  Predicted Attrition (Next 3 Months):  {}",
                summary.predicted_attrition
            );
        }
        None => println!("No department metrics available"),
    }

    if !render.departments.is_empty() {
        println!("Departments: {}", render.departments.join(", "));
    }

    println!();
    println!("Attrition Trends");
    match &render.trend {
        TrendRender::Chart(series) => print_trend(series),
        TrendRender::Placeholder { .. } => println!("  (loading)"),
        TrendRender::Error(message) => println!("  ! {}", message),
    }
}

fn print_trend(series: &TrendSeries) {
    const WIDTH: f64 = 40.0;

    let Some((min, max)) = series.value_range() else {
        println!("  No trend data");
        return;
    };

    let label_width = series.points.iter().map(|p| p.label.len()).max().unwrap_or(0);
    for ChartPoint { label, value } in &series.points {
        let bar = ((value - min) / (max - min) * WIDTH).round() as usize;
        println!(
            "  {:<width$} {:>6.1} {}",
            label,
            value,
            "#".repeat(bar),
            width = label_width
        );
    }
}

fn print_prediction(panel: &PredictionPanel) {
    match panel {
        PredictionPanel::Ready(prediction) => {
            println!("Risk Level:  {}", prediction.risk_level);
            println!("Probability: {:.1}%", prediction.probability * 100.0);
            if !prediction.top_factors.is_empty() {
                println!("Top Factors:");
                for factor in &prediction.top_factors {
                    println!("  {:<24} {:+.3}", factor.factor, factor.impact);
                }
            }
        }
        PredictionPanel::Failed(message) => println!("! {}", message),
        PredictionPanel::Pending => println!("Calculating..."),
        PredictionPanel::Hidden => {}
    }
}
