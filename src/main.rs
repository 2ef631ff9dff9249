use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, warn};

use vitalrs::config::AppConfig;
use vitalrs::error::ErrorSeverity;
use vitalrs::import::import_sessions;
use vitalrs::jump_test::JumpTestAnalyzer;
use vitalrs::logging::init_logging;
use vitalrs::models::{MentalMetrics, PhysicalMetrics};
use vitalrs::pmc::PmcCalculator;
use vitalrs::risk::{DisplayColor, PainSeverity, ReadinessLevel, ScoreScale};
use vitalrs::sleep::{sleep_efficiency, SleepDurationBand};
use vitalrs::stats::{trend, SeriesStats};
use vitalrs::summary::{DailySummary, SummaryStatus};
use vitalrs::workload::{WorkloadAssessment, WorkloadCalculator, WorkloadSeries};
use vitalrs::{SleepTimes, VitalRsError};

/// VitalRS - Training load and wellbeing analytics
///
/// Computes session-RPE workload ratios, training stress balance, sleep
/// metrics and clinical risk flags from logged data.
#[derive(Parser)]
#[command(name = "vitalrs")]
#[command(version)]
#[command(about = "Training load and wellbeing analytics", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acute:chronic workload ratio and training stress balance
    Workload {
        /// Session file (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Show the value at every session instead of the latest only
        #[arg(short, long)]
        series: bool,
    },

    /// Exponentially weighted fitness and fatigue by calendar day
    Pmc {
        /// Session file (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Start date (YYYY-MM-DD, default: first session)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD, default: today)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Sleep duration and efficiency for one night
    Sleep {
        /// Bedtime (HH:MM)
        #[arg(short, long)]
        bedtime: String,

        /// Wake time (HH:MM)
        #[arg(short, long)]
        wake: String,

        /// Hours spent in bed, for efficiency
        #[arg(long)]
        in_bed: Option<Decimal>,
    },

    /// Clinical risk flags for today's readings
    Risk {
        /// Suicide risk (0-10)
        #[arg(long)]
        suicide: Option<Decimal>,

        /// App stress score (0-100)
        #[arg(long)]
        stress_app: Option<Decimal>,

        /// Energy level (0-10)
        #[arg(long)]
        energy: Option<Decimal>,

        /// Pain intensity (0-10)
        #[arg(long)]
        pain: Option<Decimal>,

        /// Readiness to train (0-10)
        #[arg(long)]
        readiness: Option<Decimal>,
    },

    /// Counter-movement jump readiness test
    Jump {
        /// Today's jump height in cm
        #[arg(long)]
        height: Decimal,

        /// Baseline jump height in cm
        #[arg(long, default_value = "40")]
        baseline: Decimal,

        /// Body mass in kg, for a peak power estimate
        #[arg(long)]
        body_mass: Option<Decimal>,
    },

    /// Descriptive statistics and trend for a series of values
    Stats {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<Decimal>,
    },

    /// Write the current configuration to the config file
    InitConfig,
}

#[derive(Tabled)]
struct WorkloadRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Load")]
    load: String,
    #[tabled(rename = "ATL")]
    atl: String,
    #[tabled(rename = "CTL")]
    ctl: String,
    #[tabled(rename = "ACWR")]
    acwr: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "TSB")]
    tsb: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct PmcRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Load")]
    load: String,
    #[tabled(rename = "ATL")]
    atl: String,
    #[tabled(rename = "CTL")]
    ctl: String,
    #[tabled(rename = "TSB")]
    tsb: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        report_error(&err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, config_problem) = AppConfig::load_or_default(cli.config.as_deref());
    init_logging(&config.logging.clone().with_verbosity(cli.verbose))
        .context("Failed to initialise logging")?;

    if let Some(err) = config_problem {
        warn!(error = %format!("{:#}", err), "Ignoring unusable config file, using defaults");
    }

    match cli.command {
        Commands::Workload { file, series } => {
            let sessions = import_sessions(&file)?;
            let calculator = WorkloadCalculator::with_config(config.workload.clone());

            if series {
                match calculator.series(&sessions) {
                    WorkloadSeries::Available { points } => {
                        let rows: Vec<WorkloadRow> = points
                            .iter()
                            .map(|p| WorkloadRow {
                                date: p.date.to_string(),
                                load: p.load.round_dp(0).to_string(),
                                atl: p.metrics.atl.round_dp(1).to_string(),
                                ctl: p.metrics.ctl.round_dp(1).to_string(),
                                acwr: p.metrics.acwr.round_dp(2).to_string(),
                                zone: p.metrics.acwr_zone.to_string(),
                                tsb: p.metrics.tsb.round_dp(1).to_string(),
                                status: p.metrics.tsb_status.to_string(),
                            })
                            .collect();
                        println!("{}", Table::new(rows).with(Style::rounded()));
                    }
                    WorkloadSeries::InsufficientData {
                        available,
                        required,
                    } => print_insufficient(available, required),
                }
            } else {
                match calculator.assess_sessions(&sessions) {
                    WorkloadAssessment::Available(metrics) => {
                        println!("{}", "Workload".bold());
                        println!("  ATL:  {}", metrics.atl.round_dp(1));
                        println!("  CTL:  {}", metrics.ctl.round_dp(1));
                        println!(
                            "  ACWR: {} ({})",
                            metrics.acwr.round_dp(2),
                            paint(metrics.acwr_zone.label(), metrics.acwr_zone.color())
                        );
                        println!(
                            "  TSB:  {} ({})",
                            metrics.tsb.round_dp(1),
                            paint(metrics.tsb_status.label(), metrics.tsb_status.color())
                        );
                        println!();
                        println!("{}", metrics.acwr_zone.recommendation());
                    }
                    WorkloadAssessment::InsufficientData {
                        available,
                        required,
                    } => print_insufficient(available, required),
                }
            }
        }

        Commands::Pmc { file, from, to } => {
            let sessions = import_sessions(&file)?;
            let calculator = PmcCalculator::with_config(config.pmc.clone());
            let daily = calculator.aggregate_daily_load(&sessions);

            let end = to.unwrap_or_else(|| Utc::now().date_naive());
            let start = from
                .or_else(|| daily.keys().next().copied())
                .unwrap_or(end);

            let rows: Vec<PmcRow> = calculator
                .calculate_series(&daily, start, end)?
                .iter()
                .map(|p| PmcRow {
                    date: p.date.to_string(),
                    load: p.daily_load.round_dp(0).to_string(),
                    atl: p.atl.round_dp(1).to_string(),
                    ctl: p.ctl.round_dp(1).to_string(),
                    tsb: p.tsb.round_dp(1).to_string(),
                    status: p.tsb_status.to_string(),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }

        Commands::Sleep {
            bedtime,
            wake,
            in_bed,
        } => {
            let times = SleepTimes::parse(&bedtime, &wake)?;
            let hours = times.duration();
            let band = SleepDurationBand::from_hours(hours);

            println!(
                "Slept {} h ({})",
                hours.round_dp(2),
                paint(band.label(), band.color())
            );
            if let Some(in_bed) = in_bed {
                println!("Efficiency: {}%", sleep_efficiency(hours, in_bed).round_dp(1));
            }
        }

        Commands::Risk {
            suicide,
            stress_app,
            energy,
            pain,
            readiness,
        } => {
            let mental = MentalMetrics {
                suicide_risk: suicide,
                stress_score_app: stress_app,
                energy_level: energy,
                ..MentalMetrics::default()
            };
            let physical = PhysicalMetrics {
                readiness_to_train: readiness,
                ..PhysicalMetrics::default()
            };

            let mania = config.risk.mania(
                stress_app.unwrap_or(Decimal::ZERO),
                ScoreScale::ZeroToHundred,
                energy.unwrap_or(Decimal::ZERO),
            );
            println!("Mania risk:    {}", flag(mania));
            if let Some(score) = suicide {
                println!("Suicide alert: {}", flag(config.risk.suicide_alert(score)));
            }
            if let Some(intensity) = pain {
                let severity = PainSeverity::from_intensity(intensity);
                println!("Pain:          {}", paint(severity.label(), severity.color()));
            }
            if let Some(score) = readiness {
                let level = ReadinessLevel::from_score(score);
                println!("Readiness:     {}", paint(level.label(), level.color()));
            }

            let today = Utc::now().date_naive();
            let summary = DailySummary::build(today, &physical, &mental, &config.risk);
            if summary.status == SummaryStatus::Warning {
                println!();
                for alert in &summary.alerts {
                    println!("{} {}", "!".red().bold(), alert.red());
                }
            }
            for recommendation in &summary.recommendations {
                println!("  {}", recommendation);
            }
        }

        Commands::Jump {
            height,
            baseline,
            body_mass,
        } => {
            let mut analyzer = JumpTestAnalyzer::new(baseline);
            if let Some(mass) = body_mass {
                analyzer = analyzer.with_body_mass(mass);
            }

            let assessment = analyzer.assess(height)?;
            println!(
                "{}% vs baseline: {}",
                assessment.delta_percent,
                paint(assessment.readiness.label(), assessment.readiness.color())
            );
            if let Some(watts) = assessment.peak_power_watts {
                println!("Estimated peak power: {} W", watts);
            }
            println!("{}", assessment.readiness.action());
        }

        Commands::Stats { values } => {
            let stats = SeriesStats::from_values(&values);
            println!("avg:   {}", stats.avg.round_dp(2));
            println!("min:   {}", stats.min);
            println!("max:   {}", stats.max);
            println!("std:   {}", stats.std.round_dp(2));
            println!("trend: {}", trend(&values).round_dp(2));
        }

        Commands::InitConfig => {
            let path = cli.config.unwrap_or_else(AppConfig::default_config_path);
            config.save_to_file(&path)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
    }

    Ok(())
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<VitalRsError>() {
        Some(domain) => {
            debug!(error = %domain, severity = ?domain.severity(), "Command failed");
            let label = match domain.severity() {
                ErrorSeverity::Critical | ErrorSeverity::Error => "Error:".red().bold(),
                ErrorSeverity::Warning => "Invalid input:".yellow().bold(),
                ErrorSeverity::Info => "Not yet:".blue().bold(),
            };
            eprintln!("{} {}", label, domain.user_message());
        }
        None => eprintln!("{} {:#}", "Error:".red().bold(), err),
    }
}

fn print_insufficient(available: usize, required: usize) {
    println!(
        "{}",
        format!(
            "Not enough sessions yet: {} of {} needed for a workload ratio.",
            available, required
        )
        .yellow()
    );
}

fn flag(raised: bool) -> ColoredString {
    if raised {
        "yes".red().bold()
    } else {
        "no".green()
    }
}

fn paint(text: &str, color: DisplayColor) -> ColoredString {
    match color {
        DisplayColor::Green => text.green(),
        DisplayColor::Yellow => text.yellow(),
        DisplayColor::Orange => text.truecolor(255, 165, 0),
        DisplayColor::Red => text.red(),
        DisplayColor::Blue => text.blue(),
    }
}
