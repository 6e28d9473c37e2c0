// Console front end for the renewable trend analyzer.
//
// - Option [1] loads the per-region CSV files from the data directory
//   (`data/` unless given on the command line) and prints load diagnostics.
// - Option [2] runs every report, exports them, and prints previews.
// - Option [3] ranks the reference deployment sites.
// - Option [4] runs the installation cost and efficiency simulator.
use clap::{Parser, ValueHint};
use once_cell::sync::Lazy;
use renewable_trends::analyzer::{rank_sites, simulate_installation};
use renewable_trends::config::AnalyzerConfig;
use renewable_trends::types::TimeSeries;
use renewable_trends::{loader, output, reports, sites, util};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

const CONFIG_FILE: &str = "dashboard_config.json";
const DEFAULT_DATA_DIR: &str = "data";
const REGION_FILES: &[(&str, &str)] = &[
    ("EU", "eu_data.csv"),
    ("India", "india_data.csv"),
    ("USA", "usa_data.csv"),
];
const FORECAST_HORIZON: u32 = 7;

#[derive(Parser, Debug)]
#[command(author, version, about = "Renewable energy transition dashboard", long_about = None)]
struct Cli {
    /// Directory holding eu_data.csv, india_data.csv and usa_data.csv
    #[arg(default_value = DEFAULT_DATA_DIR, value_hint = ValueHint::DirPath)]
    data_dir: PathBuf,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Analyzer configuration file; built-in defaults apply if it is missing
    #[arg(long, default_value = CONFIG_FILE, value_hint = ValueHint::FilePath)]
    config: PathBuf,
}

// Loaded once, reused across report runs in the same session.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { series: None }));

struct AppState {
    series: Option<Vec<TimeSeries>>,
}

/// Read one trimmed line. `None` means stdin is closed or unreadable.
fn read_answer<R: BufRead>(input: &mut R) -> Option<String> {
    let mut buf = String::new();
    match input.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();
    read_answer(&mut io::stdin().lock())
}

/// Keep asking until the answer parses; an empty answer takes `default`.
fn prompt_f64(label: &str, default: f64) -> Option<f64> {
    loop {
        let answer = prompt(&format!("{} [{}]: ", label, default))?;
        if answer.is_empty() {
            return Some(default);
        }
        match util::parse_f64_safe(Some(&answer)) {
            Some(v) => return Some(v),
            None => println!("Please enter a number."),
        }
    }
}

fn load_config(path: &Path) -> AnalyzerConfig {
    if !path.exists() {
        info!("no {} found, using built-in defaults", path.display());
        return AnalyzerConfig::default();
    }
    match AnalyzerConfig::from_json_file(path) {
        Ok(config) => {
            info!("loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            warn!("ignoring {}: {}", path.display(), e);
            AnalyzerConfig::default()
        }
    }
}

fn loaded_series() -> Option<Vec<TimeSeries>> {
    match APP_STATE.lock() {
        Ok(state) => state.series.clone(),
        Err(poisoned) => poisoned.into_inner().series.clone(),
    }
}

fn handle_load(data_dir: &Path) {
    let mut loaded = Vec::new();
    for (region, file) in REGION_FILES {
        let path = data_dir.join(file);
        if !path.exists() {
            warn!(region = *region, "{} not found, skipping", path.display());
            continue;
        }
        match loader::load_series(&path, region) {
            Ok((series, report)) => {
                println!(
                    "{}: {} rows read, {} loaded, {} skipped, {} duplicate years",
                    region,
                    util::format_int(report.total_rows),
                    util::format_int(report.loaded_rows),
                    util::format_int(report.parse_errors),
                    util::format_int(report.duplicate_years)
                );
                loaded.push(series);
            }
            Err(e) => error!(region = *region, "failed to load {}: {}", path.display(), e),
        }
    }
    println!();
    if loaded.is_empty() {
        println!("No regional data could be loaded.\n");
        return;
    }
    match APP_STATE.lock() {
        Ok(mut state) => state.series = Some(loaded),
        Err(poisoned) => poisoned.into_inner().series = Some(loaded),
    }
}

fn export<T: serde::Serialize>(path: &str, rows: &[T]) {
    if let Err(e) = output::write_csv(path, rows) {
        error!("write error for {}: {}", path, e);
    }
}

fn handle_generate_reports(config: &AnalyzerConfig) {
    let Some(series) = loaded_series() else {
        println!("Error: No data loaded. Please load the data first (option 1).\n");
        return;
    };

    println!("Generating reports...\n");

    let (summary_rows, summaries) = reports::generate_region_summary(&series, config);
    let file1 = "report1_region_summary.csv";
    export(file1, &summary_rows);
    println!("Report 1: Renewable Share Summary and 2030 Goal Progress\n");
    output::preview_table_rows(&summary_rows, summary_rows.len());
    println!("(Full table exported to {})\n", file1);

    let trend_rows = reports::generate_trends(&series);
    let file2 = "report2_yearly_trends.csv";
    export(file2, &trend_rows);
    println!("Report 2: Year-over-Year Renewable Share Change\n");
    output::preview_table_rows(&trend_rows, 4);
    println!("(Full table exported to {})\n", file2);

    let forecast_rows = reports::generate_forecasts(&series, FORECAST_HORIZON);
    let file3 = "report3_forecast.csv";
    export(file3, &forecast_rows);
    println!("Report 3: {}-Year Linear Forecast\n", FORECAST_HORIZON);
    output::preview_table_rows(&forecast_rows, 3);
    println!("(Full table exported to {})\n", file3);

    let correlation_rows = reports::generate_correlations(&series);
    let file4 = "report4_correlations.csv";
    export(file4, &correlation_rows);
    println!("Report 4: Cross-Region Share Correlation\n");
    output::preview_table_rows(&correlation_rows, correlation_rows.len());
    println!("(Full table exported to {})\n", file4);

    let today = chrono::Local::now().date_naive();
    let summary = reports::generate_summary(&series, &summaries, today);
    if let Err(e) = output::write_json("summary.json", &summary) {
        error!("write error for summary.json: {}", e);
    }
    if let Some(agg) = &summary.aggregate {
        println!("Summary Stats (summary.json):");
        println!(
            "{{\"total_energy_twh\": {}, \"total_co2_saved_mt\": {}}}\n",
            util::format_number(agg.total_energy_twh, 1),
            util::format_number(agg.total_co2_saved_mt, 2)
        );
    }
}

fn handle_rank_sites(config: &AnalyzerConfig) {
    let Some(weight) = prompt_f64("Deployment weight (0-1)", config.default_weight) else {
        return;
    };
    let ranked = match rank_sites(sites::reference_sites(), weight) {
        Ok(r) => r,
        Err(e) => {
            println!("Error: {}\n", e);
            return;
        }
    };
    let rows = reports::generate_site_ranking(&ranked);
    let file = "report5_site_ranking.csv";
    export(file, &rows);
    println!("\nRenewable Site Ranking (deployment weight {})\n", weight);
    output::preview_table_rows(&rows, rows.len());
    println!("(Full table exported to {})\n", file);
}

fn handle_simulation(config: &AnalyzerConfig) {
    let Some(capacity) = prompt_f64("Installed capacity (MW)", 500.0) else {
        return;
    };
    let Some(efficiency) = prompt_f64("System efficiency (%)", 80.0) else {
        return;
    };
    let Some(cost) = prompt_f64("Installation cost per MW (Million $)", 1.5) else {
        return;
    };
    match simulate_installation(capacity, efficiency, cost, config) {
        Ok(sim) => {
            println!(
                "\nAnnual Energy Output: {} TWh",
                util::format_number(sim.annual_energy_twh, 2)
            );
            println!(
                "Total Installation Cost: ${} M",
                util::format_number(sim.total_cost_musd, 1)
            );
            println!(
                "CO2 Saved (est.): {} Mt\n",
                util::format_number(sim.co2_saved_mt, 2)
            );
        }
        Err(e) => println!("Error: {}\n", e),
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {}", e);
    }

    let config = load_config(&cli.config);
    info!("reading regional data from {}", cli.data_dir.display());
    loop {
        println!("Renewable Energy Transition Dashboard");
        println!("[1] Load regional data");
        println!("[2] Generate reports");
        println!("[3] Rank renewable sites");
        println!("[4] Simulate installation");
        println!("[5] Exit\n");
        let Some(choice) = prompt("Enter choice: ") else {
            println!("\nInput closed. Exiting the program.");
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&cli.data_dir),
            "2" => {
                println!();
                handle_generate_reports(&config);
            }
            "3" => handle_rank_sites(&config),
            "4" => handle_simulation(&config),
            "5" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1-5.\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["renewable_trends"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(cli.log_level, tracing::Level::INFO);
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::try_parse_from([
            "renewable_trends",
            "/srv/energy",
            "--log-level",
            "debug",
            "--config",
            "alt.json",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/srv/energy"));
        assert_eq!(cli.log_level, tracing::Level::DEBUG);
        assert_eq!(cli.config, PathBuf::from("alt.json"));
        assert!(Cli::try_parse_from(["renewable_trends", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn closed_input_yields_none() {
        let mut closed: &[u8] = b"";
        assert_eq!(read_answer(&mut closed), None);

        let mut input: &[u8] = b"  2 \nrest\n";
        assert_eq!(read_answer(&mut input), Some("2".to_string()));
        assert_eq!(read_answer(&mut input), Some("rest".to_string()));
        assert_eq!(read_answer(&mut input), None);
    }

    #[test]
    fn blank_line_is_not_end_of_input() {
        let mut input: &[u8] = b"\n";
        assert_eq!(read_answer(&mut input), Some(String::new()));
    }
}
