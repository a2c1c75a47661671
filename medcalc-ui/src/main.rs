use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rust_decimal::Decimal;
use tracing::{debug, info};

use medcalc_core::{
    AdjustmentFactors, ParameterStore, ProjectionInputs, service::ServiceConfig,
};
use medcalc_ui::app::{self, Session};
use medcalc_ui::i18n::{DEFAULT_LOCALE, Translator};
use medcalc_ui::logging;
use medcalc_ui::preferences::{self, PreferenceStore};
use medcalc_ui::state::{AppState, DisplayConfig};
use medcalc_ui::utils::parse_decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Medical cost projection calculator.
///
/// Fetches a year-by-year cost projection from the pricing service and shows
/// it adjusted for inflation and currency. Type `help` at the prompt for the
/// list of commands.
#[derive(Debug, Parser)]
struct Cli {
    /// Root URL of the pricing service.
    #[arg(long, default_value = "http://localhost:8000")]
    service_url: String,

    /// Give up on a request after this many seconds. Waits indefinitely when unset.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Preferences file. Defaults to `<app name>.prefs.toml`.
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Label language.
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,

    /// Log filter, e.g. `debug` or `info,medcalc_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Keep log lines off stdout.
    #[arg(long)]
    no_log_stdout: bool,

    /// Columns shown without adjustment.
    #[arg(long, value_delimiter = ',')]
    index_columns: Option<Vec<String>>,

    #[arg(long)]
    year: Option<String>,

    #[arg(long)]
    plan: Option<String>,

    #[arg(long)]
    age: Option<u32>,

    #[arg(long, value_parser = parse_decimal)]
    deductible: Option<Decimal>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    years: Option<u32>,

    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    inflation_rate: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    currency_rate: Option<Decimal>,

    /// Start with inflation compounding switched off.
    #[arg(long)]
    no_inflation: bool,
}

impl Cli {
    fn initial_store(&self) -> ParameterStore {
        let inputs = ProjectionInputs::default();
        let factors = AdjustmentFactors::default();

        ParameterStore::with_values(
            ProjectionInputs {
                year: self.year.clone().unwrap_or(inputs.year),
                plan: self.plan.clone().unwrap_or(inputs.plan),
                age: self.age.unwrap_or(inputs.age),
                deductible: self.deductible.unwrap_or(inputs.deductible),
                number_of_years: self.years.unwrap_or(inputs.number_of_years),
            },
            AdjustmentFactors {
                inflation_rate: self.inflation_rate.unwrap_or(factors.inflation_rate),
                currency_rate: self.currency_rate.unwrap_or(factors.currency_rate),
                inflation_enabled: !self.no_inflation,
            },
        )
    }

    fn display_config(&self) -> DisplayConfig {
        match &self.index_columns {
            Some(columns) => DisplayConfig {
                index_columns: columns.clone(),
            },
            None => DisplayConfig::default(),
        }
    }

    fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.service_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_default_logging();
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    if cli.no_log_stdout {
        logging::set_stdout_enabled(false)?;
    }

    let service_config = cli.service_config();
    debug!(url = %service_config.base_url, "connecting to pricing service");
    let service = app::connect(&service_config)?;

    let translator = Translator::new(&cli.locale)?;
    let prefs = PreferenceStore::load(cli.prefs.clone().unwrap_or_else(preferences::default_path));
    debug!(path = %prefs.path().display(), "preferences loaded");
    let state = AppState::new(cli.initial_store(), cli.display_config());
    info!(inputs = ?state.store().inputs(), "starting {}", logging::app_name());

    let session =
        Session::new(state, service, prefs, translator).with_ansi(io::stdout().is_terminal());
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = session.run(stdin, &mut io::stdout()).await;

    logging::disable_file_logging();
    result?;
    Ok(())
}
