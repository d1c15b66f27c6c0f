use anyhow::{bail, Context};
use clap::Parser;
use cropwise::cli::{Cli, Commands};
use cropwise::config::Config;
use cropwise::db::Database;
use cropwise::logic::{CropAdvisor, DataSyncService};
use cropwise::models::{CropType, WeatherReport};
use cropwise::report;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive().context("Setup failed")?;
        }
        Commands::Crops => {
            let config = load_config_or_default(cli.config.as_ref())?;
            let table = config.profile_table()?;
            print!("{}", report::render_profiles(&table));
        }
        Commands::Advise { crop, input, json } => {
            let config = match input {
                Some(_) => load_config_or_default(cli.config.as_ref())?,
                None => load_config(cli.config.clone())?,
            };
            let crop = resolve_crop(crop.as_deref(), &config)?;
            let advisor = CropAdvisor::new(config.profile_table()?);

            let insights = match input {
                Some(path) => {
                    let weather = read_weather_file(&path)?;
                    advisor
                        .insights_for(crop, &weather.current, &weather.forecast)
                        .with_context(|| format!("No profile for crop {}", crop))?
                }
                None => {
                    let service = open_service(config, cli.data_dir.as_ref(), advisor)?;
                    service
                        .advise(crop)
                        .await
                        .context("Failed to generate advisory")?
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
            } else {
                print!("{}", report::render_insights(&insights));
            }
        }
        Commands::History { days } => {
            let config = load_config(cli.config.clone())?;
            let advisor = CropAdvisor::new(config.profile_table()?);
            let service = open_service(config, cli.data_dir.as_ref(), advisor)?;
            let points = service.history(days)?;
            print!("{}", report::render_history(&points));
        }
        Commands::Check => {
            let config = load_config(cli.config.clone())?;
            println!("Config: OK ({})", config.farm.name);
            println!("Default crop: {}", config.farm.crop.display_name());

            let advisor = CropAdvisor::new(config.profile_table()?);
            println!("Rules:");
            for (id, name) in advisor.rules().list_rules() {
                println!("  {:<12} {}", id, name);
            }

            let db_path = Config::db_path(cli.data_dir.as_ref())?;
            println!("Database: {}", db_path.display());

            let service = open_service(config, cli.data_dir.as_ref(), advisor)?;
            let status = service.check_connection().await;
            let label = match (status.enabled, status.openmeteo) {
                (false, _) => "DISABLED",
                (true, true) => "OK",
                (true, false) => "OFFLINE",
            };
            println!("Open-Meteo: {}", label);

            if status.enabled && !status.openmeteo {
                bail!("Weather provider is unreachable");
            }
        }
    }

    Ok(())
}

fn load_config(config_override: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load(config_override).context("Configuration error")
}

/// Config when one exists, built-in defaults otherwise
fn load_config_or_default(config_override: Option<&PathBuf>) -> anyhow::Result<Config> {
    if Config::exists(config_override) {
        load_config(config_override.cloned())
    } else {
        tracing::debug!("No config found, using defaults");
        Ok(Config::default())
    }
}

fn resolve_crop(crop: Option<&str>, config: &Config) -> anyhow::Result<CropType> {
    match crop {
        Some(name) => CropType::from_str(name).with_context(|| {
            let known: Vec<_> = CropType::ALL.iter().map(|c| c.as_str()).collect();
            format!("Unknown crop '{}' (expected one of: {})", name, known.join(", "))
        }),
        None => Ok(config.farm.crop),
    }
}

fn read_weather_file(path: &Path) -> anyhow::Result<WeatherReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let report = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid weather YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid weather JSON in {}", path.display()))?
    };
    Ok(report)
}

fn open_service(
    config: Config,
    data_dir: Option<&PathBuf>,
    advisor: CropAdvisor,
) -> anyhow::Result<DataSyncService> {
    let db_path = Config::db_path(data_dir)?;
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    Ok(DataSyncService::new(config, db, advisor))
}
