use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};

use eink_weather_core::{
    Config, ProviderId, Station, View,
    provider::requests_for,
};

/// Battery reading used when none is given: above 100 means charging.
const CHARGING: u32 = 101;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "eink-weather", version, about = "E-paper weather station driver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a provider.
    Configure {
        /// Provider short name: timezonedb, waqi, positionstack or openweather.
        provider: String,
    },

    /// Set the station location.
    Locate {
        /// Display name, also used for geocoding when no coordinates are given.
        name: String,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<String>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<String>,
    },

    /// Print the request URLs for the configured location, keys masked.
    Paths,

    /// Run one refresh cycle and print the screen contents.
    Show {
        /// Battery charge in percent; above 100 means charging.
        #[arg(long, default_value_t = CHARGING)]
        battery: u32,

        /// Print the view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Refresh forever, sleeping the configured interval between cycles.
    Run {
        #[arg(long, default_value_t = CHARGING)]
        battery: u32,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Locate { name, lat, lon } => locate(&name, lat.zip(lon)),
            Command::Paths => paths().await,
            Command::Show { battery, json } => show(battery, json).await,
            Command::Run { battery } => run_loop(battery).await,
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let provider_id = ProviderId::try_from(provider)?;
    let mut cfg = Config::load()?;

    let prompt = format!("Enter API key for {provider_id}:");
    let api_key = Password::new(&prompt)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    cfg.upsert_provider_api_key(provider_id, api_key);
    cfg.save()?;

    println!("Saved API key for {provider_id}.");
    Ok(())
}

fn locate(name: &str, coordinates: Option<(String, String)>) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        bail!("Location name must not be empty");
    }

    let mut cfg = Config::load()?;
    cfg.set_location(name, coordinates);
    // Reject coordinates that would fail on every cycle.
    let resolved = cfg.resolved_location()?;
    cfg.save()?;

    match resolved {
        Some(location) => println!("Location set to {location}."),
        None => println!("Location set to '{}', coordinates will be looked up.", name.trim()),
    }
    Ok(())
}

/// Warns about providers that rely on a built-in key, which may be absent.
fn warn_missing_keys(cfg: &Config) {
    for id in ProviderId::all() {
        if !cfg.is_provider_configured(*id) {
            tracing::warn!("No API key configured for {id}; run `eink-weather configure {id}`");
        }
    }
}

async fn paths() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    warn_missing_keys(&cfg);

    let location = match cfg.resolved_location()? {
        Some(location) => location,
        None => {
            let Some(name) = cfg.location.as_ref().map(|l| l.name.clone()) else {
                bail!("No location configured. Run `eink-weather locate <name>` first.");
            };
            let mut station = Station::from_config(cfg.clone())?;
            station
                .resolve_location()
                .await
                .with_context(|| format!("Could not geocode '{name}'"))?
        }
    };

    for request in requests_for(&cfg, &location) {
        println!("{:<14}{}", request.provider(), request.redacted_url());
    }
    Ok(())
}

async fn show(battery: u32, json: bool) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    warn_missing_keys(&cfg);
    let mut station = Station::from_config(cfg)?;

    let view = station.refresh(battery, Utc::now()).await;
    print_view(&view, json)
}

async fn run_loop(battery: u32) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    warn_missing_keys(&cfg);
    let interval = cfg.wake_interval();
    let mut station = Station::from_config(cfg)?;

    loop {
        let view = station.refresh(battery, Utc::now()).await;
        print_view(&view, false)?;
        tracing::info!("Sleeping {} min", interval.as_secs() / 60);
        tokio::time::sleep(interval).await;
    }
}

fn print_view(view: &View, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(view).context("Failed to serialize view")?;
        println!("{out}");
        return Ok(());
    }

    println!("{}  {}  [{}]", view.location, view.datetime, view.battery_display);
    println!(
        "{}  {}{}  feels {}  {}/{}",
        view.weather_desc,
        view.temp_curr,
        view.temp_unit,
        view.temp_feel,
        view.temp_high,
        view.temp_low
    );
    println!(
        "{} {}  wind {} {} ({} deg)",
        view.pressure, view.pressure_unit, view.wind, view.wind_unit, view.wind_deg
    );
    println!("PM2.5 {} {}", view.aq_pm25, view.aq_pm25_unit);

    println!(
        "{:>4} {:>6} {:>5}",
        view.precip_time_unit, view.precip_unit, view.precip_pop_unit
    );
    for ((time, amount), pop) in view.precip_time.iter().zip(&view.precip).zip(&view.precip_pop) {
        println!("{time:>4} {amount:>6} {pop:>5}");
    }
    Ok(())
}
