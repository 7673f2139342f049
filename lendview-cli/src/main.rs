//! # LendView CLI - Lending Market Dashboard
//!
//! A terminal dashboard over a lending account's asset list.
//!
//! ## Features
//! - Supply and Borrow market lists with the user's positions first
//! - Supply/Borrow action card following the selected asset
//! - "Add to wallet" buttons when a wallet network is configured
//! - Non-interactive market listing as a table or JSON
//!
//! ## Usage
//! ```bash
//! # Run the interactive TUI
//! lendview-cli --settings demos/settings.json
//!
//! # Print the borrow market as JSON
//! lendview-cli --settings demos/settings.json --market borrow --json markets
//!
//! # Run system diagnostics
//! lendview-cli doctor
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tabled::{Table, Tabled, settings::Style};
use tracing::{info, warn};

use lendview::config::SETTINGS_ENV;
use lendview::prelude::*;

mod config_loader;
mod tui;

use config_loader::CliConfig;
use tui::{App, handle_events, ui};

/// Lending market dashboard
#[derive(Parser, Debug)]
#[command(name = "lendview-cli")]
#[command(author = "lendview contributors")]
#[command(version)]
#[command(about = "Terminal dashboard for lending markets", long_about = None)]
struct Args {
    /// Enable file logging to logs/ directory
    #[arg(long, default_value = "false")]
    log: bool,

    /// Settings JSON file (asset list, decimals, selection)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Market to open: supply or borrow
    #[arg(long)]
    market: Option<MarketTab>,

    /// Show "Lending APY" instead of "Net APY"
    #[arg(long, default_value = "false")]
    lending_apy: bool,

    /// Network id reported by the wallet; enables "add to wallet" buttons
    #[arg(long)]
    wallet_network: Option<String>,

    /// Output results as JSON (non-interactive mode)
    #[arg(long, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the market lists and the default selection
    Markets,
    /// Run diagnostics to check configuration and settings
    Doctor,
    /// Write a sample config file to the user config directory
    InitConfig,
}

/// Default filter for both the console and the log file.
const LOG_DIRECTIVE: &str = "lendview=info";

/// Options after merging the config file under the command line.
struct Resolved {
    settings_path: Option<PathBuf>,
    market: MarketTab,
    lending_apy: bool,
    wallet_network: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = CliConfig::load();

    // Initialize tracing with optional file logging
    // NOTE: In TUI mode, we only log to file (no console) to avoid corrupting the UI
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>;
    let is_tui_mode = args.command.is_none();

    if args.log || config.enable_logging.unwrap_or(false) {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        std::fs::create_dir_all("logs")?;

        let file_appender = tracing_appender::rolling::daily("logs", "lendview.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        _file_guard = Some(guard);

        let env_filter =
            tracing_subscriber::EnvFilter::from_default_env().add_directive(LOG_DIRECTIVE.parse()?);

        if is_tui_mode {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
        }

        info!("--- Dashboard Session Started [{}] ---", chrono::Utc::now());
    } else {
        _file_guard = None;
        // Without --log the TUI runs with no subscriber at all
        if !is_tui_mode {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(LOG_DIRECTIVE.parse()?),
                )
                .init();
        }
    }

    let resolved = resolve(&args, &config);

    match args.command {
        Some(Commands::Markets) => run_markets(&resolved, args.json),
        Some(Commands::Doctor) => run_doctor(&resolved),
        Some(Commands::InitConfig) => run_init_config(),
        None => run_tui(&resolved),
    }
}

/// Command-line flags win over the config file.
fn resolve(args: &Args, config: &CliConfig) -> Resolved {
    let market = args.market.unwrap_or_else(|| {
        config
            .market
            .as_deref()
            .and_then(|m| {
                m.parse::<MarketTab>()
                    .inspect_err(|_| warn!("Unknown market {:?} in config, using supply", m))
                    .ok()
            })
            .unwrap_or_default()
    });

    Resolved {
        settings_path: args.settings.clone().or_else(|| config.settings_path.clone()),
        market,
        lending_apy: args.lending_apy || config.lending_apy.unwrap_or(false),
        wallet_network: args
            .wallet_network
            .clone()
            .or_else(|| config.wallet_network.clone()),
    }
}

/// Loads settings from the resolved path, then the environment.
fn load_settings(resolved: &Resolved) -> Result<Settings, LendError> {
    let settings = match &resolved.settings_path {
        Some(path) => Settings::try_from_json(&path.to_string_lossy())?,
        None if env::var(SETTINGS_ENV).is_ok() => Settings::from_env()?,
        None => {
            warn!("No settings file given; starting with an empty asset list");
            Settings::default()
        }
    };
    Ok(settings)
}

/// Run the TUI application
fn run_tui(resolved: &Resolved) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(resolved)?;
    let wallet = resolved.wallet_network.clone().map(InjectedWallet::new);
    let mut app = App::with_initial_strk(settings, resolved.market, wallet, !resolved.lending_apy);

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app);
    ratatui::restore();

    result
}

/// Main application loop
fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui(frame, app))?;

        if handle_events(app)? {
            break;
        }
    }

    Ok(())
}

#[derive(Tabled)]
struct MarketRow {
    #[tabled(rename = "Section")]
    section: &'static str,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "APY")]
    apy: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// Prints both markets and the default selection (outside TUI)
fn run_markets(resolved: &Resolved, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(resolved)?;
    let dashboard = Dashboard::with_initial_strk(
        InMemorySettings::new(settings),
        resolved.market,
        !resolved.lending_apy,
    );
    let market = dashboard.market();
    let selected = dashboard.settings().selected_asset.as_ref().map(|a| a.id.clone());

    if json {
        let output = serde_json::json!({
            "market": dashboard.market_tab(),
            "yieldLabel": market.yield_label(),
            "buckets": market.buckets(),
            "selectedAsset": selected,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", format!("APY column shows {}", market.yield_label()).dimmed());
    for tab in MarketTab::iter() {
        let list = market.list(tab);
        let rows: Vec<MarketRow> = [
            (list.primary_title(), list.primary),
            (list.remaining_title(), list.remaining),
        ]
        .into_iter()
        .flat_map(|(section, assets)| assets.iter().map(move |asset| market_row(section, tab, asset)))
        .collect();

        println!("\n{}", tab.label().bright_cyan().bold());
        if rows.is_empty() {
            println!("{}", "No assets in this market.".yellow());
        } else {
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }

    match selected {
        Some(id) => println!("\nSelected asset ({}): {}", dashboard.market_tab(), id.green().bold()),
        None => println!("\nSelected asset: {}", "none".dimmed()),
    }
    Ok(())
}

fn market_row(section: &'static str, tab: MarketTab, asset: &Asset) -> MarketRow {
    let (apy, position) = match tab {
        MarketTab::Supply => (asset.supply_apy, asset.supply_balance),
        MarketTab::Borrow => (asset.borrow_apy, asset.borrow_balance),
    };
    MarketRow {
        section,
        asset: asset.symbol(),
        apy: format!("{:.2}%", apy),
        position: format!("{:.4}", position),
        wallet: format!("{:.4}", asset.wallet_balance),
        price: format!("${:.2}", asset.token_price),
    }
}

/// Writes the sample config (outside TUI)
fn run_init_config() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = CliConfig::config_path()
        && path.exists()
    {
        println!("{} Config already exists at {}", "!".yellow(), path.display());
        return Ok(());
    }
    let path = CliConfig::create_sample()?;
    println!("{} Wrote sample config to {}", "✓".green(), path.display());
    Ok(())
}

/// Run doctor diagnostics (outside TUI)
fn run_doctor(resolved: &Resolved) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n🚑 LendView Doctor - Diagnostics Tool");
    println!("═══════════════════════════════════════════════\n");

    // 1. Environment Info
    println!("1. System Information:");
    println!("   OS: {}", std::env::consts::OS);
    println!("   Arch: {}", std::env::consts::ARCH);
    println!("   CLI Version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "   NO_COLOR: {}",
        if env::var("NO_COLOR").is_ok() {
            "Set (True)"
        } else {
            "Unset"
        }
    );

    // 2. Configuration
    println!("\n2. Configuration:");
    match CliConfig::config_path() {
        Some(path) => println!(
            "   Config File: {} ({})",
            path.display(),
            if path.exists() { "found" } else { "not found" }
        ),
        None => println!("   Config File: {}", "no config directory".yellow()),
    }
    println!(
        "   {}: {}",
        SETTINGS_ENV,
        env::var(SETTINGS_ENV).unwrap_or_else(|_| "Unset".to_string())
    );
    println!("   Market: {}", resolved.market);
    println!(
        "   Wallet Network: {}",
        resolved.wallet_network.as_deref().unwrap_or("none")
    );

    // 3. Settings
    println!("\n3. Settings:");
    match load_settings(resolved) {
        Ok(settings) => {
            let buckets = MarketBuckets::from_raw(&settings.asset_list);
            println!("   {} Loaded {} assets", "✓".green(), settings.asset_list.len());
            if buckets.len() < settings.asset_list.len() {
                println!(
                    "   {} {} assets have malformed numbers and are hidden",
                    "⚠".yellow(),
                    settings.asset_list.len() - buckets.len()
                );
            }
            println!(
                "   Supplied: {}  Borrowed: {}",
                buckets.supplied.len(),
                buckets.borrowed.len()
            );
            let missing: Vec<&str> = buckets
                .supplied
                .iter()
                .chain(&buckets.non_supplied)
                .filter(|a| !settings.decimals.contains_key(&a.id))
                .map(|a| a.id.as_str())
                .collect();
            if missing.is_empty() {
                println!("   {} Token decimals configured for every asset", "✓".green());
            } else {
                println!(
                    "   {} No token decimals for: {}",
                    "⚠".yellow(),
                    missing.join(", ")
                );
            }
        }
        Err(e) => {
            println!("   {} FAILED", "✗".red());
            println!("   Error: {}", e);
        }
    }

    // 4. Storage
    println!("\n4. Storage:");
    let current_dir = std::env::current_dir()?;
    println!("   Current Directory: {:?}", current_dir);
    println!(
        "   Write Access (logs/): {}",
        if is_writable(&current_dir) { "Yes" } else { "No" }
    );

    println!("\nDiagnostics Complete.\n");
    Ok(())
}

fn is_writable(dir: &Path) -> bool {
    std::fs::metadata(dir).is_ok_and(|m| !m.permissions().readonly())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive_is_info() {
        let directive: tracing_subscriber::filter::Directive = LOG_DIRECTIVE.parse().unwrap();
        assert_eq!(directive.to_string().to_lowercase(), "lendview=info");
    }
}
