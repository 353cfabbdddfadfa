//! raidslots - command line entry point

use clap::{ArgGroup, Args, Parser, Subcommand};
use raidslots::assignments::{Boss, EncounterOptions, EncounterOutcome, EncounterRunner, RunOptions, Tier};
use raidslots::config::AppConfig;
use raidslots::observability::init_default_logging;
use raidslots::raid_helper::{RaidHelperClient, RaidHelperConfig, RosterSource};
use raidslots::roster::{RaidRoster, RosterSnapshot};
use raidslots::sheets::{A1Range, GoogleSheetsClient, GoogleSheetsConfig, SheetsClient};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{error, info};

/// Assign raiders to boss positions and update the assignment sheet
#[derive(Parser)]
#[command(name = "raidslots")]
#[command(about = "Raid roster slot assignment for Google Sheets")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every encounter of a tier
    Run {
        /// Raid tier (11 or 12)
        #[arg(long)]
        tier: u8,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Run a single encounter
    Assign {
        /// Boss name, e.g. alakir, chimaeron, conclave, shannox, bethtilac
        #[arg(long)]
        boss: Boss,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Fetch the roster and dump it as JSON
    #[command(group(ArgGroup::new("source").required(true).args(["raid_id", "from_sheet"])))]
    Roster {
        /// Raid-Helper raid id
        #[arg(long)]
        raid_id: Option<u64>,

        /// Read the roster export range from the sheet instead
        #[arg(long)]
        from_sheet: bool,

        /// Output file
        #[arg(long, default_value = "raids.json")]
        out: PathBuf,
    },
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Raid-Helper raid id
    #[arg(long, env = "RAIDSLOTS_RAID_ID")]
    raid_id: u64,

    /// Ignore assignments already in the sheet
    #[arg(long)]
    reset: bool,

    /// Print the planned writes instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Elemental shamans to pull into healer positions (overrides config)
    #[arg(long)]
    flex_healers: Option<u32>,
}

impl RunArgs {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            reset: self.reset,
            dry_run: self.dry_run,
        }
    }

    fn encounter_options(&self, config: &AppConfig) -> EncounterOptions {
        EncounterOptions {
            flex_healers: self.flex_healers.unwrap_or(config.encounters.flex_healers),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging(cli.verbose);

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run { tier, run } => run_tier(&config, tier, &run).await,
        Commands::Assign { boss, run } => run_boss(&config, boss, &run).await,
        Commands::Roster {
            raid_id,
            from_sheet,
            out,
        } => dump_roster(&config, raid_id, from_sheet, &out).await,
        Commands::Config { show } => handle_config_command(&config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_configuration(config_path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if let Some(path) = config_path {
        info!("Loading configuration from: {}", path.display());
        return Ok(AppConfig::load_from_file(path)?);
    }

    for path_str in ["raidslots.toml", "config/raidslots.toml"] {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading configuration from: {}", path.display());
            return Ok(AppConfig::load_from_file(&path)?);
        }
    }

    Err("No configuration file found. Provide one with -c/--config or create raidslots.toml".into())
}

fn sheets_client(config: &AppConfig) -> Result<Arc<GoogleSheetsClient>, Box<dyn std::error::Error>> {
    let sheets_config = GoogleSheetsConfig::from_app_config(config)?;
    Ok(Arc::new(GoogleSheetsClient::new(sheets_config)?))
}

async fn fetch_roster(config: &AppConfig, raid_id: u64) -> Result<RaidRoster, Box<dyn std::error::Error>> {
    let client = RaidHelperClient::new(RaidHelperConfig::from(config))?;
    let roster = client.fetch_roster(raid_id).await?;
    if roster.is_empty() {
        return Err(format!("Raid {raid_id} has no placed raiders").into());
    }
    Ok(roster)
}

async fn run_tier(config: &AppConfig, tier: u8, args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tier = Tier::from_number(tier)?;
    let roster = fetch_roster(config, args.raid_id).await?;
    let runner = EncounterRunner::new(sheets_client(config)?, args.run_options());

    let outcomes = runner
        .run_tier(tier, &roster, &args.encounter_options(config))
        .await?;
    for outcome in &outcomes {
        report(outcome, args.dry_run);
    }
    Ok(())
}

async fn run_boss(config: &AppConfig, boss: Boss, args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let roster = fetch_roster(config, args.raid_id).await?;
    let runner = EncounterRunner::new(sheets_client(config)?, args.run_options());

    let outcome = runner
        .run_boss(boss, &roster, &args.encounter_options(config))
        .await?;
    report(&outcome, args.dry_run);
    Ok(())
}

fn report(outcome: &EncounterOutcome, dry_run: bool) {
    println!("== {} ==", outcome.encounter);
    for line in &outcome.summary {
        println!("  {line}");
    }
    if dry_run {
        for write in &outcome.writes {
            println!("  would write {}:", write.range);
            for row in &write.rows {
                if row.iter().any(|cell| !cell.is_empty()) {
                    println!("    {}", row.join(" | "));
                }
            }
        }
    }
}

async fn dump_roster(
    config: &AppConfig,
    raid_id: Option<u64>,
    from_sheet: bool,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = match raid_id {
        Some(raid_id) if !from_sheet => {
            RosterSnapshot::new(format!("raid-helper:{raid_id}"), fetch_roster(config, raid_id).await?)
        }
        _ => {
            let range: A1Range = config.sheets.roster_range.parse()?;
            let grid = sheets_client(config)?.get_range(&range).await?;
            RosterSnapshot::new(format!("sheet:{range}"), RaidRoster::from_sheet_rows(&grid))
        }
    };

    std::fs::write(out, serde_json::to_string_pretty(&snapshot)?)?;
    info!(
        raiders = snapshot.roster.len(),
        path = %out.display(),
        "Roster written"
    );
    Ok(())
}

fn handle_config_command(config: &AppConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(config)?);
    }

    match config.sheets_access_token() {
        Ok(_) => info!(env = %config.sheets.access_token_env, "Sheets access token found"),
        Err(e) => error!("{}", e),
    }

    info!("Configuration validation complete");
    Ok(())
}
