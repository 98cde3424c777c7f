pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::{self, StoreBackend};
use crate::services::{GatheringService, LinkService};
use crate::store::{self, SharedStore};

#[derive(Parser)]
#[command(name = "expolink")]
#[command(about = "Expolink CLI - manage links, gatherings and settings in the configured store")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create missing tables and the default settings row")]
    InitDb,

    #[command(about = "Load the demo links and gatherings into empty tables")]
    Seed(commands::seed::SeedArgs),

    #[command(about = "Link directory")]
    Links {
        #[command(subcommand)]
        cmd: commands::links::LinkCommands,
    },

    #[command(about = "Gatherings and RSVPs")]
    Events {
        #[command(subcommand)]
        cmd: commands::events::EventCommands,
    },

    #[command(about = "Year and theme banner")]
    Settings {
        #[command(subcommand)]
        cmd: commands::settings::SettingsCommands,
    },

    #[command(about = "Print a month grid with its gatherings")]
    Calendar(commands::calendar::CalendarArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Store, clock and output format shared by every command
pub struct CliContext {
    pub store: SharedStore,
    pub clock: Box<dyn Clock>,
    pub output: OutputFormat,
}

impl CliContext {
    pub fn gatherings(&self) -> GatheringService<'_> {
        GatheringService::new(self.store.as_ref(), self.clock.as_ref())
    }

    pub fn links(&self) -> LinkService<'_> {
        LinkService::new(self.store.as_ref())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output = OutputFormat::from_cli(&cli);
    let config = config::config();

    if config.store.backend == StoreBackend::Memory {
        tracing::warn!("Using the in-memory store; changes will not outlive this command");
    }

    let ctx = CliContext {
        store: store::connect(config).await?,
        clock: Box::new(SystemClock::new(config.calendar.timezone)),
        output,
    };

    match cli.command {
        Commands::InitDb => commands::init_db::handle(&ctx).await,
        Commands::Seed(args) => commands::seed::handle(args, &ctx).await,
        Commands::Links { cmd } => commands::links::handle(cmd, &ctx).await,
        Commands::Events { cmd } => commands::events::handle(cmd, &ctx).await,
        Commands::Settings { cmd } => commands::settings::handle(cmd, &ctx).await,
        Commands::Calendar(args) => commands::calendar::handle(args, &ctx).await,
    }
}
