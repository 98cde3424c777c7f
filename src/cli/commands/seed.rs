use clap::Args;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::CliContext;
use crate::models::Settings;
use crate::seed;

#[derive(Args, Debug)]
pub struct SeedArgs {
    #[arg(long, help = "Banner year to store if settings are still at their defaults")]
    pub year: Option<i32>,

    #[arg(long, help = "Banner theme to store if settings are still at their defaults")]
    pub theme: Option<String>,

    #[arg(long, help = "Create missing tables first")]
    pub init: bool,
}

impl SeedArgs {
    fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            year: self.year.unwrap_or(defaults.year),
            theme: self.theme.clone().unwrap_or(defaults.theme),
        }
    }
}

pub async fn handle(args: SeedArgs, ctx: &CliContext) -> anyhow::Result<()> {
    if args.init {
        ctx.store.initialize().await?;
    }

    let settings = args.settings();
    if let Err(fields) = settings.validate() {
        anyhow::bail!("invalid settings: {:?}", fields);
    }

    let report = seed::seed(ctx.store.as_ref(), &settings).await?;

    output_success(
        ctx.output,
        &format!(
            "Seeded {} links, {} gatherings{}",
            report.links_inserted,
            report.gatherings_inserted,
            if report.settings_saved { ", settings" } else { "" }
        ),
        Some(json!({ "report": report })),
    )
}
