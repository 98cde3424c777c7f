use clap::Subcommand;

use crate::cli::utils::print_json;
use crate::cli::{CliContext, OutputFormat};
use crate::models::Settings;

#[derive(Subcommand)]
pub enum SettingsCommands {
    #[command(about = "Show the banner year and theme")]
    Show,

    #[command(about = "Change the banner year and/or theme")]
    Set {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        theme: Option<String>,
    },
}

fn output_settings(output: OutputFormat, settings: &Settings) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => print_json(settings)?,
        OutputFormat::Text => {
            println!("Year:  {}", settings.year);
            println!("Theme: {}", settings.theme);
        }
    }
    Ok(())
}

pub async fn handle(cmd: SettingsCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        SettingsCommands::Show => {
            let settings = ctx.store.get_settings().await?;
            output_settings(ctx.output, &settings)
        }
        SettingsCommands::Set { year, theme } => {
            if year.is_none() && theme.is_none() {
                anyhow::bail!("nothing to update; pass --year and/or --theme");
            }

            let mut settings = ctx.store.get_settings().await?;
            if let Some(year) = year {
                settings.year = year;
            }
            if let Some(theme) = theme {
                settings.theme = theme;
            }
            if let Err(fields) = settings.validate() {
                anyhow::bail!("invalid settings: {:?}", fields);
            }

            let saved = ctx.store.save_settings(settings).await?;
            output_settings(ctx.output, &saved)
        }
    }
}
