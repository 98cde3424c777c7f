use chrono::Datelike;
use clap::Args;

use crate::calendar::render_text;
use crate::cli::utils::print_json;
use crate::cli::{CliContext, OutputFormat};

#[derive(Args, Debug)]
pub struct CalendarArgs {
    #[arg(long, help = "Defaults to the current year")]
    pub year: Option<i32>,

    #[arg(long, help = "1-12, defaults to the current month")]
    pub month: Option<u32>,
}

pub async fn handle(args: CalendarArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let gatherings = ctx.gatherings();
    let today = gatherings.today();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());

    let calendar = gatherings.calendar(year, month).await?;

    match ctx.output {
        OutputFormat::Json => print_json(&calendar)?,
        OutputFormat::Text => print!("{}", render_text(&calendar)),
    }
    Ok(())
}
