use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::models::serde_helpers::{parse_date, parse_time};
use crate::models::{Gathering, GatheringPatch, NewGathering};
use crate::services::StatusFilter;
use crate::status::EventStatus;

#[derive(Subcommand)]
pub enum EventCommands {
    #[command(about = "List gatherings with their current status")]
    List {
        #[arg(long, value_parser = parse_filter, help = "Only 'active' or 'past' gatherings")]
        status: Option<StatusFilter>,
    },

    #[command(about = "Show one gathering")]
    Show {
        #[arg(help = "Gathering ID")]
        id: String,
    },

    #[command(about = "Schedule a gathering")]
    Add {
        #[arg(help = "Title")]
        title: String,

        #[arg(long, value_parser = parse_date, help = "Day of the gathering (YYYY-MM-DD)")]
        date: NaiveDate,

        #[arg(long, value_parser = parse_time, help = "Start time (HH:MM)")]
        time: NaiveTime,

        #[arg(long, value_parser = parse_date, help = "Last day to register (YYYY-MM-DD)")]
        deadline: Option<NaiveDate>,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long = "banner-url", default_value = "")]
        banner_url: String,
    },

    #[command(about = "Change fields of a gathering")]
    Update {
        #[arg(help = "Gathering ID")]
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,

        #[arg(long, value_parser = parse_date, conflicts_with = "clear_deadline")]
        deadline: Option<NaiveDate>,

        #[arg(long = "clear-deadline", help = "Remove the registration deadline")]
        clear_deadline: bool,

        #[arg(long)]
        description: Option<String>,

        #[arg(long = "banner-url")]
        banner_url: Option<String>,

        #[arg(long, value_parser = parse_status)]
        status: Option<EventStatus>,

        #[arg(long)]
        attendees: Option<i32>,
    },

    #[command(about = "Flip a gathering between active and past")]
    Toggle {
        #[arg(help = "Gathering ID")]
        id: String,
    },

    #[command(about = "Count one RSVP")]
    Attend {
        #[arg(help = "Gathering ID")]
        id: String,
    },

    #[command(about = "Delete a gathering")]
    Delete {
        #[arg(help = "Gathering ID")]
        id: String,
    },
}

fn parse_filter(raw: &str) -> Result<StatusFilter, String> {
    raw.parse().map_err(|e: crate::status::ParseStatusError| e.to_string())
}

fn parse_status(raw: &str) -> Result<EventStatus, String> {
    raw.parse().map_err(|e: crate::status::ParseStatusError| e.to_string())
}

fn output_gathering(output: OutputFormat, gathering: &Gathering) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => print_json(gathering)?,
        OutputFormat::Text => print_gathering(gathering),
    }
    Ok(())
}

pub async fn handle(cmd: EventCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let gatherings = ctx.gatherings();

    match cmd {
        EventCommands::List { status } => {
            let all = gatherings.list(status).await?;
            if all.is_empty() {
                return output_empty_collection(ctx.output, "events", "No gatherings found");
            }
            match ctx.output {
                OutputFormat::Json => print_json(&json!({ "events": all }))?,
                OutputFormat::Text => print_gatherings(&all),
            }
            Ok(())
        }
        EventCommands::Show { id } => {
            let gathering = gatherings.get(&id).await?;
            output_gathering(ctx.output, &gathering)
        }
        EventCommands::Add { title, date, time, deadline, description, banner_url } => {
            let gathering = gatherings
                .create(NewGathering {
                    title,
                    description,
                    banner_url,
                    date,
                    time,
                    deadline_date: deadline,
                })
                .await?;
            if ctx.output == OutputFormat::Text {
                println!("✓ Gathering scheduled");
            }
            output_gathering(ctx.output, &gathering)
        }
        EventCommands::Update {
            id,
            title,
            date,
            time,
            deadline,
            clear_deadline,
            description,
            banner_url,
            status,
            attendees,
        } => {
            let deadline_date = if clear_deadline { Some(None) } else { deadline.map(Some) };
            let patch = GatheringPatch {
                title,
                description,
                banner_url,
                date,
                time,
                deadline_date,
                status,
                attendees,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update; pass at least one field flag");
            }
            let gathering = gatherings.update(&id, patch).await?;
            output_gathering(ctx.output, &gathering)
        }
        EventCommands::Toggle { id } => {
            let gathering = gatherings.toggle_status(&id).await?;
            output_success(
                ctx.output,
                &format!("Gathering '{}' is now {}", gathering.title, gathering.status),
                Some(json!({ "event": gathering })),
            )
        }
        EventCommands::Attend { id } => {
            let gathering = gatherings.attend(&id).await?;
            output_success(
                ctx.output,
                &format!("RSVP counted for '{}' ({} attending)", gathering.title, gathering.attendees),
                Some(json!({ "event": gathering })),
            )
        }
        EventCommands::Delete { id } => {
            gatherings.delete(&id).await?;
            output_success(
                ctx.output,
                &format!("Gathering '{}' deleted", id),
                Some(json!({ "id": id, "deleted": true })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn events(args: &[&str]) -> EventCommands {
        let mut argv = vec!["expolink", "events"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::Events { cmd } => cmd,
            _ => panic!("expected events command"),
        }
    }

    #[test]
    fn add_parses_dates_and_times() {
        match events(&["add", "Vigil", "--date", "2026-04-02", "--time", "21:30"]) {
            EventCommands::Add { title, date, time, deadline, .. } => {
                assert_eq!(title, "Vigil");
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 4, 2).unwrap());
                assert_eq!(time, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
                assert_eq!(deadline, None);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn list_accepts_status_filter() {
        match events(&["list", "--status", "past"]) {
            EventCommands::List { status } => assert_eq!(status, Some(StatusFilter::Past)),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn bad_date_is_rejected() {
        let result = Cli::try_parse_from([
            "expolink", "events", "add", "x", "--date", "04/02/2026", "--time", "10:00",
        ]);
        assert!(result.is_err());
    }
}
