use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::models::{LinkPatch, NewLink};

#[derive(Subcommand)]
pub enum LinkCommands {
    #[command(about = "List all links")]
    List,

    #[command(about = "Add a link")]
    Add {
        #[arg(help = "Display name")]
        name: String,

        #[arg(help = "Target address")]
        url: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long = "icon-url", default_value = "")]
        icon_url: String,
    },

    #[command(about = "Change fields of a link")]
    Update {
        #[arg(help = "Link ID")]
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long = "icon-url")]
        icon_url: Option<String>,
    },

    #[command(about = "Delete a link")]
    Delete {
        #[arg(help = "Link ID")]
        id: String,
    },
}

pub async fn handle(cmd: LinkCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let links = ctx.links();

    match cmd {
        LinkCommands::List => {
            let all = links.list().await?;
            if all.is_empty() {
                return output_empty_collection(ctx.output, "links", "No links yet");
            }
            match ctx.output {
                OutputFormat::Json => print_json(&json!({ "links": all }))?,
                OutputFormat::Text => print_links(&all),
            }
            Ok(())
        }
        LinkCommands::Add { name, url, description, icon_url } => {
            let link = links
                .create(NewLink {
                    name,
                    description,
                    icon_url,
                    redirect_url: url,
                })
                .await?;
            match ctx.output {
                OutputFormat::Json => print_json(&link)?,
                OutputFormat::Text => {
                    println!("✓ Link '{}' added", link.name);
                    print_link(&link);
                }
            }
            Ok(())
        }
        LinkCommands::Update { id, name, url, description, icon_url } => {
            let patch = LinkPatch {
                name,
                description,
                icon_url,
                redirect_url: url,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update; pass at least one of --name, --url, --description, --icon-url");
            }
            let link = links.update(&id, patch).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&link)?,
                OutputFormat::Text => print_link(&link),
            }
            Ok(())
        }
        LinkCommands::Delete { id } => {
            links.delete(&id).await?;
            output_success(
                ctx.output,
                &format!("Link '{}' deleted", id),
                Some(json!({ "id": id, "deleted": true })),
            )
        }
    }
}
