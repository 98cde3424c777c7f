use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::CliContext;

pub async fn handle(ctx: &CliContext) -> anyhow::Result<()> {
    ctx.store.initialize().await?;
    let settings = ctx.store.get_settings().await?;

    output_success(
        ctx.output,
        "Storage initialized",
        Some(json!({ "settings": settings })),
    )
}
