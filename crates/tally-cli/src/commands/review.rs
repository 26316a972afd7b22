use crate::cli::GlobalFlags;
use crate::commands::shared::limit::configured_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tally review`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = configured_limit(ctx, flags);
    let entries = ctx.service.get_reviewable_entries(limit).await?;
    output(&entries, flags.format)
}
