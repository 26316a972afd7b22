use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActivityArgs;
use crate::commands::shared::limit::configured_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tally activity`.
pub async fn handle(
    args: &ActivityArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = configured_limit(ctx, flags);
    let entries = ctx.service.get_user_activity(&args.actor_id, limit).await?;
    output(&entries, flags.format)
}
