use crate::cli::GlobalFlags;
use crate::cli::root_commands::TrailArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tally trail`.
pub async fn handle(args: &TrailArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = ctx
        .service
        .get_entity_audit_trail(&args.entity_type, &args.entity_id)
        .await?;
    output(&entries, flags.format)
}
