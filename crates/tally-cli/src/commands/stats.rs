use crate::cli::GlobalFlags;
use crate::cli::root_commands::StatsArgs;
use crate::commands::shared::parse::{Bound, parse_optional_bound};
use crate::context::AppContext;
use crate::output::output;

/// Handle `tally stats`.
pub async fn handle(args: &StatsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let from = parse_optional_bound(args.from.as_deref(), "from", Bound::Start)?;
    let to = parse_optional_bound(args.to.as_deref(), "to", Bound::End)?;
    if let (Some(from), Some(to)) = (from, to) {
        anyhow::ensure!(from <= to, "--from must not be after --to");
    }

    let stats = ctx.service.get_audit_statistics(from, to).await?;
    output(&stats, flags.format)
}
