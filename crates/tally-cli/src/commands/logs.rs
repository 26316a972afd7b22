use tally_core::enums::{ActorType, AuditStream, Severity};
use tally_core::responses::AuditPage;
use tally_db::repos::query::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogsArgs;
use crate::commands::shared::limit::configured_limit;
use crate::commands::shared::parse::{Bound, parse_enum, parse_optional_bound};
use crate::context::AppContext;
use crate::output::output;

/// Handle `tally logs`.
pub async fn handle(args: &LogsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(args, configured_limit(ctx, flags))?;
    let page: AuditPage = ctx.service.get_audit_logs(&filter).await?;
    output(&page, flags.format)
}

fn build_filter(args: &LogsArgs, limit: u32) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        actor_id: args.actor.clone(),
        actor_type: args
            .actor_type
            .as_deref()
            .map(|value| parse_enum::<ActorType>(value, "actor-type"))
            .transpose()?,
        stream: args
            .stream
            .as_deref()
            .map(|value| parse_enum::<AuditStream>(value, "stream"))
            .transpose()?,
        action: args.action.clone(),
        entity_type: args.entity_type.clone(),
        entity_id: args.entity_id.clone(),
        severity: args
            .severity
            .as_deref()
            .map(|value| parse_enum::<Severity>(value, "severity"))
            .transpose()?,
        reviewable: args.reviewable.then_some(true),
        ip_contains: args.ip.clone(),
        from: parse_optional_bound(args.from.as_deref(), "from", Bound::Start)?,
        to: parse_optional_bound(args.to.as_deref(), "to", Bound::End)?,
        offset: args.offset,
        limit: Some(limit),
    })
}
