use serde::Serialize;
use tally_core::responses::IntegrityStatus;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::VerifyArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct EntryVerification<'a> {
    id: &'a str,
    status: IntegrityStatus,
}

/// Handle `tally verify`.
///
/// Exits non-zero when any checked entry is tampered.
pub async fn handle(args: &VerifyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if ctx.service.checksum().is_insecure() {
        tracing::warn!("verifying with the insecure development salt");
    }

    if let Some(id) = &args.id {
        let status = ctx.service.verify_entry(id).await?;
        output(&EntryVerification { id, status }, flags.format)?;
        anyhow::ensure!(status == IntegrityStatus::Intact, "audit entry {id} failed verification");
        return Ok(());
    }

    let report = ctx.service.verify_all().await?;
    output(&report, flags.format)?;
    anyhow::ensure!(
        report.is_intact(),
        "{} of {} audit entries failed verification",
        report.tampered.len(),
        report.checked
    );
    Ok(())
}
