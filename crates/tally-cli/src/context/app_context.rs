use anyhow::Context;
use tally_config::TallyConfig;
use tally_db::service::AuditService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: AuditService,
    pub config: TallyConfig,
}

impl AppContext {
    /// Open the audit database named by the configuration.
    pub async fn init(config: TallyConfig) -> anyhow::Result<Self> {
        let service = AuditService::from_config(&config)
            .await
            .with_context(|| {
                format!(
                    "failed to open audit database at {}",
                    config.database.path
                )
            })?;
        Ok(Self { service, config })
    }
}
