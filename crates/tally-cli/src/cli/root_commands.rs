use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Query audit entries with filters.
    Logs(LogsArgs),
    /// Full history of one entity.
    Trail(TrailArgs),
    /// Recent actions by one actor.
    Activity(ActivityArgs),
    /// Recent actions performed by admins.
    AdminActions,
    /// Entries flagged for compliance review.
    Review,
    /// Aggregate counts and top actors.
    Stats(StatsArgs),
    /// Recompute freeze checksums.
    Verify(VerifyArgs),
    /// Print the JSON Schema of a response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct LogsArgs {
    /// Actor id
    #[arg(long)]
    pub actor: Option<String>,
    /// Actor type: admin, user, system
    #[arg(long)]
    pub actor_type: Option<String>,
    /// Stream: unified, admin, user
    #[arg(long)]
    pub stream: Option<String>,
    /// Exact action tag (e.g. ORDER_STATUS_CHANGED)
    #[arg(long)]
    pub action: Option<String>,
    /// Entity type (e.g. Order)
    #[arg(long)]
    pub entity_type: Option<String>,
    /// Entity id
    #[arg(long)]
    pub entity_id: Option<String>,
    /// Severity: info, warning, critical
    #[arg(long)]
    pub severity: Option<String>,
    /// Only entries flagged for review
    #[arg(long)]
    pub reviewable: bool,
    /// Substring of the client IP
    #[arg(long)]
    pub ip: Option<String>,
    /// Inclusive lower bound (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Inclusive upper bound (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Entries to skip
    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct TrailArgs {
    /// Entity type (e.g. Order)
    pub entity_type: String,
    /// Entity id
    pub entity_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct ActivityArgs {
    /// Actor id
    pub actor_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct StatsArgs {
    /// Inclusive lower bound (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Inclusive upper bound (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct VerifyArgs {
    /// Verify a single entry instead of the whole log
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name: entry, page, statistics, integrity
    #[arg(default_value = "entry")]
    pub type_name: String,
}
