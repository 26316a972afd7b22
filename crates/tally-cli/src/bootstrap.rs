use anyhow::Context;
use tally_config::TallyConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, layered configuration, and apply CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TallyConfig> {
    let mut config = TallyConfig::load_with_dotenv().context("failed to load tally configuration")?;
    apply_overrides(&mut config, flags);
    config.validate().context("invalid tally configuration")?;
    Ok(config)
}

fn apply_overrides(config: &mut TallyConfig, flags: &GlobalFlags) {
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
    }
}
