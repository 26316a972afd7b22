use crate::cli::GlobalFlags;
use crate::context::AppContext;

/// Global `--limit`, else `general.default_limit`.
#[must_use]
pub fn configured_limit(ctx: &AppContext, flags: &GlobalFlags) -> u32 {
    resolve_limit(flags.limit, ctx.config.general.default_limit)
}

const fn resolve_limit(flag: Option<u32>, default_limit: u32) -> u32 {
    match flag {
        Some(limit) => limit,
        None => default_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_limit;

    #[test]
    fn flag_overrides_configured_default() {
        assert_eq!(resolve_limit(Some(10), 50), 10);
    }

    #[test]
    fn configured_default_used_without_flag() {
        assert_eq!(resolve_limit(None, 50), 50);
    }
}
