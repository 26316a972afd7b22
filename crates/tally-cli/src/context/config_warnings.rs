use tally_config::{LEGACY_SALT_VAR, TallyConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TallyConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TallyConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.audit.has_salt() {
        if has_env_prefix(&env_keys, "TALLY_AUDIT") {
            warnings.push(
                "Audit salt appears unset while TALLY_AUDIT* env vars exist. Use double underscores (example: TALLY_AUDIT__SALT)."
                    .to_string(),
            );
        } else if env_keys.iter().any(|key| key == LEGACY_SALT_VAR) {
            warnings.push(format!("{LEGACY_SALT_VAR} is set but empty."));
        }
    }

    if config.database.path == tally_config::DatabaseConfig::default().path
        && has_env_prefix(&env_keys, "TALLY_DATABASE")
    {
        warnings.push(
            "Database path appears default while TALLY_DATABASE* env vars exist. Use double underscores (example: TALLY_DATABASE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use tally_config::{AuditConfig, TallyConfig};

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let config = TallyConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("TALLY_AUDIT_SALT".to_string(), "pepper".to_string()),
                ("TALLY_DATABASE_PATH".to_string(), "/tmp/a.db".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn warns_for_empty_legacy_salt() {
        let config = TallyConfig::default();
        let warnings =
            collect_unconfigured_warnings(&config, vec![("AUDIT_SALT".to_string(), String::new())]);
        assert_eq!(warnings, vec!["AUDIT_SALT is set but empty.".to_string()]);
    }

    #[test]
    fn does_not_warn_when_configured() {
        let config = TallyConfig {
            audit: AuditConfig {
                salt: "pepper".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![("TALLY_AUDIT__SALT".to_string(), "pepper".to_string())],
        );

        assert!(warnings.is_empty());
    }
}
