//! Audit trail configuration: the checksum salt.

use serde::{Deserialize, Serialize};
use tally_core::checksum::ChecksumGenerator;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Server-side secret mixed into every freeze checksum.
    /// Never sent to clients. Also read from the legacy `AUDIT_SALT` variable.
    #[serde(default)]
    pub salt: String,

    /// Refuse to start without a salt instead of falling back to the
    /// development default.
    #[serde(default)]
    pub require_salt: bool,
}

impl AuditConfig {
    /// Check if a deployment-specific salt is set.
    pub fn has_salt(&self) -> bool {
        !self.salt.trim().is_empty()
    }

    /// Startup validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `require_salt` is set and no
    /// salt is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.require_salt && !self.has_salt() {
            return Err(ConfigError::NotConfigured {
                section: "audit.salt".into(),
            });
        }
        Ok(())
    }

    /// Build the checksum generator for this configuration.
    ///
    /// Falls back to the insecure development salt when none is set; check
    /// [`ChecksumGenerator::is_insecure`] to warn about it.
    ///
    /// # Errors
    ///
    /// Returns the [`AuditConfig::validate`] error in strict mode.
    pub fn checksum_generator(&self) -> Result<ChecksumGenerator, ConfigError> {
        self.validate()?;
        if self.has_salt() {
            Ok(ChecksumGenerator::new(self.salt.clone()))
        } else {
            Ok(ChecksumGenerator::insecure_default())
        }
    }
}
