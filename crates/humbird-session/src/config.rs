//! Store-wide default lifespans.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lifespan::{Lifespan, MAX_LIFESPAN_SECS};

/// Default lifespans applied to entries a store creates.
///
/// Can be embedded directly or loaded from TOML, either as top-level keys or
/// under a `[session]` table:
///
/// ```toml
/// [session]
/// default_ttl_secs = 3600
/// default_tti_secs = 600
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifespanConfig {
    /// Default time-to-live in seconds. Unset means entries carry no TTL.
    pub default_ttl_secs: Option<u32>,

    /// Default time-to-idle in seconds. Unset means entries carry no TTI.
    pub default_tti_secs: Option<u32>,
}

#[derive(Deserialize)]
struct SessionTable {
    session: LifespanConfig,
}

impl LifespanConfig {
    /// Create a configuration with no defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration whose entries never expire.
    pub fn eternal() -> Self {
        Self {
            default_ttl_secs: Some(0),
            default_tti_secs: Some(0),
        }
    }

    /// Set the default time-to-live.
    pub fn with_default_ttl(mut self, secs: u32) -> Self {
        self.default_ttl_secs = Some(secs);
        self
    }

    /// Set the default time-to-idle.
    pub fn with_default_tti(mut self, secs: u32) -> Self {
        self.default_tti_secs = Some(secs);
        self
    }

    /// The lifespan new entries start with.
    pub fn lifespan(&self) -> Lifespan {
        Lifespan {
            ttl: self.default_ttl_secs,
            tti: self.default_tti_secs,
        }
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let value: toml::Table = toml::from_str(toml_str)?;
        let config = if value.contains_key("session") {
            toml::from_str::<SessionTable>(toml_str)?.session
        } else {
            toml::from_str::<LifespanConfig>(toml_str)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("default_ttl_secs", self.default_ttl_secs),
            ("default_tti_secs", self.default_tti_secs),
        ] {
            if let Some(secs) = secs
                && secs > MAX_LIFESPAN_SECS
            {
                return Err(Error::InvalidConfig(format!(
                    "{name} = {secs} exceeds {MAX_LIFESPAN_SECS}"
                )));
            }
        }
        Ok(())
    }
}
