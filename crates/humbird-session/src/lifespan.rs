//! Time-to-live / time-to-idle pair.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Largest lifespan accepted on either axis, in seconds.
pub const MAX_LIFESPAN_SECS: u32 = i32::MAX as u32;

/// Lifespan of an entry along two independent axes.
///
/// `None` means the axis is not configured. `Some(0)` is a configured value
/// meaning the axis never fires. Both read back as 0 through
/// [`time_to_live`](Self::time_to_live) and [`time_to_idle`](Self::time_to_idle),
/// but only `Some` counts toward [`is_set`](Self::is_set).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifespan {
    /// Seconds from creation before the entry expires.
    pub ttl: Option<u32>,

    /// Seconds since the last access (or creation) before the entry expires.
    pub tti: Option<u32>,
}

impl Lifespan {
    /// Neither axis configured.
    pub const UNSET: Lifespan = Lifespan {
        ttl: None,
        tti: None,
    };

    /// Both axes explicitly configured to never fire.
    pub fn eternal() -> Self {
        Self {
            ttl: Some(0),
            tti: Some(0),
        }
    }

    /// Only the time-to-live axis configured.
    pub fn ttl(secs: u32) -> Self {
        Self {
            ttl: Some(secs),
            tti: None,
        }
    }

    /// Only the time-to-idle axis configured.
    pub fn tti(secs: u32) -> Self {
        Self {
            ttl: None,
            tti: Some(secs),
        }
    }

    pub fn with_ttl(mut self, secs: u32) -> Self {
        self.ttl = Some(secs);
        self
    }

    pub fn with_tti(mut self, secs: u32) -> Self {
        self.tti = Some(secs);
        self
    }

    /// Effective time-to-live in seconds; unset reads as 0.
    pub fn time_to_live(&self) -> u32 {
        self.ttl.unwrap_or(0)
    }

    /// Effective time-to-idle in seconds; unset reads as 0.
    pub fn time_to_idle(&self) -> u32 {
        self.tti.unwrap_or(0)
    }

    /// True if either axis has been configured, including to 0.
    pub fn is_set(&self) -> bool {
        self.ttl.is_some() || self.tti.is_some()
    }

    /// True if neither axis can ever fire.
    pub fn is_eternal(&self) -> bool {
        self.time_to_live() == 0 && self.time_to_idle() == 0
    }
}

/// Validate a caller-supplied seconds count for `field`.
pub(crate) fn checked_seconds(field: &'static str, secs: i64) -> Result<u32> {
    if secs < 0 {
        warn!(field, secs, "rejected negative lifespan");
        return Err(Error::InvalidArgument {
            field,
            value: secs,
            reason: "can't be negative",
        });
    }
    if secs > i64::from(MAX_LIFESPAN_SECS) {
        warn!(field, secs, "rejected oversized lifespan");
        return Err(Error::InvalidArgument {
            field,
            value: secs,
            reason: "exceeds the 32-bit seconds range",
        });
    }
    Ok(secs as u32)
}
