//! Expiration instant computation.
//!
//! An entry expires along two axes: time-to-live counts from creation, and
//! time-to-idle counts from the most recent access (creation if never
//! accessed). The policy combines them into one absolute instant:
//!
//! 1. Unset or eternal lifespans never expire.
//! 2. If TTL is non-zero and TTI is either zero or not yet anchored by an
//!    access, TTL alone decides.
//! 3. If TTL is zero, TTI decides.
//! 4. Otherwise whichever axis fires first decides.
//!
//! Rule 2 must precede rule 4: an entry with no recorded access has a
//! `last_access_time` of 0, which would otherwise be taken as an idle anchor.

use std::time::Duration;

use crate::lifespan::Lifespan;

/// Expiration instant of an entry that never expires.
pub const NEVER: i64 = i64::MAX;

const MILLIS_PER_SEC: i64 = 1_000;

/// Point-in-time view of an entry's expiration inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeMetadata {
    /// When the entry was created, in milliseconds.
    pub creation_time: i64,

    /// When the entry was last read, in milliseconds; 0 if never.
    pub last_access_time: i64,

    /// When the entry was last written, in milliseconds.
    pub last_update_time: i64,

    pub lifespan: Lifespan,
}

/// Stateless expiration rules shared by every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpirationPolicy;

impl ExpirationPolicy {
    /// Absolute instant, in milliseconds, after which the entry is expired.
    ///
    /// Returns [`NEVER`] for unset or eternal lifespans.
    pub fn expiration_time(meta: &TimeMetadata) -> i64 {
        let lifespan = meta.lifespan;
        if !lifespan.is_set() || lifespan.is_eternal() {
            return NEVER;
        }

        let ttl = lifespan.time_to_live();
        let tti = lifespan.time_to_idle();

        let ttl_expiry = meta.creation_time.saturating_add(secs_to_millis(ttl));
        let most_recent = meta.creation_time.max(meta.last_access_time);
        let tti_expiry = most_recent.saturating_add(secs_to_millis(tti));

        if ttl != 0 && (tti == 0 || meta.last_access_time == 0) {
            ttl_expiry
        } else if ttl == 0 {
            tti_expiry
        } else {
            ttl_expiry.min(tti_expiry)
        }
    }

    /// True once `now` is strictly past the expiration instant.
    pub fn is_expired(meta: &TimeMetadata, now: i64) -> bool {
        let lifespan = meta.lifespan;
        if !lifespan.is_set() || lifespan.is_eternal() {
            return false;
        }
        now > Self::expiration_time(meta)
    }

    /// Time remaining before expiry as seen at `now`.
    ///
    /// `None` if the entry never expires; zero once it has expired.
    pub fn time_to_expiry(meta: &TimeMetadata, now: i64) -> Option<Duration> {
        let expires_at = Self::expiration_time(meta);
        if expires_at == NEVER {
            return None;
        }
        let remaining = expires_at.saturating_sub(now).max(0);
        Some(Duration::from_millis(remaining as u64))
    }
}

fn secs_to_millis(secs: u32) -> i64 {
    i64::from(secs) * MILLIS_PER_SEC
}
