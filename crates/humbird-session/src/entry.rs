//! Session entry with expiration metadata.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::LifespanConfig;
use crate::error::Result;
use crate::lifespan::{Lifespan, checked_seconds};
use crate::policy::{ExpirationPolicy, TimeMetadata};

/// Lifespan plus whether it still reflects the store default.
///
/// Kept under one lock so a reader never pairs a fresh TTL with a stale TTI.
#[derive(Debug, Clone, Copy)]
struct LifespanState {
    lifespan: Lifespan,
    uses_default: bool,
}

/// A keyed value owned by a cache or session store, with the timestamps and
/// lifespan needed to decide when it should be evicted.
///
/// Access and update stamps are atomics so the read path stays lock-free.
/// The entry never removes itself; the owning store asks
/// [`is_expired`](Self::is_expired) and acts on the answer.
pub struct Entry<K, V> {
    key: K,
    value: RwLock<V>,
    creation_time: i64,
    last_access_time: AtomicI64,
    last_update_time: AtomicI64,
    lifespan: RwLock<LifespanState>,
    default_lifespan: u32,
    clock: Arc<dyn Clock>,
}

impl<K, V> Entry<K, V> {
    /// Create an entry with no lifespan configured, stamped by the system clock.
    pub fn new(key: K, value: V) -> Self {
        Self::with_clock(key, value, Arc::new(SystemClock))
    }

    /// Create an entry whose TTL is seeded from a store default.
    ///
    /// A default of 0 leaves the TTL unconfigured.
    pub fn with_default_lifespan(key: K, value: V, default_secs: u32) -> Self {
        Self::with_default_lifespan_and_clock(key, value, default_secs, Arc::new(SystemClock))
    }

    /// Create an entry with no lifespan configured, stamped by `clock`.
    pub fn with_clock(key: K, value: V, clock: Arc<dyn Clock>) -> Self {
        Self::build(key, value, Lifespan::UNSET, 0, clock)
    }

    /// Like [`with_default_lifespan`](Self::with_default_lifespan), stamped by `clock`.
    pub fn with_default_lifespan_and_clock(
        key: K,
        value: V,
        default_secs: u32,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let lifespan = seeded_lifespan(default_secs);
        Self::build(key, value, lifespan, default_secs, clock)
    }

    /// Create an entry carrying the store-wide defaults from `config`.
    pub fn from_config(
        key: K,
        value: V,
        config: &LifespanConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let lifespan = config.lifespan();
        Self::build(key, value, lifespan, lifespan.time_to_live(), clock)
    }

    fn build(
        key: K,
        value: V,
        lifespan: Lifespan,
        default_secs: u32,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now_millis();
        Self {
            key,
            value: RwLock::new(value),
            creation_time: now,
            last_access_time: AtomicI64::new(0),
            last_update_time: AtomicI64::new(now),
            lifespan: RwLock::new(LifespanState {
                lifespan,
                uses_default: true,
            }),
            default_lifespan: default_secs,
            clock,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Clone of the current value.
    pub fn value(&self) -> V
    where
        V: Clone,
    {
        self.value.read().clone()
    }

    /// Run `f` against the current value without cloning it.
    pub fn with_value<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.value.read())
    }

    /// Record a read at the current instant.
    pub fn touch(&self) {
        let now = self.clock.now_millis();
        self.last_access_time.store(now, Ordering::Release);
        trace!(now, "entry touched");
    }

    /// Replace the value and record a write. Returns the previous value.
    pub fn update(&self, value: V) -> V {
        let now = self.clock.now_millis();
        let previous = std::mem::replace(&mut *self.value.write(), value);
        self.last_update_time.store(now, Ordering::Release);
        trace!(now, "entry updated");
        previous
    }

    /// Set the time-to-live in seconds; 0 disables this axis.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// on a negative value, leaving the entry unchanged.
    pub fn set_time_to_live(&self, secs: i64) -> Result<()> {
        let secs = checked_seconds("timeToLive", secs)?;
        let mut state = self.lifespan.write();
        state.lifespan.ttl = Some(secs);
        state.uses_default = false;
        debug!(ttl = secs, "time to live set");
        Ok(())
    }

    /// Set the time-to-idle in seconds; 0 disables this axis.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// on a negative value, leaving the entry unchanged.
    pub fn set_time_to_idle(&self, secs: i64) -> Result<()> {
        let secs = checked_seconds("timeToIdle", secs)?;
        let mut state = self.lifespan.write();
        state.lifespan.tti = Some(secs);
        state.uses_default = false;
        debug!(tti = secs, "time to idle set");
        Ok(())
    }

    /// Replace both axes at once.
    pub fn set_lifespan(&self, lifespan: Lifespan) {
        let mut state = self.lifespan.write();
        state.lifespan = lifespan;
        state.uses_default = false;
        debug!(ttl = ?lifespan.ttl, tti = ?lifespan.tti, "lifespan set");
    }

    pub fn creation_time(&self) -> i64 {
        self.creation_time
    }

    /// Last read instant; 0 if never read.
    pub fn last_access_time(&self) -> i64 {
        self.last_access_time.load(Ordering::Acquire)
    }

    pub fn last_update_time(&self) -> i64 {
        self.last_update_time.load(Ordering::Acquire)
    }

    /// Configured time-to-live in seconds; 0 if unset.
    pub fn time_to_live(&self) -> u32 {
        self.lifespan.read().lifespan.time_to_live()
    }

    /// Configured time-to-idle in seconds; 0 if unset.
    pub fn time_to_idle(&self) -> u32 {
        self.lifespan.read().lifespan.time_to_idle()
    }

    pub fn lifespan(&self) -> Lifespan {
        self.lifespan.read().lifespan
    }

    /// True until either axis is set explicitly on this entry.
    pub fn uses_default_lifespan(&self) -> bool {
        self.lifespan.read().uses_default
    }

    /// Default lifespan in seconds this entry was created with; 0 if none.
    pub fn default_lifespan(&self) -> u32 {
        self.default_lifespan
    }

    pub fn is_lifespan_set(&self) -> bool {
        self.lifespan().is_set()
    }

    pub fn is_eternal(&self) -> bool {
        self.lifespan().is_eternal()
    }

    /// Snapshot of every input the expiration policy reads.
    pub fn metadata(&self) -> TimeMetadata {
        TimeMetadata {
            creation_time: self.creation_time,
            last_access_time: self.last_access_time(),
            last_update_time: self.last_update_time(),
            lifespan: self.lifespan(),
        }
    }

    /// Absolute expiration instant in milliseconds, or
    /// [`NEVER`](crate::NEVER) if the entry does not expire.
    pub fn expiration_time(&self) -> i64 {
        ExpirationPolicy::expiration_time(&self.metadata())
    }

    /// Whether the entry is expired as of `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        ExpirationPolicy::is_expired(&self.metadata(), now)
    }

    /// Whether the entry is expired according to its own clock.
    pub fn is_expired_now(&self) -> bool {
        self.is_expired(self.clock.now_millis())
    }

    /// Time left before expiry as of `now`; `None` if it never expires.
    pub fn time_to_expiry(&self, now: i64) -> Option<Duration> {
        ExpirationPolicy::time_to_expiry(&self.metadata(), now)
    }
}

fn seeded_lifespan(secs: u32) -> Lifespan {
    if secs == 0 {
        Lifespan::UNSET
    } else {
        Lifespan::ttl(secs)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &*self.value.read())
            .field("metadata", &self.metadata())
            .field("uses_default_lifespan", &self.uses_default_lifespan())
            .finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry{{key='{}', value='{}'}}", self.key, self.value.read())
    }
}
