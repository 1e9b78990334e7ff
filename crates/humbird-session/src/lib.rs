//! Session entries with time-to-live and time-to-idle expiration.
//!
//! This crate provides the expiration side of a session or cache store:
//! - [`Entry`]: a keyed value with creation, access, and update stamps
//! - [`Lifespan`]: TTL/TTI pair that tells "not configured" apart from 0
//! - [`ExpirationPolicy`]: pure rules turning an entry's metadata into an
//!   absolute expiration instant
//! - [`Clock`]: the time source, swappable for tests
//!
//! Storage and eviction belong to the owning store, which calls
//! [`Entry::is_expired`] on access and removes the entry itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use humbird_session::Entry;
//!
//! let entry = Entry::new("session-1", "payload");
//! entry.set_time_to_live(3600)?;
//! entry.set_time_to_idle(600)?;
//!
//! entry.touch();
//! if entry.is_expired_now() {
//!     store.remove(entry.key());
//! }
//! ```

mod clock;
mod config;
mod entry;
mod error;
mod lifespan;
mod policy;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LifespanConfig;
pub use entry::Entry;
pub use error::{Error, Result};
pub use lifespan::{Lifespan, MAX_LIFESPAN_SECS};
pub use policy::{ExpirationPolicy, NEVER, TimeMetadata};
