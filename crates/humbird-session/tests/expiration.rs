//! End-to-end expiration scenarios driven through the public API.

use std::sync::Arc;
use std::thread;

use humbird_session::{Clock, Entry, Error, LifespanConfig, ManualClock, NEVER};

const T0: i64 = 1_700_000_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("humbird_session=trace")
        .try_init();
}

fn new_entry(clock: &Arc<ManualClock>) -> Entry<String, u64> {
    Entry::with_clock("session-1".to_string(), 0, clock.clone())
}

#[test]
fn test_unset_lifespan_never_expires() {
    init_tracing();
    let clock = Arc::new(ManualClock::new(T0));
    let entry = new_entry(&clock);

    for now in [T0, T0 + 1, T0 + 86_400_000, NEVER] {
        assert!(!entry.is_expired(now));
    }
}

#[test]
fn test_ttl_only_boundaries() {
    init_tracing();
    let clock = Arc::new(ManualClock::new(T0));
    let entry = new_entry(&clock);
    entry.set_time_to_live(10).unwrap();

    assert!(!entry.is_expired(T0 + 9_999));
    assert!(!entry.is_expired(T0 + 10_000));
    assert!(entry.is_expired(T0 + 10_001));
}

#[test]
fn test_tti_only_without_access() {
    init_tracing();
    let clock = Arc::new(ManualClock::new(T0));
    let entry = new_entry(&clock);
    entry.set_time_to_live(0).unwrap();
    entry.set_time_to_idle(5).unwrap();

    assert_eq!(entry.last_access_time(), 0);
    assert!(!entry.is_expired(T0 + 5_000));
    assert!(entry.is_expired(T0 + 5_001));
}

#[test]
fn test_combined_ttl_and_tti() {
    init_tracing();
    let clock = Arc::new(ManualClock::new(T0));
    let entry = new_entry(&clock);
    entry.set_time_to_live(10).unwrap();
    entry.set_time_to_idle(3).unwrap();

    clock.set(T0 + 1_000);
    entry.touch();

    assert_eq!(entry.expiration_time(), T0 + 4_000);
    assert!(!entry.is_expired(T0 + 3_999));
    assert!(entry.is_expired(T0 + 4_001));
}

#[test]
fn test_session_kept_alive_until_ttl() {
    init_tracing();
    let clock = Arc::new(ManualClock::new(T0));
    let entry = new_entry(&clock);
    entry.set_time_to_live(10).unwrap();
    entry.set_time_to_idle(3).unwrap();

    // Touch every two seconds: idle never fires, lifetime still does.
    for _ in 0..4 {
        clock.advance(2_000);
        entry.touch();
        assert!(!entry.is_expired_now());
    }
    clock.set(T0 + 10_001);
    entry.touch();
    assert!(entry.is_expired_now());
}

#[test]
fn test_rejected_ttl_keeps_previous() {
    init_tracing();
    let clock = Arc::new(ManualClock::new(T0));
    let entry = new_entry(&clock);
    entry.set_time_to_live(10).unwrap();

    let err = entry.set_time_to_live(-1).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(entry.time_to_live(), 10);
    assert_eq!(entry.expiration_time(), T0 + 10_000);
}

#[test]
fn test_store_defaults_from_toml() {
    init_tracing();
    let config = LifespanConfig::from_toml(
        r#"
        [session]
        default_ttl_secs = 60
        "#,
    )
    .unwrap();
    let clock = Arc::new(ManualClock::new(T0));
    let entry = Entry::from_config("session-1", 0u64, &config, clock.clone());

    assert!(entry.uses_default_lifespan());
    assert_eq!(entry.expiration_time(), T0 + 60_000);

    entry.set_time_to_live(0).unwrap();
    assert!(!entry.uses_default_lifespan());
    assert!(entry.is_eternal());
}

#[test]
fn test_concurrent_touch_and_update() {
    init_tracing();
    let clock = Arc::new(ManualClock::new(T0));
    let entry = Arc::new(new_entry(&clock));
    entry.set_time_to_idle(1).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let entry = entry.clone();
            let clock = clock.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    clock.advance(1);
                    entry.touch();
                    entry.update(i);
                    let _ = entry.is_expired_now();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let end = T0 + 800;
    assert_eq!(clock.now_millis(), end);
    assert!(entry.last_access_time() > T0);
    assert!(entry.last_access_time() <= end);
    assert!(entry.last_update_time() <= end);
    assert!(entry.value() < 8);
    assert!(!entry.is_expired(entry.last_access_time() + 1_000));
}
