//! Address change monitoring.
//!
//! This module decides, once per run, whether the current external address
//! warrants a notification:
//!
//! - `policy`: the pure decision given the stored record and the clock
//! - `cache`: the one-line cache file whose mtime is the "last seen" time
//!
//! `evaluate_and_update` glues the two together and performs the single
//! cache write that a change alert or a reminder implies.

pub mod cache;
pub mod policy;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::debug;

pub use cache::{AddressCache, StoredAddress};
pub use policy::{decide, ActionOutcome, REMINDER_THRESHOLD_SECS};

/// Evaluate `current` against the cache and update the cache as needed.
pub fn evaluate_and_update(current: &str, cache: &AddressCache) -> Result<ActionOutcome> {
    evaluate_and_update_at(current, cache, Utc::now())
}

/// Same as [`evaluate_and_update`] with an explicit clock.
///
/// The cache is written only when the outcome is not [`ActionOutcome::None`],
/// so an unchanged, not-yet-due record keeps its original mtime.
pub fn evaluate_and_update_at(
    current: &str,
    cache: &AddressCache,
    now: DateTime<Utc>,
) -> Result<ActionOutcome> {
    let stored = cache.load()?;
    let outcome = decide(current, stored.as_ref(), now);

    debug!(
        cache = %cache.path().display(),
        stored = stored.as_ref().map(|s| s.address.as_str()),
        written = stored.as_ref().map(|s| s.age_display_at(now)),
        outcome = ?outcome,
        "Evaluated external address"
    );

    if outcome.requires_notification() {
        cache.store(current)?;
    }

    Ok(outcome)
}

// ============================================================================
// Tests
// ============================================================================
