use chrono::{DateTime, Duration, Utc};

use super::StoredAddress;

/// Send a reminder once an unchanged address has gone this long without one
/// (599,400 s, just under a week).
pub const REMINDER_THRESHOLD_SECS: i64 = 599_400;

/// What a single run should do about the current address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Address unchanged and the last notification is recent
    None,
    /// Address unchanged but the reminder interval has elapsed
    Reminder,
    /// Address differs from the cached one, or nothing was cached yet
    ChangeAlert,
}

impl ActionOutcome {
    pub fn requires_notification(&self) -> bool {
        !matches!(self, ActionOutcome::None)
    }
}

pub fn reminder_threshold() -> Duration {
    Duration::seconds(REMINDER_THRESHOLD_SECS)
}

/// Decide the outcome for `current` given the cached record, without touching disk.
///
/// A missing record counts as a change so the first run always notifies.
pub fn decide(current: &str, stored: Option<&StoredAddress>, now: DateTime<Utc>) -> ActionOutcome {
    match stored {
        None => ActionOutcome::ChangeAlert,
        Some(stored) if stored.address != current => ActionOutcome::ChangeAlert,
        Some(stored) if stored.age_at(now) >= reminder_threshold() => ActionOutcome::Reminder,
        Some(_) => ActionOutcome::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(address: &str, age: Duration, now: DateTime<Utc>) -> StoredAddress {
        StoredAddress {
            address: address.to_string(),
            modified_at: now - age,
        }
    }

    #[test]
    fn test_threshold_is_599400_seconds() {
        assert_eq!(REMINDER_THRESHOLD_SECS, 599_400);
    }

    #[test]
    fn test_decide_no_record() {
        let now = Utc::now();
        assert_eq!(decide("1.2.3.4", None, now), ActionOutcome::ChangeAlert);
    }

    #[test]
    fn test_decide_scenarios() {
        let now = Utc::now();

        let hour_old = stored("1.2.3.4", Duration::hours(1), now);
        assert_eq!(decide("1.2.3.4", Some(&hour_old), now), ActionOutcome::None);

        let week_old = stored("1.2.3.4", Duration::days(7), now);
        assert_eq!(decide("1.2.3.4", Some(&week_old), now), ActionOutcome::Reminder);

        assert_eq!(decide("5.6.7.8", Some(&hour_old), now), ActionOutcome::ChangeAlert);
        assert_eq!(decide("5.6.7.8", Some(&week_old), now), ActionOutcome::ChangeAlert);
    }

    #[test]
    fn test_decide_threshold_boundary() {
        let now = Utc::now();

        let at = stored("1.2.3.4", Duration::seconds(599_400), now);
        assert_eq!(decide("1.2.3.4", Some(&at), now), ActionOutcome::Reminder);

        let just_under = stored("1.2.3.4", Duration::seconds(599_399), now);
        assert_eq!(decide("1.2.3.4", Some(&just_under), now), ActionOutcome::None);
    }

    #[test]
    fn test_decide_future_mtime_is_none() {
        // Clock skew: record appears to be from the future
        let now = Utc::now();
        let skewed = stored("1.2.3.4", Duration::hours(-2), now);
        assert_eq!(decide("1.2.3.4", Some(&skewed), now), ActionOutcome::None);
    }

    #[test]
    fn test_requires_notification() {
        assert!(!ActionOutcome::None.requires_notification());
        assert!(ActionOutcome::Reminder.requires_notification());
        assert!(ActionOutcome::ChangeAlert.requires_notification());
    }
}
