//! Minute rounding of displayed times.

use chrono::{DateTime, TimeDelta, Utc};

use crate::definition::Rounding;

/// Round `t` to a whole minute under `policy`.
///
/// Seconds are floored; one minute is added when more than 40 seconds
/// remain, or more than 20 under [`Rounding::Later`]. Exact instants are
/// returned unchanged.
pub fn round_instant(t: DateTime<Utc>, policy: Rounding) -> DateTime<Utc> {
    if policy == Rounding::Exact {
        return t;
    }
    let secs = t.timestamp().rem_euclid(60);
    let floored = t
        - TimeDelta::seconds(secs)
        - TimeDelta::nanoseconds(i64::from(t.timestamp_subsec_nanos()));
    let up = secs > 40 || (secs > 20 && policy == Rounding::Later);
    if up { floored + TimeDelta::minutes(1) } else { floored }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use proptest::prelude::*;

    fn at(m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 23, 17, m, s).unwrap()
    }

    #[test]
    fn thresholds() {
        assert_eq!(round_instant(at(10, 20), Rounding::Later), at(10, 0));
        assert_eq!(round_instant(at(10, 21), Rounding::Later), at(11, 0));
        assert_eq!(round_instant(at(10, 40), Rounding::Earlier), at(10, 0));
        assert_eq!(round_instant(at(10, 41), Rounding::Earlier), at(11, 0));
        assert_eq!(round_instant(at(10, 30), Rounding::Earlier), at(10, 0));
        assert_eq!(round_instant(at(59, 50), Rounding::Earlier).hour(), 18);
        assert_eq!(round_instant(at(10, 30), Rounding::Exact), at(10, 30));
    }

    #[test]
    fn drops_subsecond_part() {
        let t = at(10, 5) + TimeDelta::milliseconds(700);
        assert_eq!(round_instant(t, Rounding::Earlier), at(10, 0));
    }

    proptest! {
        #[test]
        fn idempotent(secs in 0i64..86_400 * 365, later in any::<bool>()) {
            let policy = if later { Rounding::Later } else { Rounding::Earlier };
            let t = at(0, 0) + TimeDelta::seconds(secs);
            let once = round_instant(t, policy);
            prop_assert_eq!(once.second(), 0);
            prop_assert_eq!(round_instant(once, policy), once);
            prop_assert!((once - t).num_seconds().abs() <= 40);
        }
    }
}
