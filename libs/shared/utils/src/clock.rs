use chrono::{DateTime, FixedOffset, Utc};

/// Fixed clinic UTC offset (Buenos Aires, no daylight saving). Pinning the
/// offset instead of resolving an IANA zone per request keeps local-day
/// boundaries and the lead-time rule unambiguous for a single-locale clinic.
pub const CLINIC_UTC_OFFSET_HOURS: i32 = -3;

pub fn clinic_offset() -> FixedOffset {
    FixedOffset::east_opt(CLINIC_UTC_OFFSET_HOURS * 3600).unwrap()
}

/// Wall-clock source. The availability lead-time rule depends on "now", so
/// services take the clock as a dependency instead of calling `Utc::now()`
/// inline; tests pin it with `FixedClock`.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock frozen at a single instant.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 16, 14, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now_utc(), instant);
        assert_eq!(clock.now_utc(), instant);
    }
}
