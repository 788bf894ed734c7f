use chrono::{DateTime, DurationRound, Utc};

/// Current time truncated to the microsecond precision Postgres `TIMESTAMPTZ` keeps.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(chrono::Duration::microseconds(1))
        .unwrap_or(now)
}
