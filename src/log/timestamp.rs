use std::time::{Duration, SystemTime, UNIX_EPOCH};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Broken-down UTC wall-clock time used by the date/time decorations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    pub year: i32,
    pub mon: u32,
    pub day: u32,
    /// 0 = Sunday.
    pub wday: u32,
    pub hour: u32,
    pub min: u32,
    pub sec: u32,
    pub msec: u32,
}

impl Timestamp {
    #[must_use]
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Times before the epoch clamp to the epoch.
    #[must_use]
    pub fn from_system_time(t: SystemTime) -> Self {
        let since = t.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self::from_unix(since)
    }

    #[must_use]
    pub fn from_unix(since_epoch: Duration) -> Self {
        let secs = since_epoch.as_secs();
        let (year, mon, day) = civil_from_days(secs / 86_400);
        let tod = secs % 86_400;
        Self {
            year,
            mon,
            day,
            // 1970-01-01 was a Thursday.
            wday: ((secs / 86_400 + 4) % 7) as u32,
            hour: (tod / 3_600) as u32,
            min: (tod / 60 % 60) as u32,
            sec: (tod % 60) as u32,
            msec: since_epoch.subsec_millis(),
        }
    }

    #[must_use]
    pub fn day_name(&self) -> &'static str {
        DAY_NAMES[(self.wday % 7) as usize]
    }

    /// Year clamped to the four digits the `YEAR` field has room for.
    #[must_use]
    pub fn year_4(&self) -> i32 {
        self.year.clamp(0, 9_999)
    }
}

/// Days since 1970-01-01 to a Gregorian (year, month, day).
#[allow(clippy::many_single_char_names)]
fn civil_from_days(days: u64) -> (i32, u32, u32) {
    // Use i128 to prevent overflow during intermediate calculations.
    let z: i128 = i128::from(days) + 719_468;

    let era = z / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = mp + if mp < 10 { 3 } else { -9 }; // [1, 12]

    let year = i32::try_from(y + i128::from(m <= 2)).unwrap_or(i32::MAX);
    (year, m as u32, d as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_thursday_first_of_january() {
        let ts = Timestamp::from_unix(Duration::ZERO);
        assert_eq!((ts.year, ts.mon, ts.day), (1970, 1, 1));
        assert_eq!(ts.day_name(), "Thu");
        assert_eq!((ts.hour, ts.min, ts.sec, ts.msec), (0, 0, 0, 0));
    }

    #[test]
    fn breaks_down_known_instant() {
        // 2024-02-29T13:45:07.089Z
        let ts = Timestamp::from_unix(Duration::from_millis(1_709_214_307_089));
        assert_eq!((ts.year, ts.mon, ts.day), (2024, 2, 29));
        assert_eq!((ts.hour, ts.min, ts.sec, ts.msec), (13, 45, 7, 89));
        assert_eq!(ts.day_name(), "Thu");
    }

    #[test]
    fn year_is_clamped_to_four_digits() {
        let ts = Timestamp {
            year: 12_345,
            mon: 1,
            day: 1,
            wday: 0,
            hour: 0,
            min: 0,
            sec: 0,
            msec: 0,
        };
        assert_eq!(ts.year_4(), 9_999);
    }
}
