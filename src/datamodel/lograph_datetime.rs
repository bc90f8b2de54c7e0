pub type LographDateTime = hifitime::Epoch;

use hifitime::{UNIX_REF_EPOCH, Unit};

pub trait LographDateTimeExt {
    fn from_unix_seconds_i64(timestamp: i64) -> Self;
    fn to_unix_seconds_i64(&self) -> i64;
}

impl LographDateTimeExt for LographDateTime {
    fn from_unix_seconds_i64(timestamp: i64) -> Self {
        Self::from_utc_duration(UNIX_REF_EPOCH.to_utc_duration() + timestamp * Unit::Second)
    }

    fn to_unix_seconds_i64(&self) -> i64 {
        self.to_unix_seconds().floor() as i64
    }
}
