use chrono::NaiveTime;
use thiserror::Error;

use crate::models::PrayerType;
use crate::utils::format::{parse_time_of_day, FormatError};

/// Static schedule shown when no live data is available.
pub const FALLBACK_TIMES: [(PrayerType, &str); 5] = [
    (PrayerType::Fajr, "04:45"),
    (PrayerType::Dhuhr, "12:10"),
    (PrayerType::Asr, "15:30"),
    (PrayerType::Maghrib, "18:45"),
    (PrayerType::Isha, "20:15"),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{prayer:?}: {source}")]
    BadTime {
        prayer: PrayerType,
        #[source]
        source: FormatError,
    },
    #[error("{later:?} is not after {earlier:?}")]
    OutOfOrder {
        earlier: PrayerType,
        later: PrayerType,
    },
}

/// The five daily prayer times, strictly increasing from Fajr to Isha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerSchedule {
    times: [NaiveTime; 5],
}

impl PrayerSchedule {
    /// `times` is indexed by `PrayerType::index`.
    pub fn new(times: [NaiveTime; 5]) -> Result<Self, ScheduleError> {
        for pair in PrayerType::ALL.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            if times[later.index()] <= times[earlier.index()] {
                return Err(ScheduleError::OutOfOrder { earlier, later });
            }
        }
        Ok(Self { times })
    }

    /// Build from "HH:MM" strings looked up per prayer.
    pub fn from_strings<'a, F>(mut lookup: F) -> Result<Self, ScheduleError>
    where
        F: FnMut(PrayerType) -> &'a str,
    {
        let mut times = [NaiveTime::MIN; 5];
        for prayer in PrayerType::ALL {
            times[prayer.index()] = parse_time_of_day(lookup(prayer))
                .map_err(|source| ScheduleError::BadTime { prayer, source })?;
        }
        Self::new(times)
    }

    pub fn fallback() -> Self {
        let mut times = [NaiveTime::MIN; 5];
        for (prayer, s) in FALLBACK_TIMES {
            if let Ok(t) = parse_time_of_day(s) {
                times[prayer.index()] = t;
            }
        }
        Self { times }
    }

    pub fn time(&self, prayer: PrayerType) -> NaiveTime {
        self.times[prayer.index()]
    }

    /// Prayers with their times, in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (PrayerType, NaiveTime)> + '_ {
        PrayerType::ALL.iter().map(move |p| (*p, self.time(*p)))
    }
}
