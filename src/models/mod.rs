pub mod location;
pub mod next_prayer;
pub mod prayer;
pub mod schedule;

pub use location::{Coordinates, Location};
pub use next_prayer::{Countdown, NextPrayer};
pub use prayer::PrayerType;
pub use schedule::{PrayerSchedule, ScheduleError};
