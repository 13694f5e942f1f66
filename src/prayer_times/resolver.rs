use chrono::{Days, NaiveDateTime};

use crate::models::{Countdown, NextPrayer, PrayerSchedule, PrayerType};

/// Find the next prayer after `now`.
///
/// A prayer whose time equals `now` counts as passed. After Isha the answer
/// is tomorrow's Fajr, anchored to the next calendar date.
pub fn resolve_next(schedule: &PrayerSchedule, now: NaiveDateTime) -> NextPrayer {
    let today = now.date();

    for (prayer, time) in schedule.iter() {
        let at = today.and_time(time);
        if at > now {
            return NextPrayer {
                prayer,
                time,
                display_name: prayer.display_name(),
                is_tomorrow: false,
                at,
            };
        }
    }

    let fajr = schedule.time(PrayerType::Fajr);
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    NextPrayer {
        prayer: PrayerType::Fajr,
        time: fajr,
        display_name: PrayerType::Fajr.display_name(),
        is_tomorrow: true,
        at: tomorrow.and_time(fajr),
    }
}

/// Next prayer plus the countdown to it.
pub fn resolve_with_countdown(
    schedule: &PrayerSchedule,
    now: NaiveDateTime,
) -> (NextPrayer, Countdown) {
    let next = resolve_next(schedule, now);
    let countdown = Countdown::between(now, next.at);
    (next, countdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn afternoon_picks_asr() {
        let schedule = PrayerSchedule::fallback();
        let (next, countdown) = resolve_with_countdown(&schedule, at(13, 0, 0));
        assert_eq!(next.prayer, PrayerType::Asr);
        assert_eq!(next.time, NaiveTime::from_hms_opt(15, 30, 0).unwrap());
        assert!(!next.is_tomorrow);
        assert_eq!(countdown.to_string(), "02:30:00");
    }

    #[test]
    fn after_isha_rolls_to_tomorrow_fajr() {
        let schedule = PrayerSchedule::fallback();
        let (next, countdown) = resolve_with_countdown(&schedule, at(21, 0, 0));
        assert_eq!(next.prayer, PrayerType::Fajr);
        assert!(next.is_tomorrow);
        assert_eq!(next.at.date(), NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        assert_eq!(countdown.to_string(), "07:45:00");
    }

    #[test]
    fn before_fajr_is_today() {
        let schedule = PrayerSchedule::fallback();
        let next = resolve_next(&schedule, at(0, 30, 0));
        assert_eq!(next.prayer, PrayerType::Fajr);
        assert!(!next.is_tomorrow);
    }

    #[test]
    fn prayer_at_exactly_now_has_passed() {
        let schedule = PrayerSchedule::fallback();
        assert_eq!(resolve_next(&schedule, at(12, 10, 0)).prayer, PrayerType::Asr);
        assert_eq!(resolve_next(&schedule, at(20, 15, 0)).prayer, PrayerType::Fajr);
        assert_eq!(resolve_next(&schedule, at(12, 9, 59)).prayer, PrayerType::Dhuhr);
    }

    #[test]
    fn returns_first_later_entry_for_every_minute() {
        let schedule = PrayerSchedule::fallback();
        let last = schedule.time(PrayerType::Isha);
        for minute in 0..(24 * 60) {
            let now = at(minute / 60, minute % 60, 0);
            let next = resolve_next(&schedule, now);
            if now.time() < last {
                let expected = schedule.iter().find(|(_, t)| *t > now.time()).unwrap().0;
                assert_eq!(next.prayer, expected);
                assert!(!next.is_tomorrow);
            } else {
                assert_eq!(next.prayer, PrayerType::Fajr);
                assert!(next.is_tomorrow);
            }
            assert!(next.at > now);
        }
    }

    #[test]
    fn recomputing_is_idempotent() {
        let schedule = PrayerSchedule::fallback();
        let before = schedule.clone();
        let now = at(17, 3, 21);
        let first = resolve_with_countdown(&schedule, now);
        let second = resolve_with_countdown(&schedule, now);
        assert_eq!(first, second);
        assert_eq!(schedule, before);
        assert_eq!(first.1.to_string(), "01:41:39");
    }
}
