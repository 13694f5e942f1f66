use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::config::{AppConfig, LocationConfig};
use crate::location::{
    provider_from_config, BigDataCloud, LocationNotice, LocationResolver, PositionOptions,
};
use crate::models::{Countdown, Location, NextPrayer, PrayerSchedule};
use crate::prayer_times::{
    resolve_with_countdown, Aladhan, FetchedSchedule, ScheduleFetcher, ScheduleSource,
};

pub const LOCATING_TEXT: &str = "جاري تحديد موقعك...";
pub const FETCHING_TEXT: &str = "جاري تحميل أوقات الصلاة...";
pub const FALLBACK_SCHEDULE_NOTICE: &str = "تعذر تحميل أوقات الصلاة - يتم عرض أوقات افتراضية";

/// Result of one locate-then-fetch pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub location: Location,
    pub location_notice: Option<LocationNotice>,
    pub fetched: FetchedSchedule,
}

impl LoadOutcome {
    /// User-facing notices, most important first.
    pub fn notices(&self, default: &LocationConfig) -> Vec<String> {
        let mut notices = Vec::new();
        if let Some(notice) = self.location_notice {
            notices.push(format!(
                "{} - يتم عرض أوقات {} كافتراضي",
                notice.message(),
                default.city_label
            ));
        }
        if self.fetched.source == ScheduleSource::Fallback {
            notices.push(FALLBACK_SCHEDULE_NOTICE.to_string());
        }
        notices
    }
}

/// Locates the user, then fetches that location's schedule.
pub struct Loader {
    resolver: LocationResolver,
    fetcher: ScheduleFetcher,
}

impl Loader {
    pub fn new(resolver: LocationResolver, fetcher: ScheduleFetcher) -> Self {
        Self { resolver, fetcher }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let resolver = LocationResolver::new(
            provider_from_config(&config.geolocation),
            Arc::new(BigDataCloud::new(&config.service)),
            PositionOptions::from(&config.geolocation),
            config.location.clone(),
        );
        let fetcher = ScheduleFetcher::new(Arc::new(Aladhan::new(&config.service)), &config.location);
        Self::new(resolver, fetcher)
    }

    /// Blocks on the network; never fails.
    pub fn load(&self) -> LoadOutcome {
        self.load_with(|_| {})
    }

    /// Like `load`, reporting each stage's loading text as it starts.
    pub fn load_with(&self, mut progress: impl FnMut(&'static str)) -> LoadOutcome {
        let resolution = self.resolver.resolve();
        progress(FETCHING_TEXT);
        let fetched = self.fetcher.fetch(&resolution.location);
        LoadOutcome {
            location: resolution.location,
            location_notice: resolution.notice,
            fetched,
        }
    }
}

/// Everything the presentation layer shows.
#[derive(Debug, Clone)]
pub struct AppState {
    pub default: LocationConfig,
    pub location: Location,
    pub schedule: Option<PrayerSchedule>,
    pub source: Option<ScheduleSource>,
    pub next_prayer: Option<(NextPrayer, Countdown)>,
    pub notices: Vec<String>,
    pub loading: Option<&'static str>,
}

impl AppState {
    pub fn new(default: LocationConfig) -> Self {
        Self {
            location: Location::default_city(&default),
            default,
            schedule: None,
            source: None,
            next_prayer: None,
            notices: Vec::new(),
            loading: Some(LOCATING_TEXT),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Enter the loading state for a fresh locate. Old notices are cleared.
    pub fn begin_load(&mut self) {
        self.loading = Some(LOCATING_TEXT);
        self.notices.clear();
    }

    /// Show the next stage of a running load.
    pub fn show_progress(&mut self, text: &'static str) {
        if self.loading.is_some() {
            self.loading = Some(text);
        }
    }

    /// Replace location and schedule with a finished load.
    pub fn apply(&mut self, outcome: LoadOutcome, now: NaiveDateTime) {
        self.notices = outcome.notices(&self.default);
        self.location = outcome.location;
        self.schedule = Some(outcome.fetched.schedule);
        self.source = Some(outcome.fetched.source);
        self.loading = None;
        self.tick(now);
    }

    /// Recompute the next prayer and countdown. Touches nothing else.
    pub fn tick(&mut self, now: NaiveDateTime) {
        self.next_prayer = self
            .schedule
            .as_ref()
            .map(|schedule| resolve_with_countdown(schedule, now));
    }

    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::geocode::{GeocodeError, PlaceNames};
    use crate::location::geolocation::{Denied, FixedPosition, GeolocationProvider};
    use crate::location::resolver::tests::{jeddah, StubGeocoder};
    use crate::models::{Coordinates, PrayerType};
    use crate::prayer_times::fetcher::tests::{ok_body, StubApi};
    use crate::utils::http::HttpError;
    use chrono::NaiveDate;

    fn now(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn loader(
        geo: Arc<dyn GeolocationProvider>,
        names: Result<PlaceNames, GeocodeError>,
        api: &Arc<StubApi>,
    ) -> Loader {
        let default = LocationConfig::default();
        Loader::new(
            LocationResolver::new(
                geo,
                Arc::new(StubGeocoder(names)),
                PositionOptions::default(),
                default.clone(),
            ),
            ScheduleFetcher::new(api.clone(), &default),
        )
    }

    #[test]
    fn denied_location_fetches_by_city() {
        let api = Arc::new(StubApi::new(
            Err(HttpError::Status(500).into()),
            Ok(ok_body("04:20")),
        ));
        let outcome = loader(Arc::new(Denied), Ok(jeddah()), &api).load();

        assert_eq!(outcome.location.city, "الرياض");
        assert_eq!(outcome.fetched.source, ScheduleSource::City);
        assert_eq!(api.calls(), vec!["city Riyadh/Saudi Arabia".to_string()]);
        assert_eq!(
            outcome.notices(&LocationConfig::default()),
            vec!["تم رفض الوصول للموقع - يتم عرض أوقات الرياض كافتراضي".to_string()]
        );
    }

    #[test]
    fn unnamed_coordinates_fetch_default_city() {
        let api = Arc::new(StubApi::new(Ok(ok_body("04:20")), Ok(ok_body("04:30"))));
        let coords = Coordinates::new(21.54, 39.17);
        let outcome = loader(
            Arc::new(FixedPosition(coords)),
            Err(GeocodeError::Http(HttpError::Status(500))),
            &api,
        )
        .load();

        assert_eq!(outcome.location.city, "الرياض");
        assert_eq!(outcome.fetched.source, ScheduleSource::City);
        assert_eq!(api.calls(), vec!["city Riyadh/Saudi Arabia".to_string()]);
        assert_eq!(
            outcome.notices(&LocationConfig::default()),
            vec!["فشل في تحديد الموقع - يتم عرض أوقات الرياض كافتراضي".to_string()]
        );
    }

    #[test]
    fn load_reports_fetch_stage() {
        let api = Arc::new(StubApi::new(Ok(ok_body("04:20")), Ok(ok_body("04:30"))));
        let mut stages = Vec::new();
        loader(Arc::new(Denied), Ok(jeddah()), &api).load_with(|text| stages.push(text));
        assert_eq!(stages, vec![FETCHING_TEXT]);
    }

    #[test]
    fn progress_only_while_loading() {
        let mut state = AppState::new(LocationConfig::default());
        assert_eq!(state.loading, Some(LOCATING_TEXT));
        state.show_progress(FETCHING_TEXT);
        assert_eq!(state.loading, Some(FETCHING_TEXT));

        state.loading = None;
        state.show_progress(FETCHING_TEXT);
        assert!(!state.is_loading());
    }

    #[test]
    fn located_user_fetches_by_coordinates() {
        let api = Arc::new(StubApi::new(Ok(ok_body("04:20")), Ok(ok_body("04:30"))));
        let coords = Coordinates::new(21.54, 39.17);
        let outcome = loader(Arc::new(FixedPosition(coords)), Ok(jeddah()), &api).load();

        assert_eq!(outcome.location.city, "جدة");
        assert_eq!(outcome.fetched.source, ScheduleSource::Coordinates);
        assert!(outcome.notices(&LocationConfig::default()).is_empty());
    }

    #[test]
    fn total_failure_shows_fallback_with_both_notices() {
        let api = Arc::new(StubApi::new(
            Err(HttpError::Status(500).into()),
            Err(HttpError::Status(500).into()),
        ));
        let outcome = loader(Arc::new(Denied), Ok(jeddah()), &api).load();
        assert_eq!(outcome.fetched.schedule, PrayerSchedule::fallback());
        let notices = outcome.notices(&LocationConfig::default());
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1], FALLBACK_SCHEDULE_NOTICE);
    }

    #[test]
    fn apply_replaces_state_and_resolves() {
        let api = Arc::new(StubApi::new(
            Err(HttpError::Status(500).into()),
            Err(HttpError::Status(500).into()),
        ));
        let outcome = loader(Arc::new(Denied), Ok(jeddah()), &api).load();

        let mut state = AppState::new(LocationConfig::default());
        assert!(state.is_loading());
        assert!(state.next_prayer.is_none());

        state.apply(outcome, now(13, 0));
        assert!(!state.is_loading());
        assert_eq!(state.source, Some(ScheduleSource::Fallback));
        let (next, countdown) = state.next_prayer.clone().unwrap();
        assert_eq!(next.prayer, PrayerType::Asr);
        assert_eq!(countdown.to_string(), "02:30:00");

        state.tick(now(21, 0));
        let (next, countdown) = state.next_prayer.clone().unwrap();
        assert_eq!(next.prayer, PrayerType::Fajr);
        assert!(next.is_tomorrow);
        assert_eq!(countdown.to_string(), "07:45:00");

        state.dismiss_notices();
        assert!(state.notices.is_empty());
    }

    #[test]
    fn tick_without_schedule_is_a_no_op() {
        let mut state = AppState::new(LocationConfig::default());
        state.tick(now(9, 0));
        assert!(state.next_prayer.is_none());
        assert!(state.schedule.is_none());
    }

    #[test]
    fn begin_load_clears_notices() {
        let mut state = AppState::new(LocationConfig::default());
        state.loading = None;
        state.notices.push("x".into());
        state.begin_load();
        assert!(state.is_loading());
        assert!(state.notices.is_empty());
    }
}
