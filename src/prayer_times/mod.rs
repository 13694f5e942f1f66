pub mod fetcher;
pub mod resolver;

pub use fetcher::{Aladhan, FetchedSchedule, ScheduleFetcher, ScheduleSource};
pub use resolver::resolve_with_countdown;
