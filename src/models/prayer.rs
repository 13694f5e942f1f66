#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrayerType {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    /// All five prayers in the order they fall within a day.
    pub const ALL: [PrayerType; 5] = [
        PrayerType::Fajr,
        PrayerType::Dhuhr,
        PrayerType::Asr,
        PrayerType::Maghrib,
        PrayerType::Isha,
    ];

    /// Key used by the prayer-times service in `data.timings`.
    pub fn api_key(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "Fajr",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "الفجر",
            PrayerType::Dhuhr => "الظهر",
            PrayerType::Asr => "العصر",
            PrayerType::Maghrib => "المغرب",
            PrayerType::Isha => "العشاء",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PrayerType::Fajr => 0,
            PrayerType::Dhuhr => 1,
            PrayerType::Asr => 2,
            PrayerType::Maghrib => 3,
            PrayerType::Isha => 4,
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_chronological() {
        for (i, p) in PrayerType::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
        assert!(PrayerType::Fajr < PrayerType::Isha);
    }
}
