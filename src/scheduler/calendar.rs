use crate::model::{is_weekend, Month};
use chrono::{Datelike, Duration, NaiveDate};

/// Semaine complète alignée sur le lundi ; peut déborder sur les mois voisins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    monday: NaiveDate,
}

impl WeekWindow {
    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    /// Jour de la semaine, `offset` 0 = lundi … 6 = dimanche.
    pub fn day(&self, offset: u8) -> NaiveDate {
        self.monday + Duration::days(i64::from(offset % 7))
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.monday.iter_days().take(7)
    }
}

pub fn month_days(month: Month) -> Vec<NaiveDate> {
    month.days().collect()
}

/// Semaines (lundi → dimanche) couvrant le mois.
pub fn week_windows(month: Month) -> Vec<WeekWindow> {
    let first = month.first_day();
    let last = month.last_day();
    let back = i64::from(first.weekday().num_days_from_monday());
    let mut monday = first - Duration::days(back);
    let mut out = Vec::new();
    while monday <= last {
        out.push(WeekWindow { monday });
        monday += Duration::days(7);
    }
    out
}

/// Nombre de samedis et dimanches du mois (quota de repos mensuel).
pub fn weekend_day_count(month: Month) -> usize {
    month.days().filter(|d| is_weekend(*d)).count()
}
