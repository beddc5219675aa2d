use super::calendar::{self, WeekWindow};
use crate::model::{is_weekend, Month, StaffMember};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Paires de jours de repos (0 = lundi), parcourues en boucle.
/// La première paire est le vrai week-end.
pub const PAIR_PATTERNS: [(u8, u8); 7] = [(5, 6), (6, 0), (1, 2), (3, 4), (0, 1), (2, 3), (4, 5)];

pub type OffSet = BTreeSet<NaiveDate>;

/// Jours de repos de chaque membre, dans l'ordre de `staff`.
pub fn allocate_off_days(month: Month, staff: &[StaffMember]) -> Vec<OffSet> {
    let quota = calendar::weekend_day_count(month);
    let weeks = calendar::week_windows(month);
    staff
        .iter()
        .enumerate()
        .map(|(position, member)| {
            let mut off = pair_off_days(month, &weeks, position, quota / 2);
            pad_shortfall(month, &mut off, quota);
            trim_overflow(&mut off, quota);
            tracing::trace!(staff = %member.name, count = off.len(), "off days allocated");
            off
        })
        .collect()
}

/// Pose des paires de repos semaine après semaine, en décalant le motif
/// selon la position du membre dans la liste.
fn pair_off_days(month: Month, weeks: &[WeekWindow], position: usize, pairs_needed: usize) -> OffSet {
    let start = position % PAIR_PATTERNS.len();
    let mut off = OffSet::new();
    let mut assigned = 0usize;

    for week in weeks {
        if assigned >= pairs_needed {
            break;
        }
        let (a, b) = PAIR_PATTERNS[(start + assigned) % PAIR_PATTERNS.len()];
        let (d1, d2) = (week.day(a), week.day(b));
        if month.contains(d1) && month.contains(d2) {
            off.insert(d1);
            off.insert(d2);
            assigned += 1;
        }
    }
    off
}

/// Ordre de complément : jours ouvrés d'abord, puis par numéro de jour.
///
/// Les jours de semaine passent avant le week-end, si bien que le
/// complément tombe de préférence hors week-end. Comportement conservé tel
/// quel ; c'est le seul endroit à changer pour l'inverser.
pub fn shortfall_rank(date: NaiveDate) -> (bool, u32) {
    (is_weekend(date), date.day())
}

/// Complète `off` avec les jours restants du mois les mieux classés.
pub fn pad_shortfall(month: Month, off: &mut OffSet, quota: usize) {
    if off.len() >= quota {
        return;
    }
    let need = quota - off.len();
    let mut candidates: Vec<NaiveDate> = month.days().filter(|d| !off.contains(d)).collect();
    candidates.sort_by_key(|d| shortfall_rank(*d));
    off.extend(candidates.into_iter().take(need));
}

/// Ne garde que les `quota` jours les plus tôt.
pub fn trim_overflow(off: &mut OffSet, quota: usize) {
    while off.len() > quota {
        off.pop_last();
    }
}
