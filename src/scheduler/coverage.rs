use super::assembly::RollingState;
use super::split::ShiftGroups;
use crate::model::{Absence, AbsenceKind, CoverageEvent, StaffId, StaffMember, WorkShift};
use chrono::NaiveDate;

pub(super) fn absence_on(absences: &[Absence], staff: &StaffId, date: NaiveDate) -> Option<AbsenceKind> {
    absences
        .iter()
        .find(|a| &a.staff == staff && a.date == date)
        .map(|a| a.kind)
}

/// Prélève les renforts du jour dans les équipes. Les personnes retenues
/// quittent leur équipe ; un effectif incomplet est seulement signalé.
pub(super) fn draw_support(
    staff: &[StaffMember],
    groups: &mut ShiftGroups,
    events: &[&CoverageEvent],
    state: &mut RollingState,
) -> Vec<usize> {
    let mut drawn = Vec::new();

    for event in events {
        let mut pool: Vec<usize> = match event.shift {
            Some(WorkShift::First) => groups.first.clone(),
            Some(WorkShift::Second) => groups.second.clone(),
            None => groups.first.iter().chain(&groups.second).copied().collect(),
        };
        pool.retain(|&i| staff[i].regular() && staff[i].can_support);
        pool.sort_by_key(|&i| state.support_count(i));
        pool.truncate(event.required as usize);

        if pool.len() < event.required as usize {
            tracing::warn!(
                date = %event.date,
                required = event.required,
                filled = pool.len(),
                "support coverage shortfall"
            );
        }

        for &i in &pool {
            groups.first.retain(|&m| m != i);
            groups.second.retain(|&m| m != i);
            state.record_support(i);
        }
        drawn.extend(pool);
    }

    drawn
}
