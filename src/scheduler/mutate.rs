use super::{util, SchedError};
use crate::model::{MonthSchedule, ScheduleEntry, ShiftLabel, StaffId, StaffMember};

fn cell<'a>(schedule: &'a mut MonthSchedule, id: &StaffId, day: u32) -> &'a mut ScheduleEntry {
    schedule
        .entries
        .entry(id.clone())
        .or_default()
        .entry(day)
        .or_default()
}

/// Un autre régulier est-il déjà d'astreinte sur cette équipe ce jour-là ?
/// Les temps partiels ne comptent pas (voir `check`).
fn has_other_holder(
    schedule: &MonthSchedule,
    staff: &[StaffMember],
    id: &StaffId,
    day: u32,
    shift: ShiftLabel,
) -> bool {
    staff
        .iter()
        .filter(|m| m.regular() && &m.id != id)
        .filter_map(|m| schedule.entry(&m.id, day))
        .any(|e| e.on_call && e.shift == shift)
}

/// Fait tourner l'étiquette d'une case : 1 → 2 → repos → 1.
pub(super) fn cycle_shift(
    schedule: &mut MonthSchedule,
    staff: &[StaffMember],
    id: &StaffId,
    day: u32,
) -> Result<ShiftLabel, SchedError> {
    let member = &staff[util::find_staff_index(staff, id)?];
    util::ensure_day(schedule, day)?;

    let current = *cell(schedule, id, day);
    let next = match current.shift {
        ShiftLabel::First if member.part_time => ShiftLabel::Off,
        ShiftLabel::First => ShiftLabel::Second,
        ShiftLabel::Second => ShiftLabel::Off,
        _ => ShiftLabel::First,
    };

    let keep_on_call =
        current.on_call && next.is_working() && !has_other_holder(schedule, staff, id, day, next);
    let entry = cell(schedule, id, day);
    entry.shift = next;
    entry.on_call = keep_on_call;
    Ok(next)
}

/// Pose ou retire l'astreinte d'une case ; renvoie le nouvel état.
pub(super) fn toggle_on_call(
    schedule: &mut MonthSchedule,
    staff: &[StaffMember],
    id: &StaffId,
    day: u32,
) -> Result<bool, SchedError> {
    let member = &staff[util::find_staff_index(staff, id)?];
    util::ensure_day(schedule, day)?;

    let current = *cell(schedule, id, day);
    if current.on_call {
        cell(schedule, id, day).on_call = false;
        return Ok(false);
    }
    if member.part_time {
        return Err(SchedError::OnCallInvalid("part-time staff cannot be on call"));
    }
    if !current.shift.is_working() {
        return Err(SchedError::OnCallInvalid("not on a working shift"));
    }
    if has_other_holder(schedule, staff, id, day, current.shift) {
        return Err(SchedError::OnCallInvalid("shift already has an on-call holder"));
    }
    cell(schedule, id, day).on_call = true;
    Ok(true)
}
