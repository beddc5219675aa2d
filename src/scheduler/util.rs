use super::SchedError;
use crate::model::{MonthSchedule, StaffId, StaffMember};

pub(super) fn find_staff_index(staff: &[StaffMember], id: &StaffId) -> Result<usize, SchedError> {
    staff
        .iter()
        .position(|s| &s.id == id)
        .ok_or_else(|| SchedError::UnknownStaff(id.as_str().to_string()))
}

pub(super) fn ensure_day(schedule: &MonthSchedule, day: u32) -> Result<(), SchedError> {
    let month = schedule.period()?;
    if !month.contains_day(day) {
        return Err(SchedError::DayOutOfMonth {
            year: schedule.year,
            month: schedule.month,
            day,
        });
    }
    Ok(())
}
