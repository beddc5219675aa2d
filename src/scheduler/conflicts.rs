use super::{SchedError, Violation, ViolationKind};
use crate::model::{MonthSchedule, ShiftLabel, StaffMember};

pub(super) fn check(schedule: &MonthSchedule, staff: &[StaffMember]) -> Result<Vec<Violation>, SchedError> {
    let month = schedule.period()?;
    let mut out = Vec::new();
    let mut push = |member: &StaffMember, day: u32, kind: ViolationKind| {
        out.push(Violation {
            staff: member.id.clone(),
            day,
            kind,
        });
    };

    for day in 1..=month.num_days() {
        let mut holders = [0usize; 2];

        for member in staff {
            let Some(entry) = schedule.entry(&member.id, day) else {
                push(member, day, ViolationKind::MissingEntry);
                continue;
            };
            if entry.on_call && !entry.shift.is_working() {
                push(member, day, ViolationKind::OnCallOffShift);
            }
            if member.part_time {
                if entry.shift == ShiftLabel::Second {
                    push(member, day, ViolationKind::PartTimeSecondShift);
                }
                if entry.on_call {
                    push(member, day, ViolationKind::PartTimeOnCall);
                }
                continue;
            }
            if entry.on_call {
                let slot = match entry.shift {
                    ShiftLabel::First => 0,
                    ShiftLabel::Second => 1,
                    _ => continue,
                };
                holders[slot] += 1;
                // le premier titulaire est légitime, les suivants non
                if holders[slot] > 1 {
                    push(member, day, ViolationKind::DuplicateOnCall);
                }
            }
        }
    }

    Ok(out)
}
