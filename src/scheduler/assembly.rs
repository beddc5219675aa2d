use super::offdays::{self, OffSet};
use super::{coverage, oncall, split, Constraints, GenerateOptions};
use crate::model::{CoverageEvent, Month, MonthSchedule, ScheduleEntry, ShiftLabel, StaffMember};
use chrono::{Datelike, NaiveDate};

/// Compteurs glissants d'un jour sur l'autre, indexés par position dans la
/// liste du personnel. Vit le temps d'une génération.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RollingState {
    second_shift: Vec<u32>,
    on_call: Vec<u32>,
    support: Vec<u32>,
    previous: Vec<ShiftLabel>,
    previous_second_on_call: Option<usize>,
}

impl RollingState {
    pub fn new(staff_len: usize) -> Self {
        Self {
            second_shift: vec![0; staff_len],
            on_call: vec![0; staff_len],
            support: vec![0; staff_len],
            previous: vec![ShiftLabel::None; staff_len],
            previous_second_on_call: None,
        }
    }

    pub fn second_shift_count(&self, i: usize) -> u32 {
        self.second_shift[i]
    }
    pub fn on_call_count(&self, i: usize) -> u32 {
        self.on_call[i]
    }
    pub fn support_count(&self, i: usize) -> u32 {
        self.support[i]
    }
    pub fn previous_second_on_call(&self) -> Option<usize> {
        self.previous_second_on_call
    }

    /// 1 si la veille était en 2e équipe : critère secondaire des tris.
    pub(super) fn was_second(&self, i: usize) -> u8 {
        u8::from(self.previous[i] == ShiftLabel::Second)
    }

    pub(super) fn record_on_call(&mut self, i: usize) {
        self.on_call[i] += 1;
    }
    pub(super) fn record_support(&mut self, i: usize) {
        self.support[i] += 1;
    }
    pub(super) fn set_previous_second_on_call(&mut self, i: usize) {
        self.previous_second_on_call = Some(i);
    }
}

/// Entrées fixes d'une génération.
pub(super) struct DayContext<'a> {
    pub staff: &'a [StaffMember],
    pub off: &'a [OffSet],
    pub constraints: &'a Constraints,
    pub opts: GenerateOptions,
}

/// Une journée : `(jour, repos, état) → (cases, état suivant)`.
pub(super) fn step_day(
    ctx: &DayContext<'_>,
    date: NaiveDate,
    mut state: RollingState,
) -> (Vec<ScheduleEntry>, RollingState) {
    let staff = ctx.staff;
    let mut entries = vec![ScheduleEntry::default(); staff.len()];

    let mut available = Vec::with_capacity(staff.len());
    for (i, member) in staff.iter().enumerate() {
        if ctx.off[i].contains(&date) {
            continue;
        }
        match coverage::absence_on(&ctx.constraints.absences, &member.id, date) {
            Some(kind) => entries[i].shift = kind.into(),
            None => available.push(i),
        }
    }

    let mut groups = split::split_day(staff, &available, &state, ctx.opts);

    let events: Vec<&CoverageEvent> = ctx
        .constraints
        .events
        .iter()
        .filter(|e| e.date == date)
        .collect();
    for i in coverage::draw_support(staff, &mut groups, &events, &mut state) {
        entries[i].shift = ShiftLabel::Support;
    }
    // les renforts ont pu laisser la 2e équipe à une seule personne
    split::rebalance(staff, &mut groups, &state);

    for &i in &groups.first {
        entries[i].shift = ShiftLabel::First;
    }
    for &i in &groups.second {
        entries[i].shift = ShiftLabel::Second;
        state.second_shift[i] += 1;
    }

    let on_call = oncall::rotate(staff, &groups, &mut state);
    for i in on_call.first.into_iter().chain(on_call.second) {
        entries[i].on_call = true;
    }

    // le repos l'emporte sur tout le reste
    for (i, off) in ctx.off.iter().enumerate() {
        if off.contains(&date) {
            entries[i].shift = ShiftLabel::Off;
        }
    }

    tracing::debug!(
        %date,
        available = available.len(),
        first = groups.first.len(),
        second = groups.second.len(),
        on_call_first = on_call.first.is_some(),
        on_call_second = on_call.second.is_some(),
        "day planned"
    );

    state.previous = entries.iter().map(|e| e.shift).collect();
    (entries, state)
}

pub(super) fn generate(
    staff: &[StaffMember],
    month: Month,
    constraints: &Constraints,
    opts: GenerateOptions,
) -> MonthSchedule {
    let off = offdays::allocate_off_days(month, staff);
    let ctx = DayContext {
        staff,
        off: &off,
        constraints,
        opts,
    };

    let mut schedule = MonthSchedule::blank(month, staff);
    month.days().fold(RollingState::new(staff.len()), |state, date| {
        let (entries, next) = step_day(&ctx, date, state);
        for (member, entry) in staff.iter().zip(entries) {
            if let Some(cell) = schedule.entry_mut(&member.id, date.day()) {
                *cell = entry;
            }
        }
        next
    });

    tracing::debug!(%month, staff = staff.len(), "month generated");
    schedule
}
