use super::assembly::RollingState;
use super::split::ShiftGroups;
use crate::model::StaffMember;

/// Astreintes du jour ; `None` quand personne n'est éligible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct OnCall {
    pub first: Option<usize>,
    pub second: Option<usize>,
}

fn pick(candidates: impl Iterator<Item = usize>, state: &RollingState) -> Option<usize> {
    let mut candidates: Vec<usize> = candidates.collect();
    candidates.sort_by_key(|&i| (state.on_call_count(i), state.was_second(i)));
    candidates.first().copied()
}

pub(super) fn rotate(staff: &[StaffMember], groups: &ShiftGroups, state: &mut RollingState) -> OnCall {
    let eligible = |i: &usize| staff[*i].regular() && staff[*i].can_on_call;

    // pas d'astreinte de 1re équipe juste après une astreinte de 2e équipe
    let previous_second = state.previous_second_on_call();
    let first = pick(
        groups
            .first
            .iter()
            .copied()
            .filter(eligible)
            .filter(|&i| Some(i) != previous_second),
        state,
    );
    if let Some(i) = first {
        state.record_on_call(i);
    }

    let second = pick(groups.second.iter().copied().filter(eligible), state);
    if let Some(i) = second {
        state.record_on_call(i);
        state.set_previous_second_on_call(i);
    }

    OnCall { first, second }
}
