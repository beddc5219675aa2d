use super::assembly::RollingState;
use super::GenerateOptions;
use crate::model::StaffMember;

/// Répartition d'une journée, en positions dans la liste du personnel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct ShiftGroups {
    pub first: Vec<usize>,
    pub second: Vec<usize>,
}

/// Taille visée de la 2e équipe.
pub(super) fn second_shift_target(regulars: usize, available: usize, opts: GenerateOptions) -> usize {
    if regulars == 0 {
        return 0;
    }
    // arrondi bancaire : 4.5 → 4
    let share = (opts.second_shift_ratio * available as f64).round_ties_even() as usize;
    regulars.min(opts.min_second_shift.max(share))
}

pub(super) fn split_day(
    staff: &[StaffMember],
    available: &[usize],
    state: &RollingState,
    opts: GenerateOptions,
) -> ShiftGroups {
    let (regulars, part_timers): (Vec<usize>, Vec<usize>) =
        available.iter().partition(|&&i| staff[i].regular());
    let target = second_shift_target(regulars.len(), available.len(), opts);

    let mut second = regulars.clone();
    second.sort_by_key(|&i| (state.second_shift_count(i), state.was_second(i)));
    second.truncate(target);

    let first: Vec<usize> = regulars
        .iter()
        .copied()
        .filter(|i| !second.contains(i))
        .chain(part_timers)
        .collect();

    let mut groups = ShiftGroups { first, second };
    rebalance(staff, &mut groups, state);
    groups
}

/// Jamais seul en 2e équipe si la 1re peut céder un régulier.
pub(super) fn rebalance(staff: &[StaffMember], groups: &mut ShiftGroups, state: &RollingState) {
    if groups.second.len() != 1 || groups.first.len() <= 1 {
        return;
    }
    let moved = groups
        .first
        .iter()
        .enumerate()
        .filter(|&(_, &i)| staff[i].regular())
        .min_by_key(|&(_, &i)| state.second_shift_count(i))
        .map(|(pos, _)| pos);
    if let Some(pos) = moved {
        let i = groups.first.remove(pos);
        groups.second.push(i);
    }
}
