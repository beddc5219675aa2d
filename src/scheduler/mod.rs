mod assembly;
pub mod calendar;
mod conflicts;
mod coverage;
mod mutate;
pub mod offdays;
mod oncall;
mod split;
mod types;
mod util;

pub use types::{Constraints, GenerateOptions, SchedError, Violation, ViolationKind};

use crate::model::{Month, MonthSchedule, ShiftLabel, StaffId, StaffMember};

/// Générateur de planning mensuel.
///
/// Heuristique gloutonne en une passe, jour après jour : pas de solveur,
/// une configuration infaisable donne simplement un planning sous-doté.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scheduler {
    opts: GenerateOptions,
}

impl Scheduler {
    pub fn new(opts: GenerateOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> GenerateOptions {
        self.opts
    }

    /// Produit le planning complet du mois (une case par membre et par jour).
    ///
    /// `staff` est une liste ordonnée : la position de chaque membre décide
    /// de sa rotation de repos et départage les égalités. Pour régénérer à
    /// l'identique, fournir toujours le personnel dans le même ordre.
    pub fn generate(&self, staff: &[StaffMember], month: Month, constraints: &Constraints) -> MonthSchedule {
        assembly::generate(staff, month, constraints, self.opts)
    }
}

/// Raccourci : options par défaut, ni absences ni renforts.
pub fn generate_month(staff: &[StaffMember], month: Month) -> MonthSchedule {
    Scheduler::default().generate(staff, month, &Constraints::default())
}

pub fn cycle_shift(
    schedule: &mut MonthSchedule,
    staff: &[StaffMember],
    id: &StaffId,
    day: u32,
) -> Result<ShiftLabel, SchedError> {
    mutate::cycle_shift(schedule, staff, id, day)
}

pub fn toggle_on_call(
    schedule: &mut MonthSchedule,
    staff: &[StaffMember],
    id: &StaffId,
    day: u32,
) -> Result<bool, SchedError> {
    mutate::toggle_on_call(schedule, staff, id, day)
}

/// Vérifie les invariants d'un planning, généré ou retouché à la main.
pub fn check(schedule: &MonthSchedule, staff: &[StaffMember]) -> Result<Vec<Violation>, SchedError> {
    conflicts::check(schedule, staff)
}
