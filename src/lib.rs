#![forbid(unsafe_code)]
//! Roulement — génération de plannings mensuels 1re/2e équipe (sans BD).
//!
//! - Repos mensuels = nombre de samedis + dimanches, posés par paires tournantes.
//! - Répartition quotidienne 1re/2e équipe, une astreinte par équipe.
//! - Absences et renforts fixes pris en compte jour par jour.
//! - Stockage fichier (JSON), import/export CSV.

pub mod config;
pub mod io;
pub mod model;
pub mod render;
pub mod scheduler;
pub mod storage;

pub use model::{
    Absence, AbsenceKind, CoverageEvent, Month, MonthSchedule, Roster, ScheduleEntry, ShiftLabel,
    StaffId, StaffMember, WorkShift,
};
pub use render::{ScheduleRenderer, TextGrid};
pub use scheduler::{
    check, cycle_shift, generate_month, toggle_on_call, Constraints, GenerateOptions, SchedError,
    Scheduler, Violation, ViolationKind,
};
pub use storage::{JsonStorage, Storage};
