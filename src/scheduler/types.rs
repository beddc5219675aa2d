use crate::model::{Absence, CoverageEvent, StaffId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Part visée de l'effectif disponible en 2e équipe.
    pub second_shift_ratio: f64,
    /// Taille plancher de la 2e équipe (bornée par le nombre de réguliers).
    pub min_second_shift: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            second_shift_ratio: 0.45,
            min_second_shift: 2,
        }
    }
}

/// Absences et renforts pris en compte pour un mois.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub absences: Vec<Absence>,
    pub events: Vec<CoverageEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    MissingEntry,
    OnCallOffShift,
    DuplicateOnCall,
    PartTimeSecondShift,
    PartTimeOnCall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub staff: StaffId,
    pub day: u32,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("unknown staff member: {0}")]
    UnknownStaff(String),
    #[error("day {day} is outside {year}-{month:02}")]
    DayOutOfMonth { year: i32, month: u32, day: u32 },
    #[error("on-call invalid: {0}")]
    OnCallInvalid(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
