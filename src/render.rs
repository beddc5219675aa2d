use crate::model::{MonthSchedule, StaffMember};
use crate::scheduler::SchedError;
use std::fmt::Write;

/// Permet de customiser le rendu d'un planning (texte, tableur, etc.).
pub trait ScheduleRenderer {
    fn render(&self, schedule: &MonthSchedule, staff: &[StaffMember]) -> Result<String, SchedError>;
}

/// Grille texte : une ligne par membre, une colonne par jour.
/// `*` marque l'astreinte, `.` une case vide.
#[derive(Debug, Clone, Copy)]
pub struct TextGrid {
    pub name_width: usize,
}

impl Default for TextGrid {
    fn default() -> Self {
        Self { name_width: 12 }
    }
}

const CELL: usize = 5;

impl ScheduleRenderer for TextGrid {
    fn render(&self, schedule: &MonthSchedule, staff: &[StaffMember]) -> Result<String, SchedError> {
        let month = schedule.period()?;
        let mut out = String::new();
        let mut days = itoa::Buffer::new();

        let mut line = format!("{:<w$}", month.to_string(), w = self.name_width);
        for day in 1..=month.num_days() {
            let _ = write!(line, "{:>w$}", days.format(day), w = CELL);
        }
        out.push_str(line.trim_end());
        out.push('\n');

        for member in staff {
            let mut line: String = member.name.chars().take(self.name_width).collect();
            let pad = self.name_width.saturating_sub(line.chars().count());
            line.push_str(&" ".repeat(pad));
            for day in 1..=month.num_days() {
                let cell = match schedule.entry(&member.id, day) {
                    Some(e) if e.shift.code().is_empty() => ".".to_string(),
                    Some(e) if e.on_call => format!("{}*", e.shift.code()),
                    Some(e) => e.shift.code().to_string(),
                    None => "?".to_string(),
                };
                let _ = write!(line, "{cell:>w$}", w = CELL);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        Ok(out)
    }
}
