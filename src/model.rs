use crate::scheduler::SchedError;
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour StaffMember
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn default_true() -> bool {
    true
}

/// Membre du personnel.
///
/// L'ordre dans lequel les membres sont fournis au moteur fait partie du
/// contrat : la position de chacun pilote la rotation des repos, et deux
/// listes permutées donnent deux plannings différents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    /// Temps partiel : toujours en 1re équipe, jamais d'astreinte.
    #[serde(default)]
    pub part_time: bool,
    #[serde(default = "default_true")]
    pub can_on_call: bool,
    #[serde(default = "default_true")]
    pub can_support: bool,
}

impl StaffMember {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: StaffId::random(),
            name: name.into(),
            part_time: false,
            can_on_call: true,
            can_support: true,
        }
    }

    /// Temps partiel : ni astreinte ni renfort.
    pub fn part_timer<N: Into<String>>(name: N) -> Self {
        Self {
            part_time: true,
            can_on_call: false,
            can_support: false,
            ..Self::new(name)
        }
    }

    pub fn with_id(mut self, id: StaffId) -> Self {
        self.id = id;
        self
    }

    pub fn regular(&self) -> bool {
        !self.part_time
    }
}

/// Mois cible, validé une fois pour toutes à la construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Month {
    first: NaiveDate,
    len: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, SchedError> {
        let invalid = || SchedError::InvalidMonth { year, month };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        // veille du 1er du mois suivant
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;
        Ok(Self {
            first,
            len: last.day(),
        })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }
    pub fn month(&self) -> u32 {
        self.first.month()
    }
    pub fn num_days(&self) -> u32 {
        self.len
    }
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }
    pub fn last_day(&self) -> NaiveDate {
        self.first + Duration::days(i64::from(self.len) - 1)
    }

    /// Jours du mois, dans l'ordre.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.len as usize)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn contains_day(&self, day: u32) -> bool {
        (1..=self.len).contains(&day)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Étiquette d'une case du planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShiftLabel {
    #[default]
    None,
    First,
    Second,
    Off,
    Vacation,
    Sick,
    Training,
    Support,
}

impl ShiftLabel {
    pub fn code(self) -> &'static str {
        match self {
            ShiftLabel::None => "",
            ShiftLabel::First => "1",
            ShiftLabel::Second => "2",
            ShiftLabel::Off => "OFF",
            ShiftLabel::Vacation => "VAC",
            ShiftLabel::Sick => "SICK",
            ShiftLabel::Training => "TRN",
            ShiftLabel::Support => "SUP",
        }
    }

    pub fn is_working(self) -> bool {
        matches!(self, ShiftLabel::First | ShiftLabel::Second)
    }
}

impl fmt::Display for ShiftLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ShiftLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" => Ok(ShiftLabel::None),
            "1" => Ok(ShiftLabel::First),
            "2" => Ok(ShiftLabel::Second),
            "OFF" => Ok(ShiftLabel::Off),
            "VAC" => Ok(ShiftLabel::Vacation),
            "SICK" => Ok(ShiftLabel::Sick),
            "TRN" => Ok(ShiftLabel::Training),
            "SUP" => Ok(ShiftLabel::Support),
            other => Err(format!("unknown shift code: {other}")),
        }
    }
}

/// Équipe de travail (1re ou 2e).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkShift {
    First,
    Second,
}

impl From<WorkShift> for ShiftLabel {
    fn from(shift: WorkShift) -> Self {
        match shift {
            WorkShift::First => ShiftLabel::First,
            WorkShift::Second => ShiftLabel::Second,
        }
    }
}

impl FromStr for WorkShift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(WorkShift::First),
            "2" => Ok(WorkShift::Second),
            other => Err(format!("expected shift 1 or 2, got {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub shift: ShiftLabel,
    #[serde(default)]
    pub on_call: bool,
}

impl ScheduleEntry {
    pub fn new(shift: ShiftLabel, on_call: bool) -> Self {
        Self { shift, on_call }
    }
}

/// Planning d'un mois : membre → jour (1..=N) → case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSchedule {
    pub year: i32,
    pub month: u32,
    pub entries: BTreeMap<StaffId, BTreeMap<u32, ScheduleEntry>>,
}

impl MonthSchedule {
    /// Planning vierge : chaque case existe, vide.
    pub fn blank(month: Month, staff: &[StaffMember]) -> Self {
        let entries = staff
            .iter()
            .map(|s| {
                let row = (1..=month.num_days())
                    .map(|d| (d, ScheduleEntry::default()))
                    .collect();
                (s.id.clone(), row)
            })
            .collect();
        Self {
            year: month.year(),
            month: month.month(),
            entries,
        }
    }

    pub fn period(&self) -> Result<Month, SchedError> {
        Month::new(self.year, self.month)
    }

    pub fn entry(&self, id: &StaffId, day: u32) -> Option<&ScheduleEntry> {
        self.entries.get(id).and_then(|row| row.get(&day))
    }

    pub fn entry_mut(&mut self, id: &StaffId, day: u32) -> Option<&mut ScheduleEntry> {
        self.entries.get_mut(id).and_then(|row| row.get_mut(&day))
    }

    /// Nombre de jours portant `label` pour un membre.
    pub fn count_label(&self, id: &StaffId, label: ShiftLabel) -> usize {
        self.entries
            .get(id)
            .map_or(0, |row| row.values().filter(|e| e.shift == label).count())
    }

    pub fn on_call_count(&self, id: &StaffId) -> usize {
        self.entries
            .get(id)
            .map_or(0, |row| row.values().filter(|e| e.on_call).count())
    }
}

/// Motif d'absence datée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbsenceKind {
    Vacation,
    Sick,
    Training,
}

impl From<AbsenceKind> for ShiftLabel {
    fn from(kind: AbsenceKind) -> Self {
        match kind {
            AbsenceKind::Vacation => ShiftLabel::Vacation,
            AbsenceKind::Sick => ShiftLabel::Sick,
            AbsenceKind::Training => ShiftLabel::Training,
        }
    }
}

impl FromStr for AbsenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vacation" | "vac" => Ok(AbsenceKind::Vacation),
            "sick" => Ok(AbsenceKind::Sick),
            "training" | "trn" => Ok(AbsenceKind::Training),
            other => Err(format!("unknown absence kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    pub staff: StaffId,
    pub date: NaiveDate,
    pub kind: AbsenceKind,
}

/// Renfort fixe : `required` personnes sur une équipe (ou toute la journée).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageEvent {
    pub date: NaiveDate,
    #[serde(default)]
    pub shift: Option<WorkShift>,
    pub required: u32,
}

/// Document persisté : personnel, absences, renforts, plannings enregistrés.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub absences: Vec<Absence>,
    #[serde(default)]
    pub events: Vec<CoverageEvent>,
    #[serde(default)]
    pub schedules: Vec<MonthSchedule>,
}

impl Roster {
    pub fn find_staff_by_name<'a>(&'a self, name: &str) -> Option<&'a StaffMember> {
        self.staff.iter().find(|s| s.name == name)
    }
    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a StaffMember> {
        self.staff.iter().find(|s| &s.id == id)
    }

    fn require_name(&self, name: &str) -> Result<&StaffMember, SchedError> {
        self.find_staff_by_name(name)
            .ok_or_else(|| SchedError::UnknownStaff(name.to_string()))
    }

    /// Ajoute ou met à jour un membre (le nom est la clé d'unicité).
    pub fn upsert_staff(&mut self, member: StaffMember) -> StaffId {
        if let Some(existing) = self.staff.iter_mut().find(|s| s.name == member.name) {
            existing.part_time = member.part_time;
            existing.can_on_call = member.can_on_call;
            existing.can_support = member.can_support;
            return existing.id.clone();
        }
        let id = member.id.clone();
        self.staff.push(member);
        id
    }

    /// Supprime un membre et tout ce qui le référence.
    pub fn remove_staff(&mut self, name: &str) -> Result<StaffMember, SchedError> {
        let pos = self
            .staff
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| SchedError::UnknownStaff(name.to_string()))?;
        let removed = self.staff.remove(pos);
        self.absences.retain(|a| a.staff != removed.id);
        for schedule in &mut self.schedules {
            schedule.entries.remove(&removed.id);
        }
        Ok(removed)
    }

    pub fn add_absence(
        &mut self,
        name: &str,
        date: NaiveDate,
        kind: AbsenceKind,
    ) -> Result<(), SchedError> {
        let staff = self.require_name(name)?.id.clone();
        self.absences.retain(|a| !(a.staff == staff && a.date == date));
        self.absences.push(Absence { staff, date, kind });
        Ok(())
    }

    pub fn add_event(&mut self, event: CoverageEvent) {
        self.events.push(event);
    }

    /// Absences et renforts tombant dans le mois.
    pub fn constraints_for(&self, month: Month) -> crate::scheduler::Constraints {
        crate::scheduler::Constraints {
            absences: self
                .absences
                .iter()
                .filter(|a| month.contains(a.date))
                .cloned()
                .collect(),
            events: self
                .events
                .iter()
                .filter(|e| month.contains(e.date))
                .cloned()
                .collect(),
        }
    }

    /// Enregistre un planning, case par case (upsert sur membre/année/mois/jour).
    ///
    /// Un membre inconnu ou un jour hors du mois rejette tout l'enregistrement.
    pub fn save_month(&mut self, schedule: &MonthSchedule) -> Result<(), SchedError> {
        if let Some(unknown) = schedule
            .entries
            .keys()
            .find(|id| self.find_staff_by_id(id).is_none())
        {
            return Err(SchedError::UnknownStaff(unknown.as_str().to_string()));
        }
        let month = schedule.period()?;
        if let Some(&day) = schedule
            .entries
            .values()
            .flat_map(|row| row.keys())
            .find(|&&day| !month.contains_day(day))
        {
            return Err(SchedError::DayOutOfMonth {
                year: schedule.year,
                month: schedule.month,
                day,
            });
        }

        let pos = self
            .schedules
            .iter()
            .position(|s| s.year == schedule.year && s.month == schedule.month);
        let stored = match pos {
            Some(pos) => &mut self.schedules[pos],
            None => {
                self.schedules.push(MonthSchedule {
                    year: schedule.year,
                    month: schedule.month,
                    entries: BTreeMap::new(),
                });
                let last = self.schedules.len() - 1;
                &mut self.schedules[last]
            }
        };
        for (id, row) in &schedule.entries {
            let target = stored.entries.entry(id.clone()).or_default();
            for (day, entry) in row {
                target.insert(*day, *entry);
            }
        }
        Ok(())
    }

    /// Charge le planning d'un mois, complété par des cases vides pour le
    /// personnel courant. `None` si rien n'est enregistré pour ce mois.
    pub fn load_month(&self, month: Month) -> Option<MonthSchedule> {
        let stored = self
            .schedules
            .iter()
            .find(|s| s.year == month.year() && s.month == month.month())?;
        let mut out = MonthSchedule::blank(month, &self.staff);
        for (id, row) in out.entries.iter_mut() {
            if let Some(saved) = stored.entries.get(id) {
                for (day, entry) in row.iter_mut() {
                    if let Some(s) = saved.get(day) {
                        *entry = *s;
                    }
                }
            }
        }
        Some(out)
    }
}
